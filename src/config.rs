use crate::dashboard::logic::{ColumnRange, Encoding, LoadOptions};
use crate::error::{DashboardError, Result, ResultExt as _};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_DIR: &str = "residuos";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DashboardSettings {
    /// CSV read at startup.
    pub data_path: PathBuf,
    /// Illustration shown under the introduction.
    pub image_path: PathBuf,
    /// Field separator; must be a single ASCII character.
    pub separator: char,
    pub encoding: Encoding,
    /// Rows sampled to infer column types.
    pub infer_schema_rows: usize,
    /// Column positions offered in the chart column selector.
    pub chart_columns: ColumnRange,
    /// Maximum rows drawn in each data table
    pub preview_rows: usize,
    /// Lines under "Contacto:" in the sidebar
    pub contact: Vec<String>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.csv"),
            image_path: PathBuf::from("imagen.jpg"),
            separator: ';',
            encoding: Encoding::Latin1,
            infer_schema_rows: 10_000,
            chart_columns: ColumnRange::default(),
            preview_rows: 1_000,
            contact: vec!["Grupo 4".to_owned(), "correo electronico".to_owned()],
        }
    }
}

impl DashboardSettings {
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] when the separator is not a single
    /// ASCII character.
    pub fn load_options(&self) -> Result<LoadOptions> {
        if !self.separator.is_ascii() {
            return Err(DashboardError::Config(format!(
                "el separador '{}' debe ser un carácter ASCII",
                self.separator
            )));
        }
        Ok(LoadOptions {
            separator: self.separator as u8,
            encoding: self.encoding,
            infer_schema_rows: self.infer_schema_rows,
        })
    }
}

/// `<config dir>/residuos/config.json`, relative to the working directory when
/// the platform has no config directory.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.json")
}

/// Reads the settings file.
///
/// An explicit path must exist and parse. The default location is lenient:
/// a missing or unreadable file yields the defaults, which are written back
/// when the file did not exist yet.
///
/// # Errors
///
/// Only for an explicit path that cannot be read or parsed.
pub fn load_settings(explicit: Option<&Path>) -> Result<DashboardSettings> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("No se pudo leer {}", path.display()))?;
        let settings = serde_json::from_str(&content)?;
        tracing::info!(path = %path.display(), "Settings loaded");
        return Ok(settings);
    }

    let path = config_path();
    if path.exists() {
        match std::fs::read_to_string(&path)
            .map_err(DashboardError::from)
            .and_then(|content| Ok(serde_json::from_str::<DashboardSettings>(&content)?))
        {
            Ok(settings) => return Ok(settings),
            Err(err) => {
                tracing::warn!(path = %path.display(), "Ignoring settings file: {err}");
                return Ok(DashboardSettings::default());
            }
        }
    }

    let settings = DashboardSettings::default();
    if let Err(err) = save_settings(&settings, &path) {
        tracing::debug!("Could not write default settings: {err}");
    }
    Ok(settings)
}

/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn save_settings(settings: &DashboardSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("residuos_config_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_defaults_match_dataset_layout() {
        let settings = DashboardSettings::default();
        let options = settings.load_options().unwrap();
        assert_eq!(options.separator, b';');
        assert_eq!(options.encoding, Encoding::Latin1);
        assert_eq!(settings.chart_columns, ColumnRange { start: 7, end: 14 });
    }

    #[test]
    fn test_non_ascii_separator_rejected() {
        let settings = DashboardSettings {
            separator: '§',
            ..Default::default()
        };
        assert!(matches!(
            settings.load_options(),
            Err(DashboardError::Config(_))
        ));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_path("partial.json");
        std::fs::write(&path, r#"{ "data_path": "otro.csv", "separator": "," }"#).unwrap();
        let settings = load_settings(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.data_path, PathBuf::from("otro.csv"));
        assert_eq!(settings.separator, ',');
        assert_eq!(settings.preview_rows, DashboardSettings::default().preview_rows);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip.json");
        let settings = DashboardSettings {
            preview_rows: 25,
            ..Default::default()
        };
        save_settings(&settings, &path).unwrap();
        let loaded = load_settings(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let path = temp_path("missing.json");
        assert!(load_settings(Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_path_must_parse() {
        let path = temp_path("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let result = load_settings(Some(&path));
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }
}
