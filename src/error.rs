//! Error handling for the dashboard.
//!
//! Every fallible operation in the library returns [`Result`], whose error
//! type is [`DashboardError`]. The variants follow the way the dashboard
//! reacts to them:
//!
//! - [`DashboardError::Decode`] and [`DashboardError::Load`] are fatal for the
//!   data sections: the message is shown and nothing that depends on the
//!   table is drawn.
//! - [`DashboardError::MissingAsset`] is shown where the decorative image
//!   would be and rendering continues.
//! - [`DashboardError::InvalidColumn`] replaces a chart that cannot be built
//!   from the selected column.
//!
//! ```
//! use residuos::error::DashboardError;
//!
//! fn describe(err: &DashboardError) -> &'static str {
//!     match err {
//!         DashboardError::Decode { .. } | DashboardError::Load(_) => "fatal",
//!         DashboardError::MissingAsset(_) => "cosmetic",
//!         _ => "recoverable",
//!     }
//! }
//! ```
//!
//! The `Display` strings are user facing, so they are written in Spanish
//! like the rest of the interface.

use std::fmt;
use std::path::PathBuf;

/// Main error type for dashboard operations.
#[derive(Debug)]
pub enum DashboardError {
    /// I/O errors outside of dataset loading (config files, logs).
    Io(std::io::Error),

    /// The dataset bytes are not valid in the declared encoding.
    Decode { path: PathBuf, detail: String },

    /// Any other failure reading or parsing the dataset.
    Load(String),

    /// A decorative asset could not be found.
    MissingAsset(PathBuf),

    /// The selected column cannot be used for the requested operation.
    InvalidColumn { column: String, reason: String },

    /// Polars errors raised after the dataset was loaded.
    DataProcessing(String),

    /// Configuration errors
    Config(String),

    /// Generic error with context
    Other(String),
}

impl DashboardError {
    pub fn invalid_column(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColumn {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error must stop every section that depends on the table.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Load(_))
    }
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Error de E/S: {e}"),
            Self::Decode { path, detail } => {
                write!(f, "Error al subir el archivo {}: {detail}", path.display())
            }
            Self::Load(msg) => write!(f, "Error al cargar el archivo CSV: {msg}"),
            Self::MissingAsset(path) => write!(f, "Error de ruta: {}", path.display()),
            Self::InvalidColumn { column, reason } => {
                write!(f, "Columna no válida '{column}': {reason}")
            }
            Self::DataProcessing(msg) => write!(f, "Error al procesar los datos: {msg}"),
            Self::Config(msg) => write!(f, "Error de configuración: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<polars::error::PolarsError> for DashboardError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<DashboardError> for String {
    fn from(err: DashboardError) -> Self {
        err.to_string()
    }
}

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<DashboardError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: DashboardError = e.into();
            DashboardError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: DashboardError = e.into();
            DashboardError::Other(format!("{}: {}", f(), err))
        })
    }
}
