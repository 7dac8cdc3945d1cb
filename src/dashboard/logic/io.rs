//! Dataset loading.
//!
//! The municipal waste file is a `;`-separated text file exported in Latin-1.
//! Polars only parses UTF-8, so the bytes are decoded first and the parser
//! reads the decoded text from memory.

use super::types::{Dataset, Encoding, LoadOptions};
use crate::error::{DashboardError, Result};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

/// Reads `path` into a [`Dataset`], preserving column order and names.
///
/// # Errors
///
/// - [`DashboardError::Decode`] when the bytes are not valid in `options.encoding`.
/// - [`DashboardError::Load`] for any other failure (missing file, malformed rows).
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset> {
    let bytes = std::fs::read(path)
        .map_err(|err| DashboardError::Load(format!("{}: {err}", path.display())))?;

    let text = decode(bytes, options.encoding).map_err(|detail| DashboardError::Decode {
        path: path.to_path_buf(),
        detail,
    })?;

    let df = parse_delimited(text, options)?;
    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "Dataset loaded"
    );

    Ok(Dataset::new(df, path.to_path_buf()))
}

/// Decodes raw file bytes. The error is a human readable description of the
/// first offending byte.
pub fn decode(bytes: Vec<u8>, encoding: Encoding) -> std::result::Result<String, String> {
    match encoding {
        Encoding::Latin1 => decode_latin1(&bytes).map_err(|offset| {
            let byte = bytes.get(offset).copied().unwrap_or_default();
            format!("byte 0x{byte:02X} no válido en latin1 (posición {offset})")
        }),
        Encoding::Utf8 => match String::from_utf8(bytes) {
            Ok(text) => Ok(text
                .strip_prefix('\u{feff}')
                .map(str::to_owned)
                .unwrap_or(text)),
            Err(err) => Err(format!(
                "secuencia no válida en utf-8 (posición {})",
                err.utf8_error().valid_up_to()
            )),
        },
    }
}

/// Strict ISO 8859-1: every byte maps to the code point of the same value,
/// except the C1 control range `0x80..=0x9F`, which has no printable
/// character and is reported by offset.
pub fn decode_latin1(bytes: &[u8]) -> std::result::Result<String, usize> {
    if let Some(offset) = bytes.iter().position(|b| (0x80..=0x9F).contains(b)) {
        return Err(offset);
    }
    Ok(bytes.iter().map(|&b| char::from(b)).collect())
}

/// # Errors
///
/// [`DashboardError::Load`] for empty input or rows the CSV reader rejects.
pub fn parse_delimited(text: String, options: &LoadOptions) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(options.infer_schema_rows))
        .with_parse_options(CsvParseOptions::default().with_separator(options.separator))
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|err| DashboardError::Load(err.to_string()))
}
