//! Output adapters for generated records: CSV, JSON, console preview, and file save.

mod preview;

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::generator::Record;

pub use preview::{preview_table, DEFAULT_PREVIEW_ROWS};

/// Default output file for the `generate` command.
pub const DEFAULT_OUTPUT_PATH: &str = "Acme_Synthetic_Dataset.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }

    /// `.json` paths are JSON; everything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected csv or json)")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unable to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Write a header row and one row per record.
pub fn write_csv<W: Write>(writer: W, records: &[Record]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if records.is_empty() {
        csv_writer.write_record(crate::generator::COLUMNS)?;
    }
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn to_csv_string(records: &[Record]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records)?;
    // csv only emits the UTF-8 it was given.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Pretty JSON array of row objects keyed by column name.
pub fn to_json(records: &[Record]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn render(records: &[Record], format: OutputFormat) -> Result<String, ExportError> {
    match format {
        OutputFormat::Csv => to_csv_string(records),
        OutputFormat::Json => to_json(records),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

/// Serialize fully in memory, write a sibling temp file, then rename over `path`.
/// A failure leaves `path` untouched.
pub fn save_dataset(
    path: impl AsRef<Path>,
    records: &[Record],
    format: OutputFormat,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let payload = render(records, format)?;
    let temp = temp_path_for(path);
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Err(source) = fs::write(&temp, payload) {
        let _ = fs::remove_file(&temp);
        return Err(io_err(source));
    }
    if let Err(source) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(io_err(source));
    }
    tracing::info!(path = %path.display(), rows = records.len(), format = %format, "saved dataset");
    Ok(())
}
