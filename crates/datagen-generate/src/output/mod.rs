use std::path::Path;

use serde::{Deserialize, Serialize};

use datagen_core::Record;

use crate::errors::GenerationError;
use crate::session::Session;

pub mod csv;
pub mod json;
pub mod markdown;

/// Serialized forms a batch can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, GenerationError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::parse(&extension)
            .ok_or_else(|| GenerationError::UnsupportedFormat(path.display().to_string()))
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Serialize records. Tabular formats use the union of labels as columns.
pub fn export_records(records: &[Record], format: ExportFormat) -> Result<Vec<u8>, GenerationError> {
    match format {
        ExportFormat::Csv => csv::records_to_csv(records),
        ExportFormat::Json => json::records_to_json(records),
        ExportFormat::Markdown => Ok(markdown::records_to_markdown(records)),
    }
}

/// Serialize the session batch, or fail with `EmptySession`.
pub fn export_session(session: &Session, format: ExportFormat) -> Result<Vec<u8>, GenerationError> {
    let batch = session.batch().ok_or(GenerationError::EmptySession)?;
    export_records(&batch.records, format)
}
