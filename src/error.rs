//! Error types for the export pipeline.
//!
//! Type-mismatched cell values are not errors: they are dropped from the
//! exported row. Everything here is a real failure that propagates to the
//! caller untouched.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Failure reported by the xlsx encoder.
    #[error("Failed to serialize workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Column configuration that could not be parsed.
    #[error("Invalid column configuration: {0}")]
    ColumnConfig(#[from] serde_json::Error),

    /// Page size outside the allowed list, for callers that want to audit it.
    #[error("Page size {size} is not in available sizes: {available}")]
    InvalidPageSize { size: usize, available: String },
}

pub type Result<T> = std::result::Result<T, ExportError>;
