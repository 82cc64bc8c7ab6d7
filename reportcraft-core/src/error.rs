//! Pipeline error taxonomy

use thiserror::Error;

/// Fatal pipeline failures. Every message names the stage it came from so
/// callers can surface it verbatim.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The uploaded bytes could not be decoded as any supported format.
    #[error("cannot read '{name}': {reason}")]
    FileFormat { name: String, reason: String },

    /// The source workbook holds no recognizable hourly data table.
    #[error("no data table found in source: {0}")]
    DataNotFound(String),

    /// The configured monitoring-point marker is absent from the template.
    #[error("marker '{marker}' not found in any template sheet")]
    TemplateMismatch { marker: String },

    /// Report rows failed to serialize as delimited text.
    #[error("failed to serialize report: {0}")]
    ReportSerialize(#[from] csv::Error),

    /// Archive assembly failed.
    #[error("failed to write archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}
