use thiserror::Error;

/// Errors surfaced by report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// No stored record exists for the requested inspection.
    #[error("Inspection record not found: {0}")]
    RecordNotFound(String),

    /// Month outside 1..=12 in a monthly report request.
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    /// A record that must be written or rendered is missing required data.
    #[error("Invalid inspection record: {0}")]
    InvalidRecord(String),

    /// A stored record file exists but cannot be parsed.
    #[error("Malformed inspection record at {path}: {reason}")]
    MalformedRecord { path: String, reason: String },

    /// PDF assembly failed.
    #[error("Report rendering failed: {0}")]
    Render(String),

    #[error("Report I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal report error: {0}")]
    Internal(String),
}
