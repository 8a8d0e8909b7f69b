//! Error types for report generation.

use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while producing a report.
///
/// Rendering itself never fails; these come from the steps around it.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Bundle validation failed. Displayed verbatim.
    #[error(transparent)]
    Bundle(#[from] rv_bundle::BundleError),

    /// Receipt decoding failed. Displayed verbatim.
    #[error(transparent)]
    Receipt(#[from] rv_receipt::ReceiptError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
