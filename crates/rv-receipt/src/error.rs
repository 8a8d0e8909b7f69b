//! Error types for receipt decoding.

use thiserror::Error;

/// Errors that can occur while decoding a receipt.
#[derive(Error, Debug)]
pub enum ReceiptError {
    /// The receipt could not be read or decoded. The message is shown as-is.
    #[error("{0}")]
    ReceiptUnreadable(String),

    /// Malformed DER, as reported by the `der` crate.
    #[error("malformed receipt encoding: {0}")]
    Encoding(#[from] der::Error),

    /// The container is not the expected signed-data structure.
    #[error("unsupported receipt container: {0}")]
    Container(String),

    /// A known attribute carries a value of the wrong shape.
    #[error("invalid receipt attribute {field}: {reason}")]
    Attribute { field: i64, reason: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReceiptError {
    pub(crate) fn attribute(field: i64, reason: impl Into<String>) -> Self {
        ReceiptError::Attribute {
            field,
            reason: reason.into(),
        }
    }

    /// Fold any failure into the single user-facing variant.
    pub fn into_unreadable(self) -> Self {
        match self {
            ReceiptError::ReceiptUnreadable(_) => self,
            other => ReceiptError::ReceiptUnreadable(other.to_string()),
        }
    }
}

/// Result type alias for receipt operations.
pub type Result<T> = std::result::Result<T, ReceiptError>;
