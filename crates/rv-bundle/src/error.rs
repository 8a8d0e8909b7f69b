//! Error types for bundle location.

use thiserror::Error;

/// Errors that can occur while locating an application bundle.
///
/// The display strings are the messages shown to the user verbatim.
#[derive(Error, Debug)]
pub enum BundleError {
    /// The input is not a local file reference.
    #[error("Specified URL is not a file path.")]
    NotAFilePath,

    /// The path does not carry the `.app` extension.
    #[error("Specified file is not an app.")]
    NotAnApplicationBundle,

    /// Nothing exists at the path.
    #[error("Specified file doesn't exist.")]
    BundleNotFound,

    /// The bundle has no `Contents/_MASReceipt/receipt`.
    #[error("Specified app doesn't include a receipt.")]
    ReceiptNotFound,

    /// I/O error while inspecting the bundle
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for bundle operations.
pub type Result<T> = std::result::Result<T, BundleError>;
