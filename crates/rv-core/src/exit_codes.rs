//! Exit codes for the rv-core CLI.
//!
//! Exit code ranges:
//! - 0: Success
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

use rv_receipt::ReceiptError;
use rv_report::ReportError;

/// Exit codes for rv-core operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments or configuration
    ArgsError = 10,

    /// The input is not a usable application bundle
    BundleError = 11,

    /// The receipt could not be decoded
    ReceiptError = 12,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::BundleError => "ERR_BUNDLE",
            ExitCode::ReceiptError => "ERR_RECEIPT",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }

    /// Exit code for a failed pipeline run.
    pub fn from_report_error(error: &ReportError) -> Self {
        match error {
            ReportError::Bundle(rv_bundle::BundleError::Io(_)) => ExitCode::IoError,
            ReportError::Bundle(_) => ExitCode::BundleError,
            ReportError::Receipt(ReceiptError::Io(_)) => ExitCode::IoError,
            ReportError::Receipt(_) => ExitCode::ReceiptError,
            ReportError::Io(_) => ExitCode::IoError,
            ReportError::InvalidConfig(_) => ExitCode::ArgsError,
            ReportError::Json(_) => ExitCode::InternalError,
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
