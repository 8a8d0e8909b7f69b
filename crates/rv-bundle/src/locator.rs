//! Bundle locator for `.app` directories.
//!
//! Validates a user-supplied path and resolves the App Store receipt inside it.

use crate::{BundleError, Result, BUNDLE_EXTENSION, RECEIPT_RELATIVE_PATH};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Prefix for report titles derived from a bundle.
pub const REPORT_TITLE_PREFIX: &str = "IAPReceiptViewer";

/// A bundle reference as handed over by the user.
///
/// Drag-and-drop and open-file events deliver URLs, the command line
/// delivers plain paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleInput {
    /// Plain filesystem path.
    Path(PathBuf),
    /// Any URL; only `file` URLs are usable.
    Url(Url),
}

impl BundleInput {
    /// Parse a raw argument. Anything with a `scheme://` prefix is a URL.
    pub fn parse(raw: &str) -> Self {
        if raw.contains("://") {
            if let Ok(url) = Url::parse(raw) {
                return BundleInput::Url(url);
            }
        }
        BundleInput::Path(PathBuf::from(raw))
    }

    /// Resolve to a local path.
    pub fn to_local_path(&self) -> Result<PathBuf> {
        match self {
            BundleInput::Path(path) => Ok(path.clone()),
            BundleInput::Url(url) if url.scheme() == "file" => url
                .to_file_path()
                .map_err(|_| BundleError::NotAFilePath),
            BundleInput::Url(_) => Err(BundleError::NotAFilePath),
        }
    }
}

impl From<PathBuf> for BundleInput {
    fn from(path: PathBuf) -> Self {
        BundleInput::Path(path)
    }
}

impl From<&Path> for BundleInput {
    fn from(path: &Path) -> Self {
        BundleInput::Path(path.to_path_buf())
    }
}

/// A validated application bundle with a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedBundle {
    /// Path of the `.app` directory.
    pub bundle_path: PathBuf,
    /// Path of the receipt file inside the bundle.
    pub receipt_path: PathBuf,
}

impl LocatedBundle {
    /// Title used for the report window and the exported file name.
    pub fn report_title(&self) -> String {
        let name = self
            .bundle_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{}-{}", REPORT_TITLE_PREFIX, name)
    }

    /// Default export file name, `<title>.html`.
    pub fn report_file_name(&self) -> String {
        format!("{}.html", self.report_title())
    }
}

/// Locator for `.app` bundles.
pub struct AppBundle;

impl AppBundle {
    /// Validate `input` and resolve its receipt.
    ///
    /// Checks run in order: local file reference, `.app` extension,
    /// existence, receipt presence.
    pub fn locate(input: impl Into<BundleInput>) -> Result<LocatedBundle> {
        let bundle_path = input.into().to_local_path()?;

        if bundle_path.extension() != Some(OsStr::new(BUNDLE_EXTENSION)) {
            return Err(BundleError::NotAnApplicationBundle);
        }

        if !bundle_path.try_exists()? {
            return Err(BundleError::BundleNotFound);
        }

        let receipt_path = bundle_path.join(RECEIPT_RELATIVE_PATH);
        if !receipt_path.try_exists()? {
            return Err(BundleError::ReceiptNotFound);
        }

        debug!(
            bundle = %bundle_path.display(),
            receipt = %receipt_path.display(),
            "Bundle located"
        );

        Ok(LocatedBundle {
            bundle_path,
            receipt_path,
        })
    }

    /// Convenience wrapper for a raw argument string.
    pub fn locate_str(raw: &str) -> Result<LocatedBundle> {
        Self::locate(BundleInput::parse(raw))
    }
}
