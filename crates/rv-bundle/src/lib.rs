//! Application bundle locator for the receipt viewer.
//!
//! Turns a user-supplied path (or `file://` URL) into a validated `.app`
//! bundle and the path of the App Store receipt it carries.
//!
//! # Bundle Layout
//!
//! ```text
//! Example.app/
//!   Contents/
//!     _MASReceipt/
//!       receipt
//! ```
//!
//! # Example
//!
//! ```no_run
//! use rv_bundle::AppBundle;
//! use std::path::Path;
//!
//! let located = AppBundle::locate(Path::new("/Applications/Example.app")).unwrap();
//! println!("{}", located.receipt_path.display());
//! ```

pub mod error;
pub mod locator;

pub use error::{BundleError, Result};
pub use locator::{AppBundle, BundleInput, LocatedBundle, REPORT_TITLE_PREFIX};

/// Extension every application bundle carries.
pub const BUNDLE_EXTENSION: &str = "app";

/// Receipt location relative to the bundle root.
pub const RECEIPT_RELATIVE_PATH: &str = "Contents/_MASReceipt/receipt";
