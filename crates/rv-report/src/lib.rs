//! HTML report generator for App Store receipts.
//!
//! Takes a decoded receipt together with the bundle it came from and renders
//! a standalone HTML document: a file information table, the receipt's
//! top-level fields and one table per in-app purchase.
//!
//! # Features
//!
//! - **Single-file output**: inline CSS and script, no external assets
//! - **Light/dark**: follows `prefers-color-scheme` unless a theme is forced
//! - **Long values**: cells over 100 characters collapse behind a toggle
//! - **Deterministic**: equal inputs and an equal `now` give identical HTML
//!
//! # Example
//!
//! ```no_run
//! use rv_receipt::ContainerDecoder;
//! use rv_report::ReportGenerator;
//! use std::path::Path;
//!
//! let generator = ReportGenerator::default_config();
//! let report = generator
//!     .generate_from_bundle(Path::new("/Applications/Demo.app"), &ContainerDecoder::new())
//!     .unwrap();
//! std::fs::write(report.file_name(), report.html).unwrap();
//! ```

pub mod config;
pub mod decode;
pub mod error;
pub mod generator;
pub mod sections;

pub use config::{ReportConfig, ReportTheme};
pub use decode::{decode_bundle, DecodeResult};
pub use error::{ReportError, Result};
pub use generator::{RenderedReport, ReportGenerator};
