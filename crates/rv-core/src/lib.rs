//! Receipt Viewer Core Library
//!
//! This library provides the command-line side of the receipt viewer:
//! - Exit codes for CLI operations
//! - Report configuration resolution
//! - Logging setup
//! - Writing reports and handing them to a viewer
//! - Tracking reports that are currently shown
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod exit_codes;
pub mod export;
pub mod logging;
pub mod output;
pub mod registry;
pub mod viewer;
