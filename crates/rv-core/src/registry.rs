//! Bookkeeping for reports currently shown to the user.
//!
//! Every report handed to a viewer is registered here and stays until it
//! is closed. Nothing is removed implicitly.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Handle for a registered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ReportId(u64);

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "report-{}", self.0)
    }
}

/// A report that is currently shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenReport {
    pub id: ReportId,
    pub title: String,
    pub path: PathBuf,
}

/// Collection of shown reports, in registration order.
#[derive(Debug, Default)]
pub struct ReportRegistry {
    reports: Vec<OpenReport>,
    next_id: u64,
}

impl ReportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly shown report.
    pub fn register(&mut self, title: impl Into<String>, path: impl AsRef<Path>) -> ReportId {
        let id = ReportId(self.next_id);
        self.next_id += 1;
        let report = OpenReport {
            id,
            title: title.into(),
            path: path.as_ref().to_path_buf(),
        };
        debug!(%id, title = %report.title, "Report registered");
        self.reports.push(report);
        id
    }

    /// Stop tracking a report. Returns `None` if it was not registered.
    pub fn close(&mut self, id: ReportId) -> Option<OpenReport> {
        let index = self.reports.iter().position(|r| r.id == id)?;
        debug!(%id, "Report closed");
        Some(self.reports.remove(index))
    }

    pub fn get(&self, id: ReportId) -> Option<&OpenReport> {
        self.reports.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OpenReport> {
        self.reports.iter()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
