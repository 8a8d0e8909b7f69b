//! Showing generated reports to the user.

use std::io;
use std::path::Path;
use tracing::debug;

/// Something that can present a report file.
pub trait ReportViewer {
    fn show(&self, path: &Path) -> io::Result<()>;
}

/// Opens files with the platform's default application.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

impl ReportViewer for SystemViewer {
    fn show(&self, path: &Path) -> io::Result<()> {
        debug!(path = %path.display(), "Opening report in system viewer");
        open::that(path)
    }
}
