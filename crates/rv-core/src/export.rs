//! Writing rendered reports to disk.

use rv_bundle::BundleInput;
use rv_receipt::ReceiptDecoder;
use rv_report::{RenderedReport, ReportError, ReportGenerator, Result};
use serde::Serialize;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where a report file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// `<dir>/<title>.html`
    Dir(PathBuf),
    /// Exactly this file.
    File(PathBuf),
}

impl OutputTarget {
    /// Report path; a directory target only accepts a plain file name.
    pub fn path_for(&self, report: &RenderedReport) -> Result<PathBuf> {
        match self {
            OutputTarget::Dir(dir) => {
                let name = report.file_name();
                if Path::new(&name).file_name() != Some(OsStr::new(&name)) {
                    return Err(ReportError::InvalidConfig(format!(
                        "report title {:?} is not a file name",
                        report.title
                    )));
                }
                Ok(dir.join(name))
            }
            OutputTarget::File(path) => Ok(path.clone()),
        }
    }
}

/// The user's downloads directory, or the working directory without one.
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// A report written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedReport {
    pub title: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Run the full pipeline for one bundle and write the report.
pub fn export_report<D>(
    generator: &ReportGenerator,
    decoder: &D,
    input: impl Into<BundleInput>,
    target: &OutputTarget,
) -> Result<ExportedReport>
where
    D: ReceiptDecoder + ?Sized,
{
    let report = generator.generate_from_bundle(input, decoder)?;
    let path = target.path_for(&report)?;
    write_report(&path, &report.html)?;
    info!(path = %path.display(), bytes = report.html.len(), "Report written");
    Ok(ExportedReport {
        title: report.title,
        bytes: report.html.len(),
        path,
    })
}

fn write_report(path: &Path, html: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rv_receipt::testing::ReceiptBuilder;
    use rv_receipt::ContainerDecoder;
    use rv_report::ReportError;
    use tempfile::TempDir;

    fn bundle_with_receipt(dir: &Path, name: &str) -> PathBuf {
        let bundle = dir.join(name);
        let receipt_dir = bundle.join("Contents/_MASReceipt");
        fs::create_dir_all(&receipt_dir).unwrap();
        let receipt = ReceiptBuilder::new()
            .bundle_identifier("com.example.app")
            .build();
        fs::write(receipt_dir.join("receipt"), receipt).unwrap();
        bundle
    }

    #[test]
    fn test_export_into_directory() {
        let tmp = TempDir::new().unwrap();
        let bundle = bundle_with_receipt(tmp.path(), "Demo.app");
        let out = tmp.path().join("out");

        let exported = export_report(
            &ReportGenerator::default_config(),
            &ContainerDecoder::new(),
            bundle.as_path(),
            &OutputTarget::Dir(out.clone()),
        )
        .unwrap();

        assert_eq!(exported.path, out.join("IAPReceiptViewer-Demo.app.html"));
        let html = fs::read_to_string(&exported.path).unwrap();
        assert_eq!(html.len(), exported.bytes);
        assert!(html.contains("com.example.app"));
    }

    #[test]
    fn test_export_to_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let bundle = bundle_with_receipt(tmp.path(), "Demo.app");
        let file = tmp.path().join("custom.html");

        let exported = export_report(
            &ReportGenerator::default_config(),
            &ContainerDecoder::new(),
            bundle.as_path(),
            &OutputTarget::File(file.clone()),
        )
        .unwrap();

        assert_eq!(exported.path, file);
        assert!(file.exists());
    }

    #[test]
    fn test_title_cannot_escape_output_dir() {
        let tmp = TempDir::new().unwrap();
        let bundle = bundle_with_receipt(tmp.path(), "Demo.app");
        let out = tmp.path().join("out");
        let config = rv_report::ReportConfig::new().with_title("../escaped");

        let err = export_report(
            &ReportGenerator::new(config),
            &ContainerDecoder::new(),
            bundle.as_path(),
            &OutputTarget::Dir(out.clone()),
        )
        .unwrap_err();

        assert!(matches!(err, ReportError::InvalidConfig(_)));
        assert!(!tmp.path().join("escaped.html").exists());
        assert!(!out.exists());
    }

    #[test]
    fn test_failed_pipeline_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let err = export_report(
            &ReportGenerator::default_config(),
            &ContainerDecoder::new(),
            tmp.path().join("Missing.app").as_path(),
            &OutputTarget::Dir(out.clone()),
        )
        .unwrap_err();

        assert!(matches!(err, ReportError::Bundle(_)));
        assert!(!out.exists());
    }
}
