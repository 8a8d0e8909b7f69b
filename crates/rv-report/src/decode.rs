//! Bundle-to-receipt pipeline.

use crate::error::Result;
use rv_bundle::{AppBundle, BundleInput, LocatedBundle};
use rv_receipt::{decode_file, ReceiptDecoder, ReceiptRecord};
use serde::Serialize;
use tracing::debug;

/// A located bundle together with its decoded receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeResult {
    /// Where the bundle and its receipt live.
    #[serde(flatten)]
    pub bundle: LocatedBundle,
    /// Decoded receipt contents.
    pub receipt: ReceiptRecord,
}

impl DecodeResult {
    /// Report title derived from the bundle name.
    pub fn title(&self) -> String {
        self.bundle.report_title()
    }
}

/// Validate a bundle and decode its receipt.
///
/// Bundle errors come first; a receipt that cannot be decoded yields
/// [`rv_receipt::ReceiptError::ReceiptUnreadable`]. Nothing is partial.
pub fn decode_bundle<D>(input: impl Into<BundleInput>, decoder: &D) -> Result<DecodeResult>
where
    D: ReceiptDecoder + ?Sized,
{
    let bundle = AppBundle::locate(input)?;
    let receipt = decode_file(decoder, &bundle.receipt_path)?;
    debug!(
        bundle = %bundle.bundle_path.display(),
        purchases = receipt.purchases.len(),
        "Bundle decoded"
    );
    Ok(DecodeResult { bundle, receipt })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use rv_bundle::BundleError;
    use rv_receipt::{ContainerDecoder, ReceiptError};
    use std::fs;
    use std::path::Path;

    fn make_bundle(dir: &Path, name: &str, receipt: Option<&[u8]>) -> std::path::PathBuf {
        let bundle = dir.join(name);
        fs::create_dir_all(bundle.join("Contents")).unwrap();
        if let Some(bytes) = receipt {
            let receipt_dir = bundle.join("Contents/_MASReceipt");
            fs::create_dir_all(&receipt_dir).unwrap();
            fs::write(receipt_dir.join("receipt"), bytes).unwrap();
        }
        bundle
    }

    #[test]
    fn test_decode_bundle_with_closure_decoder() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = make_bundle(dir.path(), "Demo.app", Some(b"anything"));
        let decoder = |_: &[u8]| -> rv_receipt::Result<ReceiptRecord> {
            Ok(ReceiptRecord {
                bundle_identifier: "com.example.app".to_string(),
                hash: vec![1, 2, 3],
                ..Default::default()
            })
        };

        let result = decode_bundle(bundle.as_path(), &decoder).unwrap();
        assert_eq!(result.receipt.bundle_identifier, "com.example.app");
        assert_eq!(result.title(), "IAPReceiptViewer-Demo.app");
    }

    #[test]
    fn test_missing_receipt_is_bundle_error() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = make_bundle(dir.path(), "Bare.app", None);
        let err = decode_bundle(bundle.as_path(), &ContainerDecoder::new()).unwrap_err();
        assert!(matches!(
            err,
            ReportError::Bundle(BundleError::ReceiptNotFound)
        ));
        assert_eq!(err.to_string(), "Specified app doesn't include a receipt.");
    }

    #[test]
    fn test_garbage_receipt_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = make_bundle(dir.path(), "Broken.app", Some(b"not a receipt"));
        let err = decode_bundle(bundle.as_path(), &ContainerDecoder::new()).unwrap_err();
        assert!(matches!(
            err,
            ReportError::Receipt(ReceiptError::ReceiptUnreadable(_))
        ));
    }
}
