//! HTML report invariant tests.
//!
//! These tests validate the generated HTML structure without requiring a browser:
//! - Required top-level sections present
//! - Field rows appear in a fixed order
//! - Long values collapse, short ones do not
//! - Output is deterministic for a fixed `now`

use chrono::{DateTime, Duration, TimeZone, Utc};
use regex::Regex;
use rv_bundle::LocatedBundle;
use rv_receipt::testing::{PurchaseBuilder, ReceiptBuilder};
use rv_receipt::{ContainerDecoder, PurchaseRecord, ReceiptRecord};
use rv_report::config::{ReportConfig, ReportTheme};
use rv_report::decode::DecodeResult;
use rv_report::generator::ReportGenerator;
use rv_report::sections::NONE_HTML;
use std::fs;
use std::path::{Path, PathBuf};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn located(name: &str) -> LocatedBundle {
    let bundle_path = PathBuf::from(format!("/Applications/{}", name));
    LocatedBundle {
        receipt_path: bundle_path.join("Contents/_MASReceipt/receipt"),
        bundle_path,
    }
}

fn result_with(receipt: ReceiptRecord) -> DecodeResult {
    DecodeResult {
        bundle: located("Demo.app"),
        receipt,
    }
}

fn render(receipt: ReceiptRecord) -> String {
    ReportGenerator::default_config().generate_at(&result_with(receipt), fixed_now())
}

fn row(title: &str, content: &str) -> String {
    format!(
        r#"<tr><td class="sectitle">{}</td><td>{}</td></tr>"#,
        title, content
    )
}

fn write_bundle(dir: &Path, name: &str, receipt: &[u8]) -> PathBuf {
    let bundle = dir.join(name);
    let receipt_dir = bundle.join("Contents/_MASReceipt");
    fs::create_dir_all(&receipt_dir).unwrap();
    fs::write(receipt_dir.join("receipt"), receipt).unwrap();
    bundle
}

// ============================================================================
// HTML Structure Tests
// ============================================================================

#[test]
fn test_html_has_doctype() {
    let html = render(ReceiptRecord::default());
    assert!(html.starts_with("<!DOCTYPE html>"));
}

#[test]
fn test_html_has_charset_and_inline_assets() {
    let html = render(ReceiptRecord::default());
    assert!(html.contains(r#"<meta charset="UTF-8">"#));
    assert!(html.contains("<style>"));
    assert!(html.contains("prefers-color-scheme: dark"));
    assert!(html.contains("function toggleText"));
}

#[test]
fn test_no_external_urls() {
    let html = render(ReceiptRecord::default());
    let external = Regex::new(r#"(src|href)="https?://"#).unwrap();
    assert!(!external.is_match(&html), "report must be standalone");
}

#[test]
fn test_required_sections_present() {
    let html = render(ReceiptRecord::default());
    assert!(html.contains("<h2>File Information</h2>"));
    assert!(html.contains("<h2>Data in Receipt</h2>"));
    assert!(html.contains(&row("App path", "/Applications/Demo.app")));
    assert!(html.contains(&row(
        "Receipt path",
        "/Applications/Demo.app/Contents/_MASReceipt/receipt"
    )));
}

#[test]
fn test_minimal_receipt_example() {
    let html = render(ReceiptRecord {
        bundle_identifier: "com.example.app".to_string(),
        hash: vec![1, 2, 3],
        ..Default::default()
    });

    assert!(html.contains(&row("bundleIdentifier", "com.example.app")));
    assert!(html.contains(&row("hash", "[1, 2, 3]")));
    assert!(html.contains(&format!("In-App Purchases (0 items)</h3>{}", NONE_HTML)));
}

#[test]
fn test_receipt_rows_in_order() {
    let html = render(ReceiptRecord::default());
    let title = Regex::new(r#"<td class="sectitle">([^<]+)</td>"#).unwrap();
    let titles: Vec<&str> = title
        .captures_iter(&html)
        .map(|c| c.get(1).unwrap().as_str())
        .collect();

    assert_eq!(
        titles,
        [
            "App path",
            "Receipt path",
            "bundleIdentifier",
            "appVersion",
            "originalAppVersion",
            "creationDate",
            "expirationDate",
            "opaqueValue",
            "hash",
            "ageRating",
            "base64",
        ]
    );
}

#[test]
fn test_absent_dates_use_placeholder() {
    let html = render(ReceiptRecord::default());
    assert!(html.contains(&row("creationDate", NONE_HTML)));
    assert!(html.contains(&row("expirationDate", NONE_HTML)));
}

#[test]
fn test_dates_use_fixed_format() {
    let html = render(ReceiptRecord {
        creation_date: Some(Utc.with_ymd_and_hms(2021, 1, 7, 15, 4, 5).unwrap()),
        ..Default::default()
    });
    assert!(html.contains(&row("creationDate", "January 7, 2021 at 3:04:05 PM UTC")));
}

// ============================================================================
// Long value tests
// ============================================================================

#[test]
fn test_value_of_exactly_100_chars_is_plain() {
    let html = render(ReceiptRecord {
        age_rating: "a".repeat(100),
        ..Default::default()
    });
    assert!(html.contains(&row("ageRating", &"a".repeat(100))));
    assert!(!html.contains(r#"<div class="expandable-text">"#));
}

#[test]
fn test_value_of_101_chars_is_expandable() {
    let html = render(ReceiptRecord {
        age_rating: "a".repeat(101),
        ..Default::default()
    });
    let expected = format!(
        r#"<div class="expandable-text">{}</div><p class="show-more" onclick="toggleText(this)">Show more</p>"#,
        "a".repeat(101)
    );
    assert!(html.contains(&row("ageRating", &expected)));
}

#[test]
fn test_values_are_escaped() {
    let html = render(ReceiptRecord {
        bundle_identifier: "<script>alert(1)</script>".to_string(),
        ..Default::default()
    });
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

// ============================================================================
// Purchase tests
// ============================================================================

#[test]
fn test_purchase_rows_and_heading() {
    let mut purchase = PurchaseRecord::new("com.example.coins", "1000", fixed_now());
    purchase.quantity = 5;
    let html = render(ReceiptRecord {
        purchases: vec![purchase],
        ..Default::default()
    });

    assert!(html.contains("In-App Purchases (1 items)"));
    assert!(html.contains(&row("quantity", "5")));
    assert!(html.contains(&row("productIdentifier", "com.example.coins")));
    assert!(html.contains(&row("promotionalOfferIdentifier", NONE_HTML)));
    assert!(html.contains(&row("productType", "unknown")));
    assert!(!html.contains("Is Active Auto Renewable Subscription"));
}

#[test]
fn test_active_subscription_row() {
    let mut active = PurchaseRecord::new("com.example.monthly", "1", fixed_now() - Duration::days(1));
    active.subscription_expiration_date = Some(fixed_now() + Duration::days(29));
    let mut lapsed = PurchaseRecord::new("com.example.monthly", "2", fixed_now() - Duration::days(60));
    lapsed.subscription_expiration_date = Some(fixed_now() - Duration::days(30));

    let html = render(ReceiptRecord {
        purchases: vec![active, lapsed],
        ..Default::default()
    });

    assert!(html.contains(&row("Is Active Auto Renewable Subscription", "true")));
    assert!(html.contains(&row("Is Active Auto Renewable Subscription", "false")));
    assert_eq!(html.matches("<hr>").count(), 1);
}

// ============================================================================
// Configuration tests
// ============================================================================

#[test]
fn test_deterministic_for_fixed_now() {
    let receipt = ReceiptRecord {
        bundle_identifier: "com.example.app".to_string(),
        purchases: vec![PurchaseRecord::new("p", "1", fixed_now())],
        ..Default::default()
    };
    let first = render(receipt.clone());
    let second = render(receipt);
    assert_eq!(first, second);
}

#[test]
fn test_forced_theme_class() {
    let generator = ReportGenerator::new(ReportConfig::new().with_theme(ReportTheme::Light));
    let html = generator.generate_at(&result_with(ReceiptRecord::default()), fixed_now());
    assert!(html.contains(r#"<html lang="en" class="light">"#));
}

#[test]
fn test_minified_output_is_smaller() {
    let result = result_with(ReceiptRecord {
        bundle_identifier: "com.example.app".to_string(),
        ..Default::default()
    });
    let plain = ReportGenerator::default_config().generate_at(&result, fixed_now());
    let minified = ReportGenerator::new(ReportConfig::new().with_minify(true))
        .generate_at(&result, fixed_now());

    assert!(minified.len() < plain.len());
    assert!(minified.contains("com.example.app"));
}

// ============================================================================
// Bundle pipeline tests
// ============================================================================

#[test]
fn test_report_from_bundle_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let receipt = ReceiptBuilder::new()
        .bundle_identifier("com.example.notes")
        .app_version("2.1")
        .original_app_version("1.0")
        .creation_date("2024-03-01T10:00:00Z")
        .hash(&[9, 8, 7])
        .purchase(
            PurchaseBuilder::new("com.example.notes.pro", "42", "2024-03-02T11:00:00Z")
                .product_type(0),
        )
        .build();
    let bundle = write_bundle(dir.path(), "Notes.app", &receipt);

    let report = ReportGenerator::default_config()
        .generate_from_bundle(bundle.as_path(), &ContainerDecoder::new())
        .unwrap();

    assert_eq!(report.title, "IAPReceiptViewer-Notes.app");
    assert_eq!(report.file_name(), "IAPReceiptViewer-Notes.app.html");
    assert!(report.html.contains(&row("bundleIdentifier", "com.example.notes")));
    assert!(report.html.contains(&row("hash", "[9, 8, 7]")));
    assert!(report.html.contains(&row("productType", "nonConsumable")));
    assert!(report
        .html
        .contains(&row("purchaseDate", "March 2, 2024 at 11:00:00 AM UTC")));
    assert!(report.html.contains("In-App Purchases (1 items)"));
}

#[test]
fn test_unreadable_receipt_yields_no_report() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = write_bundle(dir.path(), "Broken.app", b"\x00\x01garbage");

    let err = ReportGenerator::default_config()
        .generate_from_bundle(bundle.as_path(), &ContainerDecoder::new())
        .unwrap_err();

    assert!(matches!(
        err,
        rv_report::ReportError::Receipt(rv_receipt::ReceiptError::ReceiptUnreadable(_))
    ));
}
