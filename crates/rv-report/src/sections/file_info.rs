//! File information section.

use super::table::{CellValue, TableRow};
use rv_bundle::LocatedBundle;

/// Rows for the bundle and receipt locations.
pub fn file_info_rows(bundle: &LocatedBundle) -> Vec<(&'static str, String)> {
    vec![
        ("App path", bundle.bundle_path.display().to_string()),
        ("Receipt path", bundle.receipt_path.display().to_string()),
    ]
}

/// Borrow owned row data as table rows.
pub(crate) fn as_table_rows<'a>(rows: &'a [(&'static str, String)]) -> Vec<TableRow<'a>> {
    rows.iter()
        .map(|(title, value)| TableRow::new(title, CellValue::Text(value)))
        .collect()
}
