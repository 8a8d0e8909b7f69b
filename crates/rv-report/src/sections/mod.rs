//! Report section builders.

pub mod file_info;
pub mod receipt;
pub mod table;

pub use file_info::file_info_rows;
pub use receipt::{purchase_rows, receipt_rows, ACTIVE_SUBSCRIPTION_TITLE};
pub use table::{
    cell_html, format_date, html_escape, render_table, CellValue, TableRow, DATE_FORMAT,
    EXPANDABLE_THRESHOLD, NONE_HTML,
};
