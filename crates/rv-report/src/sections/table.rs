//! Title/value tables.

use chrono::{DateTime, Utc};

/// Shown wherever a value is absent.
pub const NONE_HTML: &str = r#"<p style="color:#888888;">(none)</p>"#;

/// Values longer than this many characters are collapsed.
pub const EXPANDABLE_THRESHOLD: usize = 100;

/// Fixed date format, always in UTC.
pub const DATE_FORMAT: &str = "%B %-d, %Y at %-I:%M:%S %p UTC";

/// A table cell value. Each variant has exactly one textual form.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    OptionalText(Option<&'a str>),
    Date(DateTime<Utc>),
    OptionalDate(Option<DateTime<Utc>>),
    Bytes(&'a [u8]),
    Bool(bool),
    Integer(i64),
    OptionalInteger(Option<i64>),
}

impl CellValue<'_> {
    /// Text of the value, or `None` when the placeholder should be shown.
    pub fn text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some((*s).to_string()),
            CellValue::OptionalText(s) => s.map(str::to_string),
            CellValue::Date(d) => Some(format_date(d)),
            CellValue::OptionalDate(d) => d.as_ref().map(format_date),
            CellValue::Bytes(b) => Some(format!("{:?}", b)),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Integer(i) => Some(i.to_string()),
            CellValue::OptionalInteger(i) => i.map(|i| i.to_string()),
        }
    }
}

/// Format a timestamp with [`DATE_FORMAT`].
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// One row of a title/value table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow<'a> {
    pub title: &'a str,
    pub value: CellValue<'a>,
}

impl<'a> TableRow<'a> {
    pub fn new(title: &'a str, value: CellValue<'a>) -> Self {
        Self { title, value }
    }

    fn render(&self) -> String {
        let content = match self.value.text() {
            Some(text) => cell_html(&text),
            None => NONE_HTML.to_string(),
        };
        format!(
            r#"<tr><td class="sectitle">{}</td><td>{}</td></tr>"#,
            html_escape(self.title),
            content
        )
    }
}

/// Escaped cell content, collapsed when longer than the threshold.
pub fn cell_html(text: &str) -> String {
    if text.chars().count() > EXPANDABLE_THRESHOLD {
        format!(
            r#"<div class="expandable-text">{}</div><p class="show-more" onclick="toggleText(this)">Show more</p>"#,
            html_escape(text)
        )
    } else {
        html_escape(text)
    }
}

/// Render rows as `<table><tbody>…</tbody></table>`.
pub fn render_table(rows: &[TableRow<'_>]) -> String {
    let body: String = rows.iter().map(TableRow::render).collect();
    format!("<table><tbody>{}</tbody></table>", body)
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
