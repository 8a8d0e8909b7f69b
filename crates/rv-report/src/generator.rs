//! Report generator implementation.

use crate::config::ReportConfig;
use crate::decode::{decode_bundle, DecodeResult};
use crate::error::Result;
use crate::sections::file_info::as_table_rows;
use crate::sections::*;

use chrono::{DateTime, Utc};
use rv_bundle::BundleInput;
use rv_receipt::{ReceiptDecoder, ReceiptRecord};
use serde::Serialize;
use tracing::{debug, info};

/// A rendered report and the title it should be shown under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedReport {
    /// Window title and export file stem.
    pub title: String,
    /// Complete HTML document.
    pub html: String,
}

impl RenderedReport {
    /// Default export file name, `<title>.html`.
    pub fn file_name(&self) -> String {
        format!("{}.html", self.title)
    }
}

/// Report generator.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a new report generator with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Title for `result`, honoring a configured override.
    pub fn title_for(&self, result: &DecodeResult) -> String {
        self.config.title.clone().unwrap_or_else(|| result.title())
    }

    /// Render a report, evaluating subscription activity against the
    /// current time.
    pub fn generate(&self, result: &DecodeResult) -> String {
        self.generate_at(result, Utc::now())
    }

    /// Render a report with subscription activity evaluated at `now`.
    ///
    /// Equal inputs and equal `now` produce identical output.
    pub fn generate_at(&self, result: &DecodeResult, now: DateTime<Utc>) -> String {
        let title = self.title_for(result);
        let html = self.generate_html(&title, result, now);

        let output = if self.config.minify {
            let cfg = minify_html::Cfg {
                minify_js: true,
                minify_css: true,
                ..Default::default()
            };
            String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
        } else {
            html
        };

        info!(
            bytes = output.len(),
            title = %title,
            purchases = result.receipt.purchases.len(),
            "Report generated"
        );

        output
    }

    /// Validate a bundle, decode its receipt and render the report.
    pub fn generate_from_bundle<D>(
        &self,
        input: impl Into<BundleInput>,
        decoder: &D,
    ) -> Result<RenderedReport>
    where
        D: ReceiptDecoder + ?Sized,
    {
        debug!("Generating report from bundle");
        let result = decode_bundle(input, decoder)?;
        Ok(RenderedReport {
            title: self.title_for(&result),
            html: self.generate(&result),
        })
    }

    fn generate_html(&self, title: &str, result: &DecodeResult, now: DateTime<Utc>) -> String {
        let theme_class = self.config.theme.css_class();
        let collapsed_width = self.config.collapsed_width_px;
        let file_rows = file_info_rows(&result.bundle);
        let file_table = render_table(&as_table_rows(&file_rows));
        let receipt_table = render_table(&receipt_rows(&result.receipt));
        let purchases = self.generate_purchases(&result.receipt, now);

        format!(
            r##"<!DOCTYPE html>
<html lang="en" class="{theme_class}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="generator" content="rv-report {version}">
    <meta name="robots" content="noindex, nofollow">
    <style>
        :root {{
            --bg-primary: #ffffff;
            --bg-secondary: #f5f5f7;
            --text-primary: #1d1d1f;
            --text-secondary: #6e6e73;
            --border-color: #d2d2d7;
            --accent-color: #0071e3;
        }}
        .dark {{
            --bg-primary: #1d1d1f;
            --bg-secondary: #2c2c2e;
            --text-primary: #f5f5f7;
            --text-secondary: #a1a1a6;
            --border-color: #424245;
            --accent-color: #2997ff;
        }}
        @media (prefers-color-scheme: dark) {{
            :root:not(.light) {{
                --bg-primary: #1d1d1f;
                --bg-secondary: #2c2c2e;
                --text-primary: #f5f5f7;
                --text-secondary: #a1a1a6;
                --border-color: #424245;
                --accent-color: #2997ff;
            }}
        }}
        body {{
            background-color: var(--bg-primary);
            color: var(--text-primary);
            font-family: ui-sans-serif, system-ui, -apple-system, sans-serif;
            line-height: 1.5;
            margin: 0 auto;
            max-width: 72rem;
            padding: 2rem 1rem;
        }}
        h1, h2, h3 {{
            font-weight: 600;
        }}
        table {{
            border-collapse: collapse;
            width: 100%;
            margin-bottom: 1rem;
            table-layout: fixed;
        }}
        td {{
            border: 1px solid var(--border-color);
            padding: 0.375rem 0.75rem;
            vertical-align: top;
            word-break: break-all;
        }}
        td.sectitle {{
            background-color: var(--bg-secondary);
            color: var(--text-secondary);
            width: 18rem;
            word-break: normal;
        }}
        hr {{
            border: none;
            border-top: 1px solid var(--border-color);
            margin: 1.5rem 0;
        }}
        .expandable-text {{
            max-width: {collapsed_width}px;
            white-space: nowrap;
            overflow: hidden;
            text-overflow: ellipsis;
        }}
        .expandable-text.expanded {{
            max-width: none;
            white-space: normal;
        }}
        .show-more {{
            color: var(--accent-color);
            cursor: pointer;
            margin: 0.25rem 0 0;
        }}
        @media print {{
            .show-more {{ display: none !important; }}
            .expandable-text {{ max-width: none; white-space: normal; }}
        }}
    </style>
</head>
<body>
    <header>
        <h1>{title}</h1>
    </header>
    <main>
        <section id="file-information">
            <h2>File Information</h2>
            {file_table}
        </section>
        <section id="receipt">
            <h2>Data in Receipt</h2>
            {receipt_table}
            {purchases}
        </section>
    </main>
    <script>
        function toggleText(toggle) {{
            const text = toggle.previousElementSibling;
            const expanded = text.classList.toggle('expanded');
            toggle.textContent = expanded ? 'Show less' : 'Show more';
        }}
    </script>
</body>
</html>"##,
            theme_class = theme_class,
            title = html_escape(title),
            version = env!("CARGO_PKG_VERSION"),
            collapsed_width = collapsed_width,
            file_table = file_table,
            receipt_table = receipt_table,
            purchases = purchases,
        )
    }

    fn generate_purchases(&self, receipt: &ReceiptRecord, now: DateTime<Utc>) -> String {
        let heading = format!(
            "<h3>In-App Purchases ({} items)</h3>",
            receipt.purchases.len()
        );

        if !receipt.has_purchases() {
            return format!("{}{}", heading, NONE_HTML);
        }

        let tables: Vec<String> = receipt
            .purchases
            .iter()
            .map(|purchase| render_table(&purchase_rows(purchase, now)))
            .collect();

        format!("{}{}", heading, tables.join("<hr>"))
    }
}
