//! Self-contained HTML report documents.
//!
//! Output is deterministic for the same input: styles are inlined, nothing is
//! fetched, and no timestamps are added unless the caller puts them in the
//! metadata.

use std::fmt::{self, Write as _};
use std::sync::Arc;

/// Derives a CSS class from a cell's text
pub type CellClassFn = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub title: String,
    pub subtitle: Option<String>,
    pub filename: String,
    /// Key/value pairs shown under the title, in order
    pub metadata: Vec<(String, String)>,
}

impl ReportConfig {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            filename: report_filename(&title),
            title,
            subtitle: None,
            metadata: Vec::new(),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }
}

/// Lowercase, dash-separated `title` with an `.html` extension
pub fn report_filename(title: &str) -> String {
    let slug = title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "report.html".to_string()
    } else {
        format!("{slug}.html")
    }
}

// ============================================================================
// SECTIONS
// ============================================================================

/// One table in the report
#[derive(Clone, Default)]
pub struct ReportSection {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Optional class derivation per column index
    pub cell_classes: Vec<Option<CellClassFn>>,
}

impl fmt::Debug for ReportSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportSection")
            .field("title", &self.title)
            .field("headers", &self.headers)
            .field("rows", &self.rows.len())
            .finish()
    }
}

impl ReportSection {
    pub fn new<S: Into<String>>(title: impl Into<String>, headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            title: title.into(),
            headers: headers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_row<S: Into<String>>(mut self, cells: impl IntoIterator<Item = S>) -> Self {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_rows(mut self, rows: Vec<Vec<String>>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Attach a class derivation to column `column`
    pub fn with_cell_class<F>(mut self, column: usize, derive: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        if self.cell_classes.len() <= column {
            self.cell_classes.resize(column + 1, None);
        }
        self.cell_classes[column] = Some(Arc::new(derive));
        self
    }

    fn class_for(&self, column: usize, value: &str) -> Option<String> {
        let derive = self.cell_classes.get(column)?.as_ref()?;
        derive(value)
    }
}

// ============================================================================
// BUILT-IN CELL CLASSES
// ============================================================================

/// Class for work-order / inspection status text
pub fn status_class(value: &str) -> Option<String> {
    let class = match value.trim().to_ascii_lowercase().as_str() {
        "completed" | "complete" | "done" | "resolved" | "passed" | "pass" => "status-ok",
        "open" | "pending" | "scheduled" | "in progress" | "in-progress" => "status-pending",
        "overdue" | "failed" | "fail" | "blocked" | "cancelled" => "status-bad",
        _ => return None,
    };
    Some(class.to_string())
}

/// Class for priority text
pub fn priority_class(value: &str) -> Option<String> {
    let class = match value.trim().to_ascii_lowercase().as_str() {
        "critical" | "urgent" | "high" => "priority-high",
        "medium" | "normal" => "priority-medium",
        "low" => "priority-low",
        _ => return None,
    };
    Some(class.to_string())
}

// ============================================================================
// DOCUMENT
// ============================================================================

const REPORT_CSS: &str = "\
body{font-family:-apple-system,'Segoe UI',Roboto,sans-serif;color:#1f2937;margin:32px;background:#fff}
h1{font-size:24px;margin:0 0 4px}
.subtitle{color:#6b7280;margin:0 0 16px}
.meta{border-collapse:collapse;margin-bottom:24px;font-size:13px}
.meta th{text-align:left;color:#6b7280;font-weight:500;padding:2px 16px 2px 0}
section{margin-bottom:32px}
h2{font-size:18px;margin:0 0 4px}
.count{color:#6b7280;font-size:12px;margin:0 0 8px}
table.data{border-collapse:collapse;width:100%;font-size:13px}
table.data th{background:#f3f4f6;text-align:left;padding:6px 10px;border-bottom:2px solid #d1d5db}
table.data td{padding:6px 10px;border-bottom:1px solid #e5e7eb}
.empty{color:#9ca3af;font-style:italic}
.status-ok{color:#15803d;font-weight:600}
.status-pending{color:#b45309;font-weight:600}
.status-bad{color:#b91c1c;font-weight:600}
.priority-high{background:#fee2e2}
.priority-medium{background:#fef3c7}
.priority-low{background:#dcfce7}
@media print{body{margin:0}section{page-break-inside:avoid}}
";

/// Render the full document
pub fn generate_document(config: &ReportConfig, sections: &[ReportSection]) -> String {
    let mut html = String::with_capacity(4096);
    // writing into a String cannot fail
    let _ = write_document(&mut html, config, sections);
    tracing::debug!(title = %config.title, sections = sections.len(), bytes = html.len(), "report generated");
    html
}

fn write_document(out: &mut String, config: &ReportConfig, sections: &[ReportSection]) -> fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{}</title>", escape_html(&config.title))?;
    writeln!(out, "<style>\n{}</style>", REPORT_CSS)?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;

    write_header(out, config)?;
    for section in sections {
        write_section(out, section)?;
    }

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(())
}

fn write_header(out: &mut String, config: &ReportConfig) -> fmt::Result {
    writeln!(out, "<header>")?;
    writeln!(out, "<h1>{}</h1>", escape_html(&config.title))?;
    if let Some(subtitle) = &config.subtitle {
        writeln!(out, "<p class=\"subtitle\">{}</p>", escape_html(subtitle))?;
    }
    if !config.metadata.is_empty() {
        writeln!(out, "<table class=\"meta\">")?;
        for (key, value) in &config.metadata {
            writeln!(
                out,
                "<tr><th>{}</th><td>{}</td></tr>",
                escape_html(key),
                escape_html(value)
            )?;
        }
        writeln!(out, "</table>")?;
    }
    writeln!(out, "</header>")
}

fn write_section(out: &mut String, section: &ReportSection) -> fmt::Result {
    writeln!(out, "<section>")?;
    writeln!(out, "<h2>{}</h2>", escape_html(&section.title))?;
    writeln!(out, "<p class=\"count\">{}</p>", record_count(section.rows.len()))?;

    if section.rows.is_empty() {
        writeln!(out, "<p class=\"empty\">No records</p>")?;
        return writeln!(out, "</section>");
    }

    writeln!(out, "<table class=\"data\">")?;
    write!(out, "<thead><tr>")?;
    for header in &section.headers {
        write!(out, "<th>{}</th>", escape_html(header))?;
    }
    writeln!(out, "</tr></thead>")?;

    writeln!(out, "<tbody>")?;
    for row in &section.rows {
        write!(out, "<tr>")?;
        for (column, cell) in row.iter().enumerate() {
            match section.class_for(column, cell) {
                Some(class) => write!(out, "<td class=\"{}\">{}</td>", escape_html(&class), escape_html(cell))?,
                None => write!(out, "<td>{}</td>", escape_html(cell))?,
            }
        }
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</tbody>")?;
    writeln!(out, "</table>")?;
    writeln!(out, "</section>")
}

fn record_count(n: usize) -> String {
    if n == 1 {
        "1 record".to_string()
    } else {
        format!("{n} records")
    }
}

/// Escape text for element content and double- or single-quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
