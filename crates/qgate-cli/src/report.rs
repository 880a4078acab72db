//! # Report Rendering
//!
//! Pure functions from a [`ValidationReport`] to text. Three modes:
//!
//! - [`RenderMode::Text`]: compact summary plus one status line per document.
//! - [`RenderMode::Html`]: standalone page with a summary block and one block
//!   per document. Every interpolated string is HTML-escaped.
//! - [`RenderMode::Json`]: the report serialized as pretty-printed JSON.

use std::fmt;

use clap::ValueEnum;

use qgate_core::{ValidationReport, ValidationResult};

/// Output format for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RenderMode {
    /// Compact textual summary.
    #[default]
    Text,
    /// Standalone HTML page.
    Html,
    /// Pretty-printed JSON.
    Json,
}

/// Render `report` in `mode`.
///
/// # Errors
///
/// Only JSON rendering can fail, if serialization fails.
pub fn render(report: &ValidationReport, mode: RenderMode) -> Result<String, serde_json::Error> {
    match mode {
        RenderMode::Text => Ok(TextReport(report).to_string()),
        RenderMode::Html => Ok(HtmlReport(report).to_string()),
        RenderMode::Json => serde_json::to_string_pretty(report),
    }
}

/// Summary plus one status line per document.
struct TextReport<'a>(&'a ValidationReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(
            f,
            "Validation Report - {}",
            report.timestamp().to_display_string()
        )?;
        writeln!(f, "Total Files: {}", report.total())?;
        writeln!(f, "Valid: {}", report.valid())?;
        writeln!(f, "Invalid: {}", report.invalid())?;
        writeln!(f, "Average Score: {:.2}%", report.average_score())?;
        writeln!(f, "Validation Rate: {:.2}%", report.validation_rate())?;

        for result in report.results() {
            let status = if result.is_valid() { "✅" } else { "❌" };
            writeln!(
                f,
                "{status} {} (Score: {:.1}%)",
                result.document(),
                result.score()
            )?;
            for error in result.errors() {
                writeln!(f, "   Error: {error}")?;
            }
            for warning in result.warnings() {
                writeln!(f, "   Warning: {warning}")?;
            }
        }
        Ok(())
    }
}

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Schema Validation Report</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; }
        .summary { background: #f0f0f0; padding: 20px; border-radius: 5px; margin-bottom: 20px; }
        .result { margin-bottom: 10px; padding: 10px; border: 1px solid #ddd; }
        .valid { background: #d4edda; border-color: #c3e6cb; }
        .invalid { background: #f8d7da; border-color: #f5c6cb; }
        .errors { color: #721c24; }
        .warnings { color: #856404; }
        .score { font-weight: bold; }
    </style>
</head>
<body>
    <h1>Schema Validation Report</h1>
"#;

/// Standalone HTML page.
struct HtmlReport<'a>(&'a ValidationReport);

impl fmt::Display for HtmlReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        f.write_str(HTML_HEAD)?;
        write!(
            f,
            r#"    <div class="summary">
        <h2>Summary</h2>
        <p><strong>Generated:</strong> {}</p>
        <p><strong>Total Files:</strong> {}</p>
        <p><strong>Valid Files:</strong> {}</p>
        <p><strong>Invalid Files:</strong> {}</p>
        <p><strong>Average Score:</strong> {:.2}%</p>
        <p><strong>Validation Rate:</strong> {:.2}%</p>
    </div>

    <h2>Detailed Results</h2>
"#,
            report.timestamp().to_display_string(),
            report.total(),
            report.valid(),
            report.invalid(),
            report.average_score(),
            report.validation_rate(),
        )?;

        for result in report.results() {
            write_html_result(f, result)?;
        }

        f.write_str("</body>\n</html>\n")
    }
}

fn write_html_result(f: &mut fmt::Formatter<'_>, result: &ValidationResult) -> fmt::Result {
    let status = if result.is_valid() { "valid" } else { "invalid" };
    write!(
        f,
        r#"    <div class="result {status}">
        <h3>{}</h3>
        <p><strong>Schema:</strong> {}</p>
        <p><strong>Score:</strong> <span class="score">{:.1}%</span></p>
"#,
        escape_html(result.document()),
        escape_html(result.schema_name()),
        result.score(),
    )?;
    write_html_list(f, "errors", "Errors", result.errors())?;
    write_html_list(f, "warnings", "Warnings", result.warnings())?;
    f.write_str("    </div>\n")
}

fn write_html_list(
    f: &mut fmt::Formatter<'_>,
    class: &str,
    title: &str,
    items: &[String],
) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    write!(f, r#"        <div class="{class}"><strong>{title}:</strong><ul>"#)?;
    for item in items {
        write!(f, "<li>{}</li>", escape_html(item))?;
    }
    f.write_str("</ul></div>\n")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
