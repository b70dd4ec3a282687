//! Summary report generation.
//!
//! This module renders calculation reports in three formats: an aligned
//! plain-text table for the terminal, Markdown for saved reports, and
//! JSON for downstream tooling. All numeric formatting happens here;
//! the calculation core only ever produces raw values.

use crate::models::{CategorySummary, EntryRow, ReportMetadata, SummaryReport};
use anyhow::Result;

/// Numeric formatting options for rendered reports.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Decimal places for quantities.
    pub quantity_precision: usize,
    /// Decimal places for prices.
    pub price_precision: usize,
    /// Include the entry rows in the output, not just the summary.
    pub include_entries: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            quantity_precision: 3,
            price_precision: 2,
            include_entries: false,
        }
    }
}

impl FormatOptions {
    fn quantity(&self, value: f64) -> String {
        format!("{:.*}", self.quantity_precision, value)
    }

    fn price(&self, value: f64) -> String {
        format!("${:.*}", self.price_precision, value)
    }
}

/// Generate the plain-text report printed to the terminal.
pub fn generate_text_report(report: &SummaryReport, options: &FormatOptions) -> String {
    let mut output = String::new();

    if options.include_entries && !report.entries.is_empty() {
        output.push_str("Entries\n\n");
        output.push_str(&render_entries_table(&report.entries, options));
        output.push('\n');
    }

    output.push_str("Calculations\n\n");
    output.push_str(&render_summary_table(&report.summary, options));

    output
}

/// Render the summary as an aligned three-column table.
fn render_summary_table(summary: &[CategorySummary], options: &FormatOptions) -> String {
    if summary.is_empty() {
        return "No entries.\n".to_string();
    }

    let header = ["Description", "Total Quantity", "Average Price"];
    let rows: Vec<[String; 3]> = summary
        .iter()
        .map(|s| {
            [
                s.description.clone(),
                options.quantity(s.total_quantity),
                options.price(s.average_price),
            ]
        })
        .collect();

    let widths = column_widths(&header, &rows);
    let mut table = String::new();

    table.push_str(&format_row(&header.map(String::from), &widths));
    table.push_str(&format_divider(&widths));

    let has_total = summary.last().is_some_and(|s| s.is_total());
    let body_len = if has_total { rows.len() - 1 } else { rows.len() };

    for row in &rows[..body_len] {
        table.push_str(&format_row(row, &widths));
    }

    // The grand-total row is set off from the category rows.
    if has_total {
        table.push_str(&format_divider(&widths));
        table.push_str(&format_row(&rows[body_len], &widths));
    }

    table
}

/// Render the raw entries, with the per-row unit price alongside.
fn render_entries_table(entries: &[EntryRow], options: &FormatOptions) -> String {
    let header = ["Description", "Quantity", "Price", "Unit Price"];
    let rows: Vec<[String; 4]> = entries
        .iter()
        .map(|e| {
            [
                e.description.clone(),
                options.quantity(e.quantity),
                options.price(e.cost),
                options.price(e.unit_price()),
            ]
        })
        .collect();

    let widths = column_widths(&header, &rows);
    let mut table = String::new();

    table.push_str(&format_row(&header.map(String::from), &widths));
    table.push_str(&format_divider(&widths));
    for row in &rows {
        table.push_str(&format_row(row, &widths));
    }

    table
}

/// Column widths sized to the widest cell, header included.
fn column_widths<const N: usize>(header: &[&str; N], rows: &[[String; N]]) -> [usize; N] {
    let mut widths = header.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }
    widths
}

/// Format one table row: description left-aligned, numbers right-aligned.
fn format_row<const N: usize>(cells: &[String; N], widths: &[usize; N]) -> String {
    let mut line = String::new();
    for (index, (cell, width)) in cells.iter().zip(widths.iter().copied()).enumerate() {
        if index > 0 {
            line.push_str("  ");
        }
        if index == 0 {
            line.push_str(&format!("{:<width$}", cell));
        } else {
            line.push_str(&format!("{:>width$}", cell));
        }
    }
    line.push('\n');
    line
}

fn format_divider<const N: usize>(widths: &[usize; N]) -> String {
    let mut line = String::new();
    for (index, width) in widths.iter().enumerate() {
        if index > 0 {
            line.push_str("  ");
        }
        line.push_str(&"-".repeat(*width));
    }
    line.push('\n');
    line
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &SummaryReport, options: &FormatOptions) -> String {
    let mut output = String::new();

    output.push_str("# Average Price Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));

    if options.include_entries && !report.entries.is_empty() {
        output.push_str(&generate_entries_section(&report.entries, options));
    }

    output.push_str(&generate_summary_section(&report.summary, options));

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Entries:** {}\n", metadata.entry_count));
    section.push_str(&format!("- **Categories:** {}\n", metadata.category_count));
    section.push('\n');

    section
}

/// Generate the entries section as a Markdown table.
fn generate_entries_section(entries: &[EntryRow], options: &FormatOptions) -> String {
    let mut section = String::new();

    section.push_str("## Entries\n\n");
    section.push_str("| Description | Quantity | Price | Unit Price |\n");
    section.push_str("|:---|---:|---:|---:|\n");

    for entry in entries {
        section.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            entry.description,
            options.quantity(entry.quantity),
            options.price(entry.cost),
            options.price(entry.unit_price()),
        ));
    }
    section.push('\n');

    section
}

/// Generate the calculations section as a Markdown table.
fn generate_summary_section(summary: &[CategorySummary], options: &FormatOptions) -> String {
    let mut section = String::new();

    section.push_str("## Calculations\n\n");

    if summary.is_empty() {
        section.push_str("No entries.\n\n");
        return section;
    }

    section.push_str("| Description | Total Quantity | Average Price |\n");
    section.push_str("|:---|---:|---:|\n");

    for entry in summary {
        let description = if entry.is_total() {
            format!("**{}**", entry.description)
        } else {
            entry.description.clone()
        };

        section.push_str(&format!(
            "| {} | {} | {} |\n",
            description,
            options.quantity(entry.total_quantity),
            options.price(entry.average_price),
        ));
    }
    section.push('\n');

    section
}

/// Generate a JSON report.
pub fn generate_json_report(report: &SummaryReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::aggregate;

    fn create_test_report() -> SummaryReport {
        let entries = vec![
            EntryRow::new("Banana", 10.0, 20.0),
            EntryRow::new("Apple", 5.0, 15.0),
            EntryRow::new("Apple", 5.0, 5.0),
        ];
        let summary = aggregate(&entries);
        SummaryReport::new("groceries.csv", entries, summary)
    }

    #[test]
    fn test_generate_text_report() {
        let report = create_test_report();
        let text = generate_text_report(&report, &FormatOptions::default());

        assert!(text.contains("Calculations"));
        assert!(text.contains("Apple"));
        assert!(text.contains("Banana"));
        assert!(text.contains("Total"));
        assert!(text.contains("10.000"));
        assert!(text.contains("$2.00"));
        // Entries are omitted by default.
        assert!(!text.contains("Unit Price"));
    }

    #[test]
    fn test_text_report_with_entries() {
        let report = create_test_report();
        let options = FormatOptions {
            include_entries: true,
            ..FormatOptions::default()
        };

        let text = generate_text_report(&report, &options);
        assert!(text.contains("Entries"));
        assert!(text.contains("Unit Price"));
        assert!(text.contains("$3.00")); // 15 / 5 on the second row
    }

    #[test]
    fn test_text_report_total_is_on_last_line() {
        let report = create_test_report();
        let text = generate_text_report(&report, &FormatOptions::default());

        let last_line = text.lines().last().unwrap();
        assert!(last_line.starts_with("Total"));
    }

    #[test]
    fn test_empty_report_has_no_total() {
        let report = SummaryReport::new("stdin", Vec::new(), Vec::new());
        let text = generate_text_report(&report, &FormatOptions::default());

        assert!(text.contains("No entries."));
        assert!(!text.contains("Total"));
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let options = FormatOptions {
            include_entries: true,
            ..FormatOptions::default()
        };

        let markdown = generate_markdown_report(&report, &options);

        assert!(markdown.contains("# Average Price Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("- **Source:** groceries.csv"));
        assert!(markdown.contains("## Entries"));
        assert!(markdown.contains("## Calculations"));
        assert!(markdown.contains("| Apple | 10.000 | $2.00 |"));
        assert!(markdown.contains("| **Total** | 20.000 | $2.00 |"));
    }

    #[test]
    fn test_non_finite_average_renders_as_text() {
        let entries = vec![EntryRow::new("X", 0.0, 0.0)];
        let summary = aggregate(&entries);
        let report = SummaryReport::new("stdin", entries, summary);

        let text = generate_text_report(&report, &FormatOptions::default());
        assert!(text.contains("NaN"));
    }

    #[test]
    fn test_precision_is_configurable() {
        let report = create_test_report();
        let options = FormatOptions {
            quantity_precision: 0,
            price_precision: 4,
            include_entries: false,
        };

        let text = generate_text_report(&report, &options);
        assert!(text.contains("$2.0000"));
        assert!(!text.contains("10.000 "));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"source\""));
        assert!(json.contains("\"entries\""));
        assert!(json.contains("\"summary\""));
        assert!(json.contains("\"average_price\""));
    }
}
