//! Data models for the price calculator.
//!
//! This module contains the core data structures used throughout
//! the application for representing entries, summaries, and reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label of the synthetic grand-total row appended to a summary.
pub const TOTAL_LABEL: &str = "Total";

/// A single user-entered line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRow {
    /// Free-text description; doubles as the grouping key.
    /// An empty string is a valid, distinct category.
    pub description: String,
    /// Amount purchased (e.g., ounces). Zero and negative values are allowed.
    pub quantity: f64,
    /// Total cost paid for this row, not the unit price.
    pub cost: f64,
}

impl EntryRow {
    /// Creates a new entry row.
    pub fn new(description: impl Into<String>, quantity: f64, cost: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            cost,
        }
    }

    /// Unit price of this single row (cost divided by quantity).
    ///
    /// Non-finite when quantity is zero; callers format it as-is.
    pub fn unit_price(&self) -> f64 {
        self.cost / self.quantity
    }
}

/// An ordered list of entry rows, in insertion order.
pub type EntryTable = Vec<EntryRow>;

/// One aggregated output line: a category's totals and weighted average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// The grouping key, verbatim (original case preserved).
    pub description: String,
    /// Sum of `quantity` over all rows in this category.
    pub total_quantity: f64,
    /// Sum of `cost` over the category divided by `total_quantity`.
    pub average_price: f64,
}

impl CategorySummary {
    /// Whether this is the synthetic grand-total row.
    pub fn is_total(&self) -> bool {
        self.description == TOTAL_LABEL
    }
}

/// Metadata about a generated summary report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Where the entries came from (file path, "stdin", or "session").
    pub source: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of entry rows read.
    pub entry_count: usize,
    /// Number of distinct categories (excluding the grand-total row).
    pub category_count: usize,
}

/// The complete calculation report handed to the renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Metadata about the report.
    pub metadata: ReportMetadata,
    /// The entry rows the summary was computed from.
    pub entries: EntryTable,
    /// Per-category summaries plus the optional trailing grand-total row.
    pub summary: Vec<CategorySummary>,
}

impl SummaryReport {
    /// Assembles a report from entries and their computed summary.
    pub fn new(
        source: impl Into<String>,
        entries: EntryTable,
        summary: Vec<CategorySummary>,
    ) -> Self {
        let category_count = summary.iter().filter(|s| !s.is_total()).count();
        Self {
            metadata: ReportMetadata {
                source: source.into(),
                generated_at: Utc::now(),
                entry_count: entries.len(),
                category_count,
            },
            entries,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_price() {
        let row = EntryRow::new("Coffee", 12.0, 30.0);
        assert_eq!(row.unit_price(), 2.5);
    }

    #[test]
    fn test_unit_price_zero_quantity_is_not_finite() {
        let row = EntryRow::new("Coffee", 0.0, 30.0);
        assert!(row.unit_price().is_infinite());

        let empty = EntryRow::new("Coffee", 0.0, 0.0);
        assert!(empty.unit_price().is_nan());
    }

    #[test]
    fn test_is_total() {
        let total = CategorySummary {
            description: TOTAL_LABEL.to_string(),
            total_quantity: 5.0,
            average_price: 2.0,
        };
        assert!(total.is_total());

        let category = CategorySummary {
            description: "total".to_string(),
            total_quantity: 5.0,
            average_price: 2.0,
        };
        assert!(!category.is_total());
    }

    #[test]
    fn test_report_counts() {
        let entries = vec![
            EntryRow::new("Apple", 2.0, 4.0),
            EntryRow::new("Apple", 3.0, 6.0),
            EntryRow::new("Banana", 1.0, 1.0),
        ];
        let summary = vec![
            CategorySummary {
                description: "Apple".to_string(),
                total_quantity: 5.0,
                average_price: 2.0,
            },
            CategorySummary {
                description: "Banana".to_string(),
                total_quantity: 1.0,
                average_price: 1.0,
            },
            CategorySummary {
                description: TOTAL_LABEL.to_string(),
                total_quantity: 6.0,
                average_price: 11.0 / 6.0,
            },
        ];

        let report = SummaryReport::new("groceries.csv", entries, summary);
        assert_eq!(report.metadata.entry_count, 3);
        assert_eq!(report.metadata.category_count, 2);
        assert_eq!(report.metadata.source, "groceries.csv");
    }
}
