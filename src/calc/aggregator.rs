//! Entry aggregation.
//!
//! This module provides the core calculation: grouping entry rows by
//! description and computing total quantity and weighted average price
//! per category, plus a grand-total row across the whole table.

use crate::models::{CategorySummary, EntryRow, TOTAL_LABEL};
use std::collections::HashMap;

/// Running totals for one category.
#[derive(Debug, Default)]
struct Accumulator {
    quantity: f64,
    cost: f64,
}

/// Aggregate an entry table into a sorted per-category summary.
///
/// Rows are grouped by exact description equality (case-sensitive), so
/// `"Apple"` and `"apple"` are distinct categories. Each category yields
/// one summary with the sum of its quantities and its weighted average
/// price (total cost / total quantity). Summaries are sorted ascending by
/// lowercased description; ties keep first-encountered order. When the
/// grand cost or grand quantity is non-zero, a final `"Total"` row over
/// the entire table is appended after the sort.
///
/// The function is pure and never fails: a category whose quantities sum
/// to zero gets a non-finite average (NaN or infinity), passed through
/// as-is rather than reported as an error.
pub fn aggregate(table: &[EntryRow]) -> Vec<CategorySummary> {
    let mut seen: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Accumulator> = HashMap::new();

    for row in table {
        let acc = groups.entry(row.description.as_str()).or_insert_with(|| {
            seen.push(row.description.as_str());
            Accumulator::default()
        });
        acc.quantity += row.quantity;
        acc.cost += row.cost;
    }

    let mut grand_quantity = 0.0;
    let mut grand_cost = 0.0;

    // Emit in first-encountered order; the stable sort below keeps that
    // order for descriptions that collide after case-folding.
    let mut summaries: Vec<CategorySummary> = seen
        .iter()
        .map(|&key| {
            let acc = &groups[key];
            grand_quantity += acc.quantity;
            grand_cost += acc.cost;

            CategorySummary {
                description: key.to_string(),
                total_quantity: acc.quantity,
                average_price: acc.cost / acc.quantity,
            }
        })
        .collect();

    summaries.sort_by_cached_key(|s| s.description.to_lowercase());

    // Negative grand totals count as non-zero; only an all-zero (or empty)
    // table suppresses the grand-total row.
    if grand_cost != 0.0 || grand_quantity != 0.0 {
        summaries.push(CategorySummary {
            description: TOTAL_LABEL.to_string(),
            total_quantity: grand_quantity,
            average_price: grand_cost / grand_quantity,
        });
    }

    summaries
}
