//! Export data contract.
//!
//! The workbook writer is someone else's job; this module decides what goes
//! into each sheet.

use serde::{Deserialize, Serialize};

use crate::allocate::OrderResult;
use crate::summary::{Metric, ResultSummary};

pub const FILTERED_SHEET: &str = "Filtered Orders";
pub const ALL_ITEMS_SHEET: &str = "All Items";
pub const SUMMARY_SHEET: &str = "Summary";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportReport {
    /// Rows the user chose to export, sorted by item name.
    pub filtered: Vec<OrderResult>,
    /// Every row of the run, sorted by item name.
    pub all: Vec<OrderResult>,
    /// Computed over `all`.
    pub summary: ResultSummary,
    pub metrics: Vec<Metric>,
}

impl ExportReport {
    /// Build the report; without the full run, `filtered` stands in for it.
    pub fn build(filtered: Vec<OrderResult>, all: Option<&[OrderResult]>) -> Self {
        let mut all = match all {
            Some(rows) => rows.to_vec(),
            None => filtered.clone(),
        };
        let mut filtered = filtered;
        sort_by_item(&mut filtered);
        sort_by_item(&mut all);

        let summary = ResultSummary::from_results(&all);
        Self {
            filtered,
            all,
            metrics: summary.metrics(),
            summary,
        }
    }
}

fn sort_by_item(rows: &mut [OrderResult]) {
    rows.sort_by(|a, b| a.item_name.cmp(&b.item_name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocate::Source;

    fn line(name: &str, stock: f64, command: u64) -> OrderResult {
        OrderResult {
            item_name: name.to_string(),
            sales_qty: 0.0,
            current_stock: stock,
            command_qty: command,
            source_label: "Warehouse".to_string(),
            availability_label: "10".to_string(),
            source: Source::Warehouse,
        }
    }

    #[test]
    fn sheets_are_sorted_and_summary_covers_all_rows() {
        let all = vec![line("Pear", 20.0, 0), line("Apple", 0.0, 10), line("Mango", 5.0, 5)];
        let filtered = vec![line("Mango", 5.0, 5), line("Apple", 0.0, 10)];

        let report = ExportReport::build(filtered, Some(&all));

        let order: Vec<&str> = report.all.iter().map(|r| r.item_name.as_str()).collect();
        assert_eq!(order, ["Apple", "Mango", "Pear"]);
        assert_eq!(report.filtered[0].item_name, "Apple");
        assert_eq!(report.summary.total_items, 3);
        assert_eq!(report.summary.order_needed_count, 2);
        assert_eq!(report.metrics.len(), 4);
    }

    #[test]
    fn filtered_rows_stand_in_when_run_is_missing() {
        let report = ExportReport::build(vec![line("B", 1.0, 5), line("A", 1.0, 5)], None);
        assert_eq!(report.all, report.filtered);
        assert_eq!(report.summary.total_items, 2);
    }
}
