//! Aggregate counts over a finished result set.

use serde::{Deserialize, Serialize};

use crate::allocate::OrderResult;

/// Stock level under which an item counts as low.
pub const LOW_STOCK_THRESHOLD: f64 = 10.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultSummary {
    pub total_items: usize,
    pub low_stock_count: usize,
    pub zero_stock_count: usize,
    pub order_needed_count: usize,
}

impl ResultSummary {
    pub fn from_results(results: &[OrderResult]) -> Self {
        Self::with_threshold(results, LOW_STOCK_THRESHOLD)
    }

    /// Non-finite or negative stock values count as zero.
    pub fn with_threshold(results: &[OrderResult], low_stock_threshold: f64) -> Self {
        let mut summary = Self {
            total_items: results.len(),
            ..Self::default()
        };
        for r in results {
            let stock = if r.current_stock.is_finite() && r.current_stock > 0.0 {
                r.current_stock
            } else {
                0.0
            };
            if stock < low_stock_threshold {
                summary.low_stock_count += 1;
            }
            if stock == 0.0 {
                summary.zero_stock_count += 1;
            }
            if r.command_qty > 0 {
                summary.order_needed_count += 1;
            }
        }
        summary
    }

    /// Labelled metrics in report order.
    pub fn metrics(&self) -> Vec<Metric> {
        vec![
            Metric::new("Total Items", self.total_items),
            Metric::new("Low Stock (<10)", self.low_stock_count),
            Metric::new("Zero Stock (0)", self.zero_stock_count),
            Metric::new("Order Needed (Command > 0)", self.order_needed_count),
        ]
    }
}

/// One labelled row of the summary sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub metric: String,
    pub value: usize,
}

impl Metric {
    fn new(metric: &str, value: usize) -> Self {
        Self {
            metric: metric.to_string(),
            value,
        }
    }
}
