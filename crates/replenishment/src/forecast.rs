//! Demand forecasting from a sales window.

use serde::{Deserialize, Serialize};

/// Projected demand for one item.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub daily_avg: f64,
    pub forecast_qty: f64,
}

impl Forecast {
    /// Project `sales_qty` sold over `sales_days` onto `forecast_days`.
    ///
    /// `sales_days` is clamped to at least 1.
    pub fn project(sales_qty: f64, sales_days: u32, forecast_days: u32) -> Self {
        let daily_avg = sales_qty / f64::from(sales_days.max(1));
        Self {
            daily_avg,
            forecast_qty: daily_avg * f64::from(forecast_days),
        }
    }

    /// Units still missing once `current_stock` is used up (never negative).
    pub fn shortfall(&self, current_stock: f64) -> f64 {
        (self.forecast_qty - current_stock).max(0.0)
    }
}
