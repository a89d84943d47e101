//! Result views: item search plus a status filter.
//!
//! Filters work on the visible labels, the same way a user scanning the
//! result table would.

use core::str::FromStr;

use restock_core::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

use crate::allocate::{NOT_AVAILABLE_LABEL, OrderResult};

/// A peer shop must hold at least this many units for its order to count.
pub const MIN_SHOP_TRANSFER: f64 = 5.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    AllOrders,
    /// Actionable orders: something to order from a known location.
    Command,
    NoOrders,
    FromWarehouse,
    FromShops,
    InsufficientStock,
    ZeroStock,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 7] = [
        StatusFilter::AllOrders,
        StatusFilter::Command,
        StatusFilter::NoOrders,
        StatusFilter::FromWarehouse,
        StatusFilter::FromShops,
        StatusFilter::InsufficientStock,
        StatusFilter::ZeroStock,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::AllOrders => "All Orders",
            StatusFilter::Command => "Command",
            StatusFilter::NoOrders => "No Orders",
            StatusFilter::FromWarehouse => "From Warehouse",
            StatusFilter::FromShops => "From Shops",
            StatusFilter::InsufficientStock => "Insufficient Stock",
            StatusFilter::ZeroStock => "Zero Stock",
        }
    }

    pub fn matches(&self, r: &OrderResult) -> bool {
        let location = r.source_label.to_lowercase();
        let ordered = r.command_qty > 0 && r.source_label != NOT_AVAILABLE_LABEL;

        match self {
            StatusFilter::AllOrders => true,
            StatusFilter::Command => {
                ordered && (!is_single_shop(&r.source_label) || shop_qty(r) >= MIN_SHOP_TRANSFER)
            }
            StatusFilter::NoOrders => !ordered,
            StatusFilter::FromWarehouse => ordered && location.contains("warehouse"),
            StatusFilter::FromShops => {
                ordered && is_single_shop(&r.source_label) && shop_qty(r) >= MIN_SHOP_TRANSFER
            }
            StatusFilter::InsufficientStock => ordered && location.contains("insufficient"),
            StatusFilter::ZeroStock => ordered && r.current_stock <= 0.0,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        if wanted.is_empty() {
            return Ok(StatusFilter::AllOrders);
        }
        StatusFilter::ALL
            .into_iter()
            .find(|f| f.label().to_ascii_lowercase() == wanted)
            .ok_or_else(|| EngineError::configuration(format!("unknown status filter '{s}'")))
    }
}

/// True when the source label names a single peer shop.
fn is_single_shop(label: &str) -> bool {
    let lower = label.trim().to_lowercase();
    lower.starts_with("shop") && !lower.contains("warehouse") && !lower.contains("insufficient")
}

/// Leading quantity of the availability label (`"12"`, `"Shop 02: 12"`).
fn shop_qty(r: &OrderResult) -> f64 {
    let label = r.availability_label.as_str();
    let value = label.split(':').nth(1).unwrap_or(label);
    leading_number(value.trim()).unwrap_or(0.0)
}

fn leading_number(s: &str) -> Option<f64> {
    let end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse().ok()
}

/// Search text plus status filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultFilter {
    pub search: String,
    pub status: StatusFilter,
}

impl ResultFilter {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }

    pub fn matches(&self, r: &OrderResult) -> bool {
        r.item_name.to_lowercase().contains(&self.search.to_lowercase()) && self.status.matches(r)
    }

    pub fn apply(&self, results: &[OrderResult]) -> Vec<OrderResult> {
        results.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
