//! Heuristic column discovery.
//!
//! Real-world sales and stock exports rarely agree on header names, so the
//! engine infers each column's role from its header text instead of relying
//! on a declared schema. Matching is a case-insensitive substring test,
//! scanning columns left to right and, per column, keywords in priority
//! order. When nothing matches, sales-like searches fall back to column 1
//! and stock-like searches to column 2.

use restock_core::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Keywords identifying the sales quantity column, in priority order.
pub const SALES_KEYWORDS: &[&str] = &["sale", "sales", "qty", "sold", "outward"];

/// Keywords identifying the current stock column of the sales report.
pub const STOCK_KEYWORDS: &[&str] = &["stock", "closing", "balance", "current"];

/// Header fragments marking a warehouse location.
pub const WAREHOUSE_KEYWORDS: &[&str] = &["warehouse", "wh"];

/// Header fragment marking a shop location.
pub const SHOP_KEYWORD: &str = "shop";

const SALES_FALLBACK_INDEX: usize = 1;
const STOCK_FALLBACK_INDEX: usize = 2;

/// Semantic roles the sales report columns are resolved to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    SalesQty,
    CurrentStock,
}

impl ColumnRole {
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            ColumnRole::SalesQty => SALES_KEYWORDS,
            ColumnRole::CurrentStock => STOCK_KEYWORDS,
        }
    }
}

/// Find the column whose header contains any of `keywords`.
///
/// Falls back to a fixed position when the keyword set looks sales-like or
/// stock-like and the table is wide enough; otherwise fails with
/// [`EngineError::ColumnNotFound`].
pub fn find_column<S: AsRef<str>>(headers: &[S], keywords: &[&str]) -> EngineResult<usize> {
    let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    for (idx, header) in headers.iter().enumerate() {
        let header = header.as_ref().to_lowercase();
        if lowered.iter().any(|k| header.contains(k.as_str())) {
            return Ok(idx);
        }
    }

    positional_fallback(keywords, headers.len()).ok_or_else(|| {
        EngineError::column_not_found(
            keywords.iter().copied(),
            headers.iter().map(|h| h.as_ref().to_string()),
        )
    })
}

/// Resolve a [`ColumnRole`] against a header row.
pub fn resolve<S: AsRef<str>>(headers: &[S], role: ColumnRole) -> EngineResult<usize> {
    find_column(headers, role.keywords())
}

fn positional_fallback(keywords: &[&str], width: usize) -> Option<usize> {
    let has = |needles: &[&str]| keywords.iter().any(|k| needles.contains(k));

    if has(&["sales", "sale", "qty"]) && width > SALES_FALLBACK_INDEX {
        return Some(SALES_FALLBACK_INDEX);
    }
    if has(&["stock", "closing", "balance"]) && width > STOCK_FALLBACK_INDEX {
        return Some(STOCK_FALLBACK_INDEX);
    }
    None
}

/// Resolved layout of the sales report.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SalesColumns {
    pub item: usize,
    pub sales_qty: usize,
    pub current_stock: usize,
}

impl SalesColumns {
    pub fn discover<S: AsRef<str>>(headers: &[S]) -> EngineResult<Self> {
        if headers.is_empty() {
            return Err(EngineError::invalid_dataset(
                "sales dataset has no columns (item column missing)",
            ));
        }
        Ok(Self {
            item: 0,
            sales_qty: resolve(headers, ColumnRole::SalesQty)?,
            current_stock: resolve(headers, ColumnRole::CurrentStock)?,
        })
    }
}

/// Resolved layout of the multi-location stock report.
///
/// Column 0 is the item; with more than two columns the last one is the
/// carton size; everything else is a named location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockColumns {
    pub item: usize,
    pub carton: Option<usize>,
    pub locations: Vec<usize>,
}

impl StockColumns {
    pub fn discover<S: AsRef<str>>(headers: &[S]) -> EngineResult<Self> {
        if headers.is_empty() {
            return Err(EngineError::invalid_dataset(
                "stock dataset has no columns (item column missing)",
            ));
        }
        let carton = (headers.len() > 2).then(|| headers.len() - 1);
        let locations = (1..headers.len()).filter(|&i| Some(i) != carton).collect();
        Ok(Self {
            item: 0,
            carton,
            locations,
        })
    }
}

/// What kind of location a stock column header names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Warehouse,
    Shop,
    Other,
}

impl LocationKind {
    pub fn classify(header: &str) -> Self {
        let lower = header.to_lowercase();
        if WAREHOUSE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            LocationKind::Warehouse
        } else if lower.contains(SHOP_KEYWORD) {
            LocationKind::Shop
        } else {
            LocationKind::Other
        }
    }

    /// Whether a header may name a peer shop.
    ///
    /// Looser than [`LocationKind::classify`]: only the full word
    /// `warehouse` disqualifies, so shops such as "Shop Wharf" stay eligible.
    pub fn is_shop_column(header: &str) -> bool {
        let lower = header.to_lowercase();
        lower.contains(SHOP_KEYWORD) && !lower.contains(WAREHOUSE_KEYWORDS[0])
    }
}
