//! Typed records extracted from the raw datasets.

use std::collections::HashMap;

use restock_core::EngineResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::columns::{SalesColumns, StockColumns};
use crate::dataset::{Cell, Table};
use crate::normalize;

/// One row of the sales report after column resolution and normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub item_name: String,
    pub sales_qty: f64,
    pub current_stock: f64,
}

/// A single location column of the stock report for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationQty {
    pub location: String,
    pub quantity: f64,
}

/// One row of the stock report.
///
/// `locations` keeps the report's column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub item_name: String,
    pub locations: Vec<LocationQty>,
    pub carton_size: u32,
}

impl StockRecord {
    /// Quantity in the first location column (0 when there is none).
    pub fn primary_quantity(&self) -> f64 {
        self.locations.first().map_or(0.0, |l| l.quantity)
    }
}

/// Matching key for an item name: trimmed and lower-cased.
pub fn item_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Display name of an item cell, or `None` for missing identifiers.
///
/// Blank cells and the literal `nan` (any case) are treated as missing.
pub fn item_name(cell: &Cell) -> Option<String> {
    let text = cell.as_text()?;
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return None;
    }
    Some(trimmed.to_string())
}

/// Records of one dataset, indexed by item key.
///
/// Keeps first-seen order; when an item repeats, its first row wins.
#[derive(Debug, Clone)]
pub struct RecordBook<R> {
    records: Vec<R>,
    index: HashMap<String, usize>,
}

impl<R> Default for RecordBook<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<R> RecordBook<R> {
    /// Insert a record; returns `false` if the key was already present.
    fn insert(&mut self, key: String, record: R) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.records.len());
        self.records.push(record);
        true
    }

    pub fn get(&self, key: &str) -> Option<&R> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub type SalesBook = RecordBook<SalesRecord>;
pub type StockBook = RecordBook<StockRecord>;

/// Parse the sales report into records.
///
/// Fails only when the columns cannot be resolved.
pub fn sales_records(table: &Table) -> EngineResult<SalesBook> {
    let cols = SalesColumns::discover(table.headers.as_slice())?;
    debug!(
        item = %table.headers[cols.item],
        sales = %table.headers[cols.sales_qty],
        stock = %table.headers[cols.current_stock],
        "resolved sales columns"
    );

    let mut book = SalesBook::default();
    for row in 0..table.len() {
        let Some(name) = item_name(table.cell(row, cols.item)) else {
            continue;
        };
        let record = SalesRecord {
            sales_qty: normalize::quantity(table.cell(row, cols.sales_qty)),
            current_stock: normalize::quantity(table.cell(row, cols.current_stock)),
            item_name: name,
        };
        let key = item_key(&record.item_name);
        if !book.insert(key, record) {
            debug!(row, "duplicate sales row ignored");
        }
    }
    Ok(book)
}

/// Parse the stock report into records.
pub fn stock_records(table: &Table) -> EngineResult<StockBook> {
    let cols = StockColumns::discover(table.headers.as_slice())?;
    debug!(
        locations = cols.locations.len(),
        carton = ?cols.carton.map(|i| table.headers[i].as_str()),
        "resolved stock columns"
    );

    let mut book = StockBook::default();
    for row in 0..table.len() {
        let Some(name) = item_name(table.cell(row, cols.item)) else {
            continue;
        };
        let locations = cols
            .locations
            .iter()
            .map(|&col| LocationQty {
                location: table.headers[col].clone(),
                quantity: normalize::quantity(table.cell(row, col)),
            })
            .collect();
        let carton_size = cols
            .carton
            .map_or(1, |col| normalize::carton_size(table.cell(row, col)));
        let record = StockRecord {
            item_name: name,
            locations,
            carton_size,
        };
        let key = item_key(&record.item_name);
        if !book.insert(key, record) {
            debug!(row, "duplicate stock row ignored");
        }
    }
    Ok(book)
}
