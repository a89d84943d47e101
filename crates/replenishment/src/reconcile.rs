//! Full outer join of sales and stock records by item.
//!
//! Every item named in either dataset yields exactly one [`ReconciledItem`].
//! Sales figures drive demand; the stock report only contributes location
//! data, except for stock-only items where its first location stands in for
//! the current stock.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::forecast::Forecast;
use crate::records::{SalesBook, SalesRecord, StockBook, StockRecord, item_key};

/// Which datasets an item was found in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemOrigin {
    Both,
    SalesOnly,
    StockOnly,
    Neither,
}

/// One item after the join, before sourcing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledItem {
    pub item_name: String,
    pub sales_qty: f64,
    pub current_stock: f64,
    pub forecast_qty: f64,
    pub order_qty: f64,
    /// Location data to source from; `None` when the item is not sourced.
    pub stock_record: Option<StockRecord>,
    pub origin: ItemOrigin,
}

impl ReconciledItem {
    fn empty(item_name: String) -> Self {
        Self {
            item_name,
            sales_qty: 0.0,
            current_stock: 0.0,
            forecast_qty: 0.0,
            order_qty: 0.0,
            stock_record: None,
            origin: ItemOrigin::Neither,
        }
    }
}

/// Join parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Reconciler {
    pub sales_days: u32,
    pub forecast_days: u32,
    /// Below this stock level, items without sales are topped up to it.
    pub min_stock_level: f64,
}

impl Reconciler {
    pub fn new(sales_days: u32, forecast_days: u32, min_stock_level: f64) -> Self {
        Self {
            sales_days,
            forecast_days,
            min_stock_level,
        }
    }

    /// Join both books.
    ///
    /// Output order: sales items in sales order, then stock-only items in
    /// stock order.
    pub fn reconcile(&self, sales: &SalesBook, stock: &StockBook) -> Vec<ReconciledItem> {
        let mut seen: HashSet<String> = HashSet::with_capacity(sales.len() + stock.len());
        let names = sales
            .iter()
            .map(|r| r.item_name.as_str())
            .chain(stock.iter().map(|r| r.item_name.as_str()));

        let mut items = Vec::with_capacity(sales.len() + stock.len());
        for name in names {
            let key = item_key(name);
            if !seen.insert(key.clone()) {
                continue;
            }
            items.push(self.reconcile_one(name, sales.get(&key), stock.get(&key)));
        }
        items
    }

    fn reconcile_one(
        &self,
        name: &str,
        sales: Option<&SalesRecord>,
        stock: Option<&StockRecord>,
    ) -> ReconciledItem {
        match (sales, stock) {
            (Some(s), stock) => self.from_sales(s, stock),
            (None, Some(st)) => self.from_stock_only(st),
            (None, None) => ReconciledItem::empty(name.to_string()),
        }
    }

    fn from_sales(&self, sales: &SalesRecord, stock: Option<&StockRecord>) -> ReconciledItem {
        let forecast = Forecast::project(sales.sales_qty, self.sales_days, self.forecast_days);
        let (forecast_qty, order_qty) = match self.top_up(sales.sales_qty, sales.current_stock) {
            Some(top_up) => (0.0, top_up),
            None => (forecast.forecast_qty, forecast.shortfall(sales.current_stock)),
        };

        ReconciledItem {
            item_name: sales.item_name.clone(),
            sales_qty: sales.sales_qty,
            current_stock: sales.current_stock,
            forecast_qty,
            order_qty,
            stock_record: stock.cloned(),
            origin: if stock.is_some() {
                ItemOrigin::Both
            } else {
                ItemOrigin::SalesOnly
            },
        }
    }

    fn from_stock_only(&self, stock: &StockRecord) -> ReconciledItem {
        let current_stock = stock.primary_quantity();
        let top_up = self.top_up(0.0, current_stock);

        ReconciledItem {
            item_name: stock.item_name.clone(),
            sales_qty: 0.0,
            current_stock,
            forecast_qty: 0.0,
            order_qty: top_up.unwrap_or(0.0),
            // Well-stocked items are reported but never sourced.
            stock_record: top_up.map(|_| stock.clone()),
            origin: ItemOrigin::StockOnly,
        }
    }

    /// Minimum-stock safety net: with no sales and stock below the minimum,
    /// order the difference instead of the (zero) forecast.
    fn top_up(&self, sales_qty: f64, current_stock: f64) -> Option<f64> {
        (sales_qty == 0.0 && current_stock < self.min_stock_level)
            .then(|| self.min_stock_level - current_stock)
    }
}
