//! Sourcing decision and order rounding.
//!
//! For each reconciled item the allocator picks one supplier: the warehouse
//! when it alone covers the order, otherwise the best-stocked peer shop when
//! it alone covers the order, otherwise nobody ("Insufficient Stock"). The
//! visible labels list every location holding stock (warehouse first, then
//! the best peer shop) and only show the branch's own label when no location
//! has any stock at all.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::columns::LocationKind;
use crate::config::RoundingPolicy;
use crate::reconcile::ReconciledItem;
use crate::records::StockRecord;

pub const WAREHOUSE_LABEL: &str = "Warehouse";
pub const INSUFFICIENT_LABEL: &str = "Insufficient Stock";
pub const NOT_AVAILABLE_LABEL: &str = "Not Available";
pub const NO_AVAILABILITY: &str = "0";

/// Which branch of the sourcing decision an order took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum Source {
    Warehouse,
    PeerShop(String),
    Insufficient,
    /// No stock data for the item; nothing was sourced.
    NotAvailable,
}

/// Final, externally visible order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    pub item_name: String,
    pub sales_qty: f64,
    pub current_stock: f64,
    pub command_qty: u64,
    pub source_label: String,
    pub availability_label: String,
    pub source: Source,
}

/// Smallest multiple of `step` that is at least `qty`; 0 for `qty <= 0`.
///
/// A `step` of 0 is treated as 1.
pub fn round_up_to_step(qty: f64, step: u32) -> u64 {
    if !(qty > 0.0) {
        return 0;
    }
    let step = f64::from(step.max(1));
    ((qty / step).ceil() * step) as u64
}

/// Truncated whole-unit rendering used in availability labels.
fn whole_units(qty: f64) -> String {
    (qty.trunc() as i64).to_string()
}

/// Supplier candidates for one item.
#[derive(Debug, Clone, PartialEq)]
struct Candidates<'a> {
    warehouse_qty: f64,
    best_shop: Option<(&'a str, f64)>,
}

impl<'a> Candidates<'a> {
    fn collect(record: &'a StockRecord, selected_shop: &str) -> Self {
        let selected = selected_shop.trim();

        let warehouse = record
            .locations
            .iter()
            .position(|l| LocationKind::classify(&l.location) == LocationKind::Warehouse);
        let warehouse_qty = warehouse.map_or(0.0, |i| record.locations[i].quantity);

        let mut best_shop: Option<(&'a str, f64)> = None;
        for (i, loc) in record.locations.iter().enumerate() {
            if Some(i) == warehouse
                || !LocationKind::is_shop_column(&loc.location)
                || loc.location.trim().eq_ignore_ascii_case(selected)
                || loc.quantity <= 0.0
            {
                continue;
            }
            // Strict comparison keeps the first of equally stocked shops.
            if best_shop.is_none_or(|(_, best)| loc.quantity > best) {
                best_shop = Some((loc.location.as_str(), loc.quantity));
            }
        }

        Self {
            warehouse_qty,
            best_shop,
        }
    }
}

/// Turns reconciled items into order lines for one requesting shop.
#[derive(Debug, Clone)]
pub struct Allocator {
    selected_shop: String,
    step_size: u32,
    rounding: RoundingPolicy,
}

impl Allocator {
    pub fn new(selected_shop: impl Into<String>, step_size: u32, rounding: RoundingPolicy) -> Self {
        Self {
            selected_shop: selected_shop.into(),
            step_size,
            rounding,
        }
    }

    pub fn allocate(&self, item: &ReconciledItem) -> OrderResult {
        match &item.stock_record {
            Some(record) => self.allocate_from(item, record),
            None => self.not_available(item),
        }
    }

    fn not_available(&self, item: &ReconciledItem) -> OrderResult {
        OrderResult {
            item_name: item.item_name.clone(),
            sales_qty: item.sales_qty,
            current_stock: item.current_stock,
            command_qty: round_up_to_step(item.order_qty, self.step_size),
            source_label: NOT_AVAILABLE_LABEL.to_string(),
            availability_label: NO_AVAILABILITY.to_string(),
            source: Source::NotAvailable,
        }
    }

    fn allocate_from(&self, item: &ReconciledItem, record: &StockRecord) -> OrderResult {
        let order = item.order_qty;
        let c = Candidates::collect(record, &self.selected_shop);

        let (source, branch_label, branch_avail) = if c.warehouse_qty >= order {
            (
                Source::Warehouse,
                WAREHOUSE_LABEL.to_string(),
                whole_units(c.warehouse_qty),
            )
        } else {
            match c.best_shop {
                Some((shop, qty)) if qty >= order => {
                    (Source::PeerShop(shop.to_string()), shop.to_string(), whole_units(qty))
                }
                _ => (
                    Source::Insufficient,
                    INSUFFICIENT_LABEL.to_string(),
                    NO_AVAILABILITY.to_string(),
                ),
            }
        };

        let step = match (self.rounding, &source) {
            (RoundingPolicy::CartonWhenWarehouse, Source::Warehouse) => record.carton_size,
            _ => self.step_size,
        };
        let command_qty = round_up_to_step(order, step);

        let mut sources: Vec<String> = Vec::with_capacity(2);
        let mut availability: Vec<String> = Vec::with_capacity(2);
        if c.warehouse_qty > 0.0 {
            sources.push(WAREHOUSE_LABEL.to_string());
            availability.push(whole_units(c.warehouse_qty));
        }
        if let Some((shop, qty)) = c.best_shop {
            sources.push(shop.to_string());
            availability.push(whole_units(qty));
        }

        debug!(
            item = %item.item_name,
            order_qty = order,
            command_qty,
            source = ?source,
            "sourcing decided"
        );

        OrderResult {
            item_name: item.item_name.clone(),
            sales_qty: item.sales_qty,
            current_stock: item.current_stock,
            command_qty,
            source_label: if sources.is_empty() {
                branch_label
            } else {
                sources.join(", ")
            },
            availability_label: if availability.is_empty() {
                branch_avail
            } else {
                availability.join(", ")
            },
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::ItemOrigin;
    use crate::records::LocationQty;
    use proptest::prelude::*;

    fn record(locations: &[(&str, f64)], carton_size: u32) -> StockRecord {
        StockRecord {
            item_name: "Item".to_string(),
            locations: locations
                .iter()
                .map(|(name, qty)| LocationQty {
                    location: name.to_string(),
                    quantity: *qty,
                })
                .collect(),
            carton_size,
        }
    }

    fn item(order_qty: f64, stock: Option<StockRecord>) -> ReconciledItem {
        ReconciledItem {
            item_name: "Item".to_string(),
            sales_qty: 1.0,
            current_stock: 1.0,
            forecast_qty: order_qty,
            order_qty,
            stock_record: stock,
            origin: ItemOrigin::Both,
        }
    }

    fn allocator() -> Allocator {
        Allocator::new("Shop 01", 5, RoundingPolicy::FixedStep)
    }

    #[test]
    fn rounding_examples() {
        assert_eq!(round_up_to_step(0.0, 5), 0);
        assert_eq!(round_up_to_step(-3.0, 5), 0);
        assert_eq!(round_up_to_step(0.2, 5), 5);
        assert_eq!(round_up_to_step(5.0, 5), 5);
        assert_eq!(round_up_to_step(5.5, 5), 10);
        assert_eq!(round_up_to_step(6.0, 5), 10);
        assert_eq!(round_up_to_step(7.0, 0), 7);
        assert_eq!(round_up_to_step(f64::NAN, 5), 0);
    }

    #[test]
    fn warehouse_covers_order() {
        let r = allocator().allocate(&item(
            6.0,
            Some(record(&[("Warehouse", 20.0), ("Shop 02", 3.0)], 10)),
        ));
        assert_eq!(r.command_qty, 10);
        assert_eq!(r.source, Source::Warehouse);
        assert_eq!(r.source_label, "Warehouse, Shop 02");
        assert_eq!(r.availability_label, "20, 3");
    }

    #[test]
    fn warehouse_only_label() {
        let r = allocator().allocate(&item(
            6.0,
            Some(record(&[("Warehouse", 20.0), ("Shop 02", 0.0)], 1)),
        ));
        assert_eq!(r.source_label, "Warehouse");
        assert_eq!(r.availability_label, "20");
    }

    #[test]
    fn best_peer_shop_covers_order() {
        let r = allocator().allocate(&item(
            8.0,
            Some(record(&[("Warehouse", 0.0), ("Shop 02", 12.0), ("Shop 03", 4.0)], 1)),
        ));
        assert_eq!(r.command_qty, 10);
        assert_eq!(r.source, Source::PeerShop("Shop 02".to_string()));
        assert_eq!(r.source_label, "Shop 02");
        assert_eq!(r.availability_label, "12");
    }

    #[test]
    fn selected_shop_is_never_its_own_supplier() {
        let r = allocator().allocate(&item(
            8.0,
            Some(record(&[("WH", 0.0), ("shop 01", 50.0), ("Shop 02", 9.0)], 1)),
        ));
        assert_eq!(r.source, Source::PeerShop("Shop 02".to_string()));
    }

    #[test]
    fn shop_names_containing_wh_are_still_peers() {
        let r = allocator().allocate(&item(
            8.0,
            Some(record(&[("Warehouse", 0.0), ("Shop Whitby", 50.0)], 1)),
        ));
        assert_eq!(r.source, Source::PeerShop("Shop Whitby".to_string()));
        assert_eq!(r.source_label, "Shop Whitby");
        assert_eq!(r.availability_label, "50");
    }

    #[test]
    fn equally_stocked_shops_keep_first_seen() {
        let r = allocator().allocate(&item(
            4.0,
            Some(record(&[("Shop 03", 9.0), ("Shop 02", 9.0)], 1)),
        ));
        assert_eq!(r.source, Source::PeerShop("Shop 03".to_string()));
    }

    #[test]
    fn partial_stock_shows_locations_instead_of_insufficient() {
        let r = allocator().allocate(&item(
            30.0,
            Some(record(&[("Warehouse", 10.0), ("Shop 02", 12.0)], 1)),
        ));
        assert_eq!(r.source, Source::Insufficient);
        assert_eq!(r.command_qty, 30);
        assert_eq!(r.source_label, "Warehouse, Shop 02");
        assert_eq!(r.availability_label, "10, 12");
    }

    #[test]
    fn no_stock_anywhere_is_insufficient() {
        let r = allocator().allocate(&item(
            7.0,
            Some(record(&[("Warehouse", 0.0), ("Shop 02", 0.0)], 1)),
        ));
        assert_eq!(r.source_label, INSUFFICIENT_LABEL);
        assert_eq!(r.availability_label, "0");
        assert_eq!(r.command_qty, 10);
    }

    #[test]
    fn zero_order_with_empty_locations_falls_back_to_warehouse_branch() {
        let r = allocator().allocate(&item(0.0, Some(record(&[("Warehouse", 0.0)], 1))));
        assert_eq!(r.source, Source::Warehouse);
        assert_eq!(r.source_label, WAREHOUSE_LABEL);
        assert_eq!(r.availability_label, "0");
        assert_eq!(r.command_qty, 0);
    }

    #[test]
    fn missing_stock_record_is_not_available() {
        let r = allocator().allocate(&item(6.0, None));
        assert_eq!(r.source, Source::NotAvailable);
        assert_eq!(r.source_label, NOT_AVAILABLE_LABEL);
        assert_eq!(r.availability_label, "0");
        assert_eq!(r.command_qty, 10);
    }

    #[test]
    fn carton_policy_rounds_warehouse_orders_to_carton() {
        let a = Allocator::new("Shop 01", 5, RoundingPolicy::CartonWhenWarehouse);
        let wh = a.allocate(&item(6.0, Some(record(&[("Warehouse", 20.0)], 12))));
        assert_eq!(wh.command_qty, 12);

        let shop = a.allocate(&item(
            6.0,
            Some(record(&[("Warehouse", 0.0), ("Shop 02", 20.0)], 12)),
        ));
        assert_eq!(shop.command_qty, 10);
    }

    proptest! {
        #[test]
        fn rounding_is_idempotent_and_minimal(q in -100.0f64..10_000.0, step in 1u32..50) {
            let r = round_up_to_step(q, step);
            prop_assert_eq!(round_up_to_step(r as f64, step), r);
            prop_assert_eq!(r % u64::from(step), 0);
            if q <= 0.0 {
                prop_assert_eq!(r, 0);
            } else {
                prop_assert!(r as f64 >= q);
                prop_assert!((r as f64) - f64::from(step) < q);
            }
        }

        #[test]
        fn sufficient_warehouse_always_wins(
            order in 0.0f64..500.0,
            extra in 0.0f64..500.0,
            shop in 0.0f64..1_000.0,
        ) {
            let r = allocator().allocate(&item(
                order,
                Some(record(&[("Shop 02", shop), ("Warehouse", order + extra)], 1)),
            ));
            prop_assert_eq!(r.source, Source::Warehouse);
            if order + extra > 0.0 {
                prop_assert!(r.source_label.contains(WAREHOUSE_LABEL));
            }
        }
    }
}
