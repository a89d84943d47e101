//! Replenishment engine.
//!
//! Reconciles a sales report with a multi-location stock report, forecasts
//! near-term demand per item and decides where each order should be sourced
//! from (the warehouse or a peer shop). Pure domain logic: no I/O, no
//! shared state between runs.

pub mod allocate;
pub mod columns;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod filter;
pub mod forecast;
pub mod normalize;
pub mod reconcile;
pub mod records;
pub mod report;
pub mod summary;

pub use allocate::{Allocator, OrderResult, Source, round_up_to_step};
pub use columns::{ColumnRole, LocationKind, find_column};
pub use config::{EngineConfig, RoundingPolicy, RunParameters};
pub use dataset::{Cell, DatasetLimits, Table};
pub use engine::{Replenishment, ReplenishmentEngine, compute_orders};
pub use filter::{ResultFilter, StatusFilter};
pub use forecast::Forecast;
pub use reconcile::{ItemOrigin, ReconciledItem, Reconciler};
pub use records::{LocationQty, SalesRecord, StockRecord};
pub use report::ExportReport;
pub use summary::{Metric, ResultSummary};
