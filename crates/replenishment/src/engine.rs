//! Engine entry point.
//!
//! Pipeline: limit datasets → resolve columns and extract records → join
//! by item → allocate a source per item → summarize. Pure and synchronous;
//! either the whole result set is produced or the run fails.

use restock_core::EngineResult;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::allocate::{Allocator, OrderResult};
use crate::config::{EngineConfig, RunParameters};
use crate::dataset::Table;
use crate::reconcile::Reconciler;
use crate::records::{sales_records, stock_records};
use crate::summary::ResultSummary;

/// Output of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replenishment {
    pub selected_shop: String,
    pub results: Vec<OrderResult>,
    pub summary: ResultSummary,
}

#[derive(Debug, Clone, Default)]
pub struct ReplenishmentEngine {
    config: EngineConfig,
}

impl ReplenishmentEngine {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[tracing::instrument(
        name = "replenishment.run",
        skip(self, sales, stock),
        fields(
            sales_rows = sales.len(),
            stock_rows = stock.len(),
            sales_days = params.sales_days,
            forecast_days = params.forecast_days,
            selected_shop = %params.selected_shop,
        )
    )]
    pub fn run(
        &self,
        sales: &Table,
        stock: &Table,
        params: &RunParameters,
    ) -> EngineResult<Replenishment> {
        let limits = &self.config.limits;
        let sales = sales.limited("sales", limits).without_blank_rows();
        let stock = stock.limited("stock", limits);

        let sales_book = sales_records(&sales)?;
        let stock_book = stock_records(&stock)?;

        let reconciler = Reconciler::new(
            params.effective_sales_days(),
            params.forecast_days,
            self.config.min_stock_level,
        );
        let allocator = Allocator::new(
            params.selected_shop.clone(),
            self.config.step_size,
            self.config.rounding,
        );

        let results: Vec<OrderResult> = reconciler
            .reconcile(&sales_book, &stock_book)
            .iter()
            .map(|item| allocator.allocate(item))
            .collect();

        let summary = ResultSummary::from_results(&results);
        info!(
            items = summary.total_items,
            low_stock = summary.low_stock_count,
            zero_stock = summary.zero_stock_count,
            orders = summary.order_needed_count,
            "replenishment run complete"
        );

        Ok(Replenishment {
            selected_shop: params.selected_shop.clone(),
            results,
            summary,
        })
    }
}

/// One-shot run with the default engine policy.
pub fn compute_orders(
    sales: &Table,
    stock: &Table,
    sales_days: u32,
    forecast_days: u32,
    selected_shop: &str,
) -> EngineResult<Replenishment> {
    ReplenishmentEngine::default().run(
        sales,
        stock,
        &RunParameters::new(sales_days, forecast_days, selected_shop),
    )
}
