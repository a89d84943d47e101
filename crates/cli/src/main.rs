//! `restock`: run the replenishment engine over a JSON request.
//!
//! ```text
//! restock <request.json | -> [--status <filter>] [--search <text>]
//! ```
//!
//! The request carries both reports and the run parameters:
//! `{"sales": {...}, "stock": {...}, "sales_days": 2, "forecast_days": 2,
//! "selected_shop": "Shop 01"}`. The export report is printed to stdout as
//! JSON; logs go to stderr.

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

use restock_core::RunId;
use restock_infra::{InMemoryResultStore, ResultStore};
use restock_replenishment::{
    EngineConfig, ExportReport, ReplenishmentEngine, ResultFilter, RunParameters, StatusFilter,
    Table,
};

#[derive(Debug, Deserialize)]
struct RunRequest {
    sales: Table,
    stock: Table,
    #[serde(flatten)]
    params: RunParameters,
}

#[derive(Debug, Serialize)]
struct RunResponse {
    run_id: RunId,
    selected_shop: String,
    report: ExportReport,
}

#[derive(Parser, Debug)]
#[command(name = "restock")]
#[command(about = "Compute replenishment orders from sales and stock reports")]
#[command(version)]
struct Args {
    /// Request file, or `-` for stdin
    input: String,

    /// Status filter applied to the exported rows (e.g. "From Shops", zero-stock)
    #[arg(long, default_value = "all-orders")]
    status: StatusFilter,

    /// Case-insensitive item name search
    #[arg(long)]
    search: Option<String>,
}

impl Args {
    fn filter(&self) -> ResultFilter {
        ResultFilter::new(self.search.clone().unwrap_or_default(), self.status)
    }
}

fn read_request(input: &str) -> Result<RunRequest> {
    let raw = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading request file {input}"))?
    };
    serde_json::from_str(&raw).context("parsing run request")
}

fn execute<S: ResultStore>(
    engine: &ReplenishmentEngine,
    store: &S,
    request: RunRequest,
    filter: &ResultFilter,
) -> Result<RunResponse> {
    let replenishment = engine
        .run(&request.sales, &request.stock, &request.params)
        .context("processing error")?;
    let selected_shop = replenishment.selected_shop.clone();
    let filtered = filter.apply(&replenishment.results);

    let run_id = store.save(replenishment)?;
    let report = store.export(run_id, filtered)?;

    tracing::info!(
        %run_id,
        status = filter.status.label(),
        exported = report.filtered.len(),
        total = report.all.len(),
        "export prepared"
    );

    Ok(RunResponse {
        run_id,
        selected_shop,
        report,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    restock_observability::init();

    let config = EngineConfig::from_env().context("loading engine configuration")?;
    let engine = ReplenishmentEngine::new(config)?;
    let store = InMemoryResultStore::new();

    let request = read_request(&args.input)?;
    let response = execute(&engine, &store, request, &args.filter())?;

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &response).context("writing response")?;
    println!();
    Ok(())
}
