//! Engine policy and per-run parameters.

use core::str::FromStr;

use restock_core::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

use crate::dataset::DatasetLimits;

pub const ENV_STEP_SIZE: &str = "RESTOCK_STEP_SIZE";
pub const ENV_MIN_STOCK: &str = "RESTOCK_MIN_STOCK";
pub const ENV_ROUNDING: &str = "RESTOCK_ROUNDING";
pub const ENV_MAX_ROWS: &str = "RESTOCK_MAX_ROWS";
pub const ENV_MAX_COLUMNS: &str = "RESTOCK_MAX_COLUMNS";

/// How the final command quantity is rounded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Round every order up to the fixed step size.
    #[default]
    FixedStep,
    /// Round warehouse-sourced orders up to the item's carton size and
    /// everything else to the fixed step.
    CartonWhenWarehouse,
}

impl FromStr for RoundingPolicy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fixed_step" | "step" => Ok(RoundingPolicy::FixedStep),
            "carton_when_warehouse" | "carton" => Ok(RoundingPolicy::CartonWhenWarehouse),
            other => Err(EngineError::configuration(format!(
                "unknown rounding policy '{other}'"
            ))),
        }
    }
}

/// Engine-wide policy. Stable across runs; usually loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Order multiple for the fixed-step rounding.
    pub step_size: u32,
    /// Stock below this level triggers a top-up when there is no sales signal.
    pub min_stock_level: f64,
    pub rounding: RoundingPolicy,
    pub limits: DatasetLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_size: 5,
            min_stock_level: 10.0,
            rounding: RoundingPolicy::default(),
            limits: DatasetLimits::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `RESTOCK_*` environment variables.
    pub fn from_env() -> EngineResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each
    /// `RESTOCK_*` key.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_STEP_SIZE) {
            config.step_size = parse_var(ENV_STEP_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MIN_STOCK) {
            config.min_stock_level = parse_var(ENV_MIN_STOCK, &raw)?;
        }
        if let Some(raw) = lookup(ENV_ROUNDING) {
            config.rounding = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_MAX_ROWS) {
            config.limits.max_rows = parse_limit(ENV_MAX_ROWS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_COLUMNS) {
            config.limits.max_columns = parse_limit(ENV_MAX_COLUMNS, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.step_size == 0 {
            return Err(EngineError::configuration("step_size must be at least 1"));
        }
        if !(self.min_stock_level.is_finite() && self.min_stock_level >= 0.0) {
            return Err(EngineError::configuration(
                "min_stock_level must be a finite non-negative number",
            ));
        }
        if self.limits.max_columns == Some(0) {
            return Err(EngineError::configuration(
                "max_columns must keep at least the item column",
            ));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> EngineResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| EngineError::configuration(format!("{key}: cannot parse '{raw}'")))
}

fn parse_limit(key: &str, raw: &str) -> EngineResult<Option<usize>> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "none" | "unlimited" => Ok(None),
        _ => parse_var(key, raw).map(Some),
    }
}

/// Caller-supplied parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParameters {
    /// Length of the sales window in days (clamped to at least 1).
    pub sales_days: u32,
    /// Forecast horizon in days.
    pub forecast_days: u32,
    /// Shop placing the order; never considered as its own supplier.
    pub selected_shop: String,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            sales_days: 2,
            forecast_days: 2,
            selected_shop: "Shop 01".to_string(),
        }
    }
}

impl RunParameters {
    pub fn new(sales_days: u32, forecast_days: u32, selected_shop: impl Into<String>) -> Self {
        Self {
            sales_days,
            forecast_days,
            selected_shop: selected_shop.into(),
        }
    }

    pub fn effective_sales_days(&self) -> u32 {
        self.sales_days.max(1)
    }
}
