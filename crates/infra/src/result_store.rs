//! Per-run result storage.
//!
//! Each completed run is stored under its own [`RunId`]; the export step
//! names the run it wants instead of reading whatever ran last.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use restock_core::RunId;
use restock_replenishment::{ExportReport, OrderResult, Replenishment};

/// A stored run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredRun {
    pub run_id: RunId,
    pub stored_at: DateTime<Utc>,
    pub replenishment: Replenishment,
}

/// Result store error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResultStoreError {
    #[error("run not found: {0}")]
    NotFound(RunId),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result store abstraction.
pub trait ResultStore: Send + Sync {
    /// Store a completed run and hand back its handle.
    fn save(&self, replenishment: Replenishment) -> Result<RunId, ResultStoreError>;

    /// Get a run by handle.
    fn get(&self, run_id: RunId) -> Result<Option<Arc<StoredRun>>, ResultStoreError>;

    /// Drop a run; returns whether it existed.
    fn remove(&self, run_id: RunId) -> Result<bool, ResultStoreError>;

    /// Handles of all stored runs, oldest first.
    fn list(&self) -> Result<Vec<RunId>, ResultStoreError>;

    /// Build the export for `run_id` from the rows the caller kept.
    fn export(
        &self,
        run_id: RunId,
        filtered: Vec<OrderResult>,
    ) -> Result<ExportReport, ResultStoreError> {
        let run = self.get(run_id)?.ok_or(ResultStoreError::NotFound(run_id))?;
        Ok(ExportReport::build(filtered, Some(&run.replenishment.results)))
    }
}

impl<S> ResultStore for Arc<S>
where
    S: ResultStore + ?Sized,
{
    fn save(&self, replenishment: Replenishment) -> Result<RunId, ResultStoreError> {
        (**self).save(replenishment)
    }

    fn get(&self, run_id: RunId) -> Result<Option<Arc<StoredRun>>, ResultStoreError> {
        (**self).get(run_id)
    }

    fn remove(&self, run_id: RunId) -> Result<bool, ResultStoreError> {
        (**self).remove(run_id)
    }

    fn list(&self) -> Result<Vec<RunId>, ResultStoreError> {
        (**self).list()
    }
}

/// In-memory result store.
#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    runs: RwLock<HashMap<RunId, Arc<StoredRun>>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

fn poisoned<T>(_: T) -> ResultStoreError {
    ResultStoreError::Storage("result store lock poisoned".to_string())
}

impl ResultStore for InMemoryResultStore {
    fn save(&self, replenishment: Replenishment) -> Result<RunId, ResultStoreError> {
        let run_id = RunId::new();
        let run = StoredRun {
            run_id,
            stored_at: Utc::now(),
            replenishment,
        };
        let mut runs = self.runs.write().map_err(poisoned)?;
        runs.insert(run_id, Arc::new(run));
        debug!(%run_id, stored = runs.len(), "run stored");
        Ok(run_id)
    }

    fn get(&self, run_id: RunId) -> Result<Option<Arc<StoredRun>>, ResultStoreError> {
        let runs = self.runs.read().map_err(poisoned)?;
        Ok(runs.get(&run_id).cloned())
    }

    fn remove(&self, run_id: RunId) -> Result<bool, ResultStoreError> {
        let mut runs = self.runs.write().map_err(poisoned)?;
        Ok(runs.remove(&run_id).is_some())
    }

    fn list(&self) -> Result<Vec<RunId>, ResultStoreError> {
        let runs = self.runs.read().map_err(poisoned)?;
        // UUIDv7 handles sort by creation time.
        let mut ids: Vec<RunId> = runs.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}
