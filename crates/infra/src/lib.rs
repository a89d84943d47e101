//! Infrastructure around the replenishment engine.
//!
//! Nothing here computes orders; it only keeps completed runs around so a
//! later step (export, re-filtering) can address them by handle.

pub mod result_store;

pub use result_store::{InMemoryResultStore, ResultStore, ResultStoreError, StoredRun};
