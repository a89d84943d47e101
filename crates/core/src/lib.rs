//! `restock-core`: shared building blocks for the replenishment engine.
//!
//! This crate carries no I/O: only the error taxonomy and identifiers that
//! every other crate agrees on.

pub mod error;
pub mod id;

pub use error::{EngineError, EngineResult};
pub use id::RunId;
