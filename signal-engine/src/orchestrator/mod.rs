//! Orchestrator module
//!
//! Drives fetch → indicators → classification → confirmation across the
//! instrument list and folds per-instrument outcomes into a batch.

pub mod batch;
pub mod runner;

pub use batch::*;
pub use runner::*;
