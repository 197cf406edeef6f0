//! Configuration module

pub mod engine;
pub mod indicators;
pub mod timeframe;

pub use engine::*;
pub use indicators::*;
pub use timeframe::*;
