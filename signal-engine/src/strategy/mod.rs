//! Strategy module
//!
//! Signal vocabulary, the BUY/SELL classifier and post-signal confirmation.

pub mod base;
pub mod classifier;
pub mod confirmation;
pub mod signal;

pub use base::*;
pub use classifier::*;
pub use confirmation::*;
pub use signal::*;
