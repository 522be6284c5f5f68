//! Matching logic module
//!
//! Crossing detection and trade generation.

pub mod crossing;
pub mod executor;

pub use executor::TradeExecutor;
