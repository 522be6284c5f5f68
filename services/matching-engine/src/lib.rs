//! Matching Engine
//!
//! Limit order book and price-time priority matching for spot pairs.
//!
//! **Key invariants:**
//! - Price-time priority strictly enforced: better prices first, FIFO
//!   within a price
//! - Deterministic matching (same inputs → same outputs)
//! - A price level never outlives its last order; an emptied level is
//!   removed in the same operation
//! - Conservation of amount: everything matched plus everything resting
//!   equals everything accepted

pub mod book;
pub mod engine;
pub mod matching;

pub use book::OrderBook;
pub use engine::MatchEngine;
