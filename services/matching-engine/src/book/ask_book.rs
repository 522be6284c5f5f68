//! Ask (sell-side) order book
//!
//! Maintains sell orders in a `BTreeMap` keyed by price; traversal is
//! ascending so the lowest ask comes first. At each price level, orders
//! are maintained in FIFO order.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::{LevelEntry, PriceLevel};

/// Ask (sell) side of an order book
///
/// A level is created lazily on first insert at its price and removed in
/// the same operation that empties it.
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    /// Create a new empty ask book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Rest an order's remaining amount on the book
    pub fn insert(&mut self, order: &Order) {
        let level = self.levels.entry(order.limit_price).or_default();
        level.push_back(LevelEntry {
            order_id: order.order_id.clone(),
            account_id: order.account_id.clone(),
            amount: order.amount,
            timestamp: order.timestamp,
        });
    }

    /// Remove a resting order located by `(price, order_id)`
    ///
    /// Returns true if the order was found and removed. A price that
    /// disagrees with where the order actually rests fails the lookup.
    pub fn remove(&mut self, order_id: &OrderId, price: Price) -> bool {
        if let Some(level) = self.levels.get_mut(&price) {
            if level.remove(order_id).is_some() {
                if level.is_empty() {
                    self.levels.remove(&price);
                }
                return true;
            }
        }
        false
    }

    /// Get the best ask price (lowest)
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Mutable access to the best (lowest-priced) level
    pub(crate) fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels
            .iter_mut()
            .next()
            .map(|(price, level)| (*price, level))
    }

    /// Drop a level that has been emptied by matching
    pub(crate) fn remove_level(&mut self, price: Price) {
        self.levels.remove(&price);
    }

    /// Levels in priority order (ascending price, best ask first)
    pub fn levels(&self) -> impl Iterator<Item = (&Price, &PriceLevel)> {
        self.levels.iter()
    }

    /// Check if the ask book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Total resting orders, counted by walking every level
    pub fn order_count(&self) -> usize {
        self.levels.values().map(|level| level.order_count()).sum()
    }

    /// Total resting amount, summed across all levels
    pub fn total_volume(&self) -> Quantity {
        self.levels
            .values()
            .fold(Quantity::zero(), |sum, level| sum + level.total_volume())
    }
}
