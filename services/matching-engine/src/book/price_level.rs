//! Price level implementation with FIFO queue
//!
//! A price level holds every resting order at one price on one side.
//! Entries are kept in strict arrival order; the head of the queue is
//! always the oldest maker and is consumed first.

use std::collections::VecDeque;
use types::ids::{AccountId, OrderId};
use types::numeric::Quantity;

/// A resting entry at a price level
///
/// The price itself lives in the side's keyed map; the entry carries
/// everything else the book needs to serialize or trade against it.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelEntry {
    pub order_id: OrderId,
    pub account_id: AccountId,
    pub amount: Quantity,
    pub timestamp: u64,
}

/// Result of consuming volume from the head of a level
#[derive(Debug, Clone)]
pub struct FrontFill {
    pub order_id: OrderId,
    pub account_id: AccountId,
    /// True when the maker was fully consumed and dequeued
    pub exhausted: bool,
}

/// A price level containing orders at a specific price
///
/// Maintains strict FIFO ordering for time-priority matching.
/// Invariant: `total_volume` equals the sum of entry amounts.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Queue of orders at this price level (FIFO order)
    orders: VecDeque<LevelEntry>,
    /// Total amount resting at this level
    total_volume: Quantity,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: VecDeque::new(),
            total_volume: Quantity::zero(),
        }
    }

    /// Append an entry at the back of the queue (time priority)
    pub fn push_back(&mut self, entry: LevelEntry) {
        self.total_volume = self.total_volume + entry.amount;
        self.orders.push_back(entry);
    }

    /// Remaining amount of the oldest entry, None when the level is empty
    pub fn front_amount(&self) -> Option<Quantity> {
        self.orders.front().map(|entry| entry.amount)
    }

    /// Consume `fill` from the head entry.
    ///
    /// Decrements both the entry and the level volume; a fully consumed
    /// maker is dequeued. Returns None when the level is empty or the
    /// fill exceeds what is resting, which on the matching path means an
    /// invariant breach the caller must escalate.
    pub fn fill_front(&mut self, fill: Quantity) -> Option<FrontFill> {
        let entry = self.orders.front_mut()?;
        let remaining = entry.amount.checked_sub(fill)?;
        let total = self.total_volume.checked_sub(fill)?;

        self.total_volume = total;
        let order_id = entry.order_id.clone();
        let account_id = entry.account_id.clone();
        let exhausted = remaining.is_zero();

        if exhausted {
            self.orders.pop_front();
        } else {
            entry.amount = remaining;
        }

        Some(FrontFill {
            order_id,
            account_id,
            exhausted,
        })
    }

    /// Remove an entry from the queue by order id
    ///
    /// Returns the removed entry's amount, or None if not found.
    pub fn remove(&mut self, order_id: &OrderId) -> Option<Quantity> {
        let position = self
            .orders
            .iter()
            .position(|entry| &entry.order_id == order_id)?;
        let entry = self.orders.remove(position)?;

        self.total_volume = self
            .total_volume
            .checked_sub(entry.amount)
            .unwrap_or_else(Quantity::zero);

        Some(entry.amount)
    }

    /// Entries in FIFO order (oldest first)
    pub fn entries(&self) -> impl Iterator<Item = &LevelEntry> {
        self.orders.iter()
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Total amount resting at this level
    pub fn total_volume(&self) -> Quantity {
        self.total_volume
    }

    /// Number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Recompute the entry sum, for integrity verification
    pub fn entry_sum(&self) -> Quantity {
        self.orders
            .iter()
            .fold(Quantity::zero(), |sum, entry| sum + entry.amount)
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}
