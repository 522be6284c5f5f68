//! Output document shapes
//!
//! The final book state serializes as one object per pair with bids in
//! descending price order and asks in ascending price order; within a
//! price, entries appear oldest first. Amounts and prices are canonical
//! decimal strings. Snapshotting never mutates the book, so repeated
//! serialization of the same state is byte-identical.

use serde::{Deserialize, Serialize};
use types::ids::{AccountId, OrderId};
use types::numeric::{Price, Quantity};

use matching_engine::book::{OrderBook, PriceLevel};

/// One resting order in the output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntry {
    pub order_id: OrderId,
    pub account_id: AccountId,
    pub amount: Quantity,
    pub limit_price: Price,
    pub timestamp: u64,
}

/// Both sides of one pair's book, in priority order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub bids: Vec<BookEntry>,
    pub asks: Vec<BookEntry>,
}

impl BookSnapshot {
    /// Flatten a book into serializable form
    pub fn from_book(book: &OrderBook) -> Self {
        Self {
            bids: collect_entries(book.bids.levels()),
            asks: collect_entries(book.asks.levels()),
        }
    }
}

fn collect_entries<'a>(
    levels: impl Iterator<Item = (&'a Price, &'a PriceLevel)>,
) -> Vec<BookEntry> {
    levels
        .flat_map(|(price, level)| {
            level.entries().map(move |entry| BookEntry {
                order_id: entry.order_id.clone(),
                account_id: entry.account_id.clone(),
                amount: entry.amount,
                limit_price: *price,
                timestamp: entry.timestamp,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::MarketId;
    use types::order::{Order, Side};

    fn order(id: &str, side: Side, price: &str, amount: &str, ts: u64) -> Order {
        Order {
            order_id: OrderId::new(id),
            account_id: AccountId::new("acct"),
            pair: MarketId::new("BTC/USDC"),
            side,
            amount: Quantity::from_str(amount).unwrap(),
            limit_price: Price::from_str(price).unwrap(),
            timestamp: ts,
        }
    }

    #[test]
    fn test_snapshot_priority_order() {
        let mut book = OrderBook::new(MarketId::new("BTC/USDC"));
        book.bids.insert(&order("b1", Side::Buy, "49000", "1", 1));
        book.bids.insert(&order("b2", Side::Buy, "50000", "1", 2));
        book.asks.insert(&order("a1", Side::Sell, "52000", "1", 3));
        book.asks.insert(&order("a2", Side::Sell, "51000", "1", 4));

        let snapshot = BookSnapshot::from_book(&book);

        let bid_ids: Vec<&str> = snapshot.bids.iter().map(|e| e.order_id.as_str()).collect();
        let ask_ids: Vec<&str> = snapshot.asks.iter().map(|e| e.order_id.as_str()).collect();
        assert_eq!(bid_ids, vec!["b2", "b1"]);
        assert_eq!(ask_ids, vec!["a2", "a1"]);
    }

    #[test]
    fn test_snapshot_fifo_within_level() {
        let mut book = OrderBook::new(MarketId::new("BTC/USDC"));
        book.bids.insert(&order("first", Side::Buy, "50000", "1", 1));
        book.bids.insert(&order("second", Side::Buy, "50000", "2", 2));

        let snapshot = BookSnapshot::from_book(&book);
        let ids: Vec<&str> = snapshot.bids.iter().map(|e| e.order_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_snapshot_serializes_canonical_strings() {
        let mut book = OrderBook::new(MarketId::new("BTC/USDC"));
        book.asks
            .insert(&order("a1", Side::Sell, "50000.00", "0.500", 1));

        let snapshot = BookSnapshot::from_book(&book);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["asks"][0]["limit_price"], "50000");
        assert_eq!(json["asks"][0]["amount"], "0.5");
        assert_eq!(json["asks"][0]["timestamp"], 1);
        assert_eq!(json["bids"], serde_json::json!([]));
    }

    #[test]
    fn test_snapshot_is_stable_across_serializations() {
        let mut book = OrderBook::new(MarketId::new("BTC/USDC"));
        book.bids.insert(&order("b1", Side::Buy, "50000", "1", 1));

        let snapshot = BookSnapshot::from_book(&book);
        let first = serde_json::to_string(&snapshot).unwrap();
        let second = serde_json::to_string(&BookSnapshot::from_book(&book)).unwrap();
        assert_eq!(first, second);
    }
}
