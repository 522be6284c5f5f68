//! Trade types
//!
//! A trade is the atomic exchange between a resting maker and an incoming
//! taker. Trades are append-only: once emitted they are never mutated, and
//! the struct serializes field-for-field as one element of the trades
//! output document.

use crate::ids::{AccountId, MarketId, OrderId, TradeId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// An executed trade
///
/// `price` is always the maker's resting limit price; `timestamp` is the
/// taker's ingestion timestamp. `trade_id` values form the sequence
/// 1, 2, 3, … in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: TradeId,
    pub pair: MarketId,

    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,

    pub maker_account_id: AccountId,
    pub taker_account_id: AccountId,

    pub amount: Quantity,
    pub price: Price,
    pub timestamp: u64,
}

impl Trade {
    /// Notional value (price × amount)
    pub fn trade_value(&self) -> rust_decimal::Decimal {
        self.amount * self.price
    }

    /// Whether maker and taker are the same account
    ///
    /// Permitted; trades are emitted for self-crossings like any other.
    pub fn is_self_trade(&self) -> bool {
        self.maker_account_id == self.taker_account_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn make_trade() -> Trade {
        Trade {
            trade_id: TradeId::new(1),
            pair: MarketId::new("BTC/USDC"),
            maker_order_id: OrderId::new("S1"),
            taker_order_id: OrderId::new("B1"),
            maker_account_id: AccountId::new("2"),
            taker_account_id: AccountId::new("1"),
            amount: Quantity::from_str("0.5").unwrap(),
            price: Price::from_u64(50000),
            timestamp: 2,
        }
    }

    #[test]
    fn test_trade_value() {
        assert_eq!(make_trade().trade_value(), Decimal::from(25000));
    }

    #[test]
    fn test_self_trade_detection() {
        let mut trade = make_trade();
        assert!(!trade.is_self_trade());
        trade.taker_account_id = AccountId::new("2");
        assert!(trade.is_self_trade());
    }

    #[test]
    fn test_trade_serialization_shape() {
        let trade = make_trade();
        let json = serde_json::to_value(&trade).unwrap();

        assert_eq!(json["trade_id"], "1");
        assert_eq!(json["pair"], "BTC/USDC");
        assert_eq!(json["maker_order_id"], "S1");
        assert_eq!(json["taker_order_id"], "B1");
        assert_eq!(json["amount"], "0.5");
        assert_eq!(json["price"], "50000");
        assert_eq!(json["timestamp"], 2);
    }
}
