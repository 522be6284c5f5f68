//! Trade generation
//!
//! Builds trades from fills and owns the monotonic trade id counter. The
//! execution price is always the maker's resting price; maker and taker
//! trading for the same account is permitted and produces an ordinary
//! trade.

use types::ids::{AccountId, MarketId, OrderId, TradeId};
use types::numeric::{Price, Quantity};
use types::order::Order;
use types::trade::Trade;

/// Trade factory with monotonic id assignment
///
/// Ids start at 1 and increase by one per trade, in emission order.
#[derive(Debug)]
pub struct TradeExecutor {
    next_trade_id: u64,
}

impl TradeExecutor {
    /// Create an executor whose first trade id is 1
    pub fn new() -> Self {
        Self { next_trade_id: 1 }
    }

    fn next_id(&mut self) -> TradeId {
        let id = TradeId::new(self.next_trade_id);
        self.next_trade_id += 1;
        id
    }

    /// Build a trade for a fill between a resting maker and the taker
    pub fn execute_trade(
        &mut self,
        pair: MarketId,
        maker_order_id: OrderId,
        maker_account_id: AccountId,
        taker: &Order,
        price: Price,
        amount: Quantity,
    ) -> Trade {
        Trade {
            trade_id: self.next_id(),
            pair,
            maker_order_id,
            taker_order_id: taker.order_id.clone(),
            maker_account_id,
            taker_account_id: taker.account_id.clone(),
            amount,
            price,
            timestamp: taker.timestamp,
        }
    }
}

impl Default for TradeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::order::Side;

    fn taker(id: &str, account: &str, ts: u64) -> Order {
        Order {
            order_id: OrderId::new(id),
            account_id: AccountId::new(account),
            pair: MarketId::new("BTC/USDC"),
            side: Side::Buy,
            amount: Quantity::from_str("1").unwrap(),
            limit_price: Price::from_u64(50000),
            timestamp: ts,
        }
    }

    #[test]
    fn test_trade_ids_start_at_one_and_increase() {
        let mut executor = TradeExecutor::new();
        let order = taker("B1", "1", 5);

        let t1 = executor.execute_trade(
            MarketId::new("BTC/USDC"),
            OrderId::new("S1"),
            AccountId::new("2"),
            &order,
            Price::from_u64(50000),
            Quantity::from_str("0.5").unwrap(),
        );
        let t2 = executor.execute_trade(
            MarketId::new("BTC/USDC"),
            OrderId::new("S2"),
            AccountId::new("2"),
            &order,
            Price::from_u64(50000),
            Quantity::from_str("0.5").unwrap(),
        );

        assert_eq!(t1.trade_id, TradeId::new(1));
        assert_eq!(t2.trade_id, TradeId::new(2));
    }

    #[test]
    fn test_trade_carries_maker_price_and_taker_timestamp() {
        let mut executor = TradeExecutor::new();
        let order = taker("B1", "1", 42);

        let trade = executor.execute_trade(
            MarketId::new("BTC/USDC"),
            OrderId::new("S1"),
            AccountId::new("2"),
            &order,
            Price::from_u64(49500),
            Quantity::from_str("0.25").unwrap(),
        );

        assert_eq!(trade.price, Price::from_u64(49500));
        assert_eq!(trade.timestamp, 42);
        assert_eq!(trade.maker_order_id, OrderId::new("S1"));
        assert_eq!(trade.taker_order_id, OrderId::new("B1"));
    }

    #[test]
    fn test_self_trade_is_permitted() {
        let mut executor = TradeExecutor::new();
        let order = taker("B1", "1", 5);

        let trade = executor.execute_trade(
            MarketId::new("BTC/USDC"),
            OrderId::new("S1"),
            AccountId::new("1"),
            &order,
            Price::from_u64(50000),
            Quantity::from_str("0.5").unwrap(),
        );

        assert!(trade.is_self_trade());
    }
}
