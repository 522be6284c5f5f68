//! Matching engine core
//!
//! Price-time priority matching over a single order book. The engine is
//! stateless apart from the trade id counter: every operation takes the
//! book it mutates, and domain outcomes (no match, failed cancel) are
//! values, never errors.

use rust_decimal::Decimal;
use tracing::debug;
use types::errors::MatchingError;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::trade::Trade;

use crate::book::OrderBook;
use crate::matching::{crossing, TradeExecutor};

/// Price-time priority matching engine
pub struct MatchEngine {
    executor: TradeExecutor,
}

impl MatchEngine {
    /// Create an engine whose first trade id is 1
    pub fn new() -> Self {
        Self {
            executor: TradeExecutor::new(),
        }
    }

    /// Match an incoming order against the opposite side of the book.
    ///
    /// Walks opposite levels best-first, consuming maker entries in FIFO
    /// order. Each fill decrements `order.amount` in place, so after the
    /// call the order carries exactly the unmatched residual. Consumed
    /// makers are dequeued and emptied levels are removed before the
    /// walk moves on. Trades are returned in the order they were
    /// generated.
    pub fn match_order(
        &mut self,
        order: &mut Order,
        book: &mut OrderBook,
    ) -> Result<Vec<Trade>, MatchingError> {
        match order.side {
            Side::Buy => Self::match_buy_impl(&mut self.executor, order, book),
            Side::Sell => Self::match_sell_impl(&mut self.executor, order, book),
        }
    }

    /// Match an incoming buy against the asks, lowest price first
    fn match_buy_impl(
        executor: &mut TradeExecutor,
        order: &mut Order,
        book: &mut OrderBook,
    ) -> Result<Vec<Trade>, MatchingError> {
        let mut trades = Vec::new();

        while !order.is_filled() {
            let Some((level_price, level)) = book.asks.best_level_mut() else {
                break;
            };
            if !crossing::taker_crosses(Side::Buy, order.limit_price, level_price) {
                // Every remaining ask is priced higher still
                break;
            }

            while let Some(maker_amount) = level.front_amount() {
                let fill = order.amount.min(maker_amount);
                let maker = level.fill_front(fill).ok_or_else(|| {
                    MatchingError::VolumeUnderflow {
                        price: level_price.canonical(),
                    }
                })?;
                order.fill(fill)?;

                let trade = executor.execute_trade(
                    book.symbol.clone(),
                    maker.order_id,
                    maker.account_id,
                    order,
                    level_price,
                    fill,
                );
                debug!(
                    trade_id = %trade.trade_id,
                    pair = %trade.pair,
                    price = %trade.price,
                    amount = %trade.amount,
                    "fill"
                );
                trades.push(trade);

                if order.is_filled() {
                    break;
                }
            }

            if level.is_empty() {
                book.asks.remove_level(level_price);
            }
        }

        Ok(trades)
    }

    /// Match an incoming sell against the bids, highest price first
    fn match_sell_impl(
        executor: &mut TradeExecutor,
        order: &mut Order,
        book: &mut OrderBook,
    ) -> Result<Vec<Trade>, MatchingError> {
        let mut trades = Vec::new();

        while !order.is_filled() {
            let Some((level_price, level)) = book.bids.best_level_mut() else {
                break;
            };
            if !crossing::taker_crosses(Side::Sell, order.limit_price, level_price) {
                // Every remaining bid is priced lower still
                break;
            }

            while let Some(maker_amount) = level.front_amount() {
                let fill = order.amount.min(maker_amount);
                let maker = level.fill_front(fill).ok_or_else(|| {
                    MatchingError::VolumeUnderflow {
                        price: level_price.canonical(),
                    }
                })?;
                order.fill(fill)?;

                let trade = executor.execute_trade(
                    book.symbol.clone(),
                    maker.order_id,
                    maker.account_id,
                    order,
                    level_price,
                    fill,
                );
                debug!(
                    trade_id = %trade.trade_id,
                    pair = %trade.pair,
                    price = %trade.price,
                    amount = %trade.amount,
                    "fill"
                );
                trades.push(trade);

                if order.is_filled() {
                    break;
                }
            }

            if level.is_empty() {
                book.bids.remove_level(level_price);
            }
        }

        Ok(trades)
    }

    /// Rest an order's residual on its own side of the book
    ///
    /// The caller only rests a non-zero residual; a level is created
    /// lazily when the price is new to the side.
    pub fn rest(&self, order: &Order, book: &mut OrderBook) {
        debug_assert!(!order.amount.is_zero(), "resting a fully matched order");
        match order.side {
            Side::Buy => book.bids.insert(order),
            Side::Sell => book.asks.insert(order),
        }
    }

    /// Cancel a resting order located by `(side, limit_price, order_id)`.
    ///
    /// All three locator fields must agree with the resting entry; any
    /// disagreement returns false and leaves the book unchanged. There is
    /// no fallback lookup by order id alone.
    pub fn cancel(&self, order: &Order, book: &mut OrderBook) -> bool {
        match order.side {
            Side::Buy => book.bids.remove(&order.order_id, order.limit_price),
            Side::Sell => book.asks.remove(&order.order_id, order.limit_price),
        }
    }

    /// Best bid price of a book
    pub fn best_bid(&self, book: &OrderBook) -> Option<Price> {
        book.best_bid()
    }

    /// Best ask price of a book
    pub fn best_ask(&self, book: &OrderBook) -> Option<Price> {
        book.best_ask()
    }

    /// Spread of a book, None when either side is empty
    pub fn spread(&self, book: &OrderBook) -> Option<Decimal> {
        book.spread()
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new()
    }
}
