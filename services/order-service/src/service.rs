//! Order book service
//!
//! Owns the per-pair books and the global trade log, and drives every
//! command through the matching engine. Commands are processed strictly
//! in input order; each one runs to completion before the next begins,
//! so a fresh service fed the same sequence produces bit-identical
//! output documents.

use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};
use types::errors::ServiceError;
use types::ids::OrderId;
use types::order::{Order, OrderCommand, TypeOp};
use types::trade::Trade;

use matching_engine::{MatchEngine, OrderBook};

use crate::snapshot::BookSnapshot;
use crate::validator;

/// What a single command did to the book
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// CREATE accepted; `trades` fills were generated and the residual
    /// rested if `rested` is true
    Created {
        order_id: OrderId,
        trades: usize,
        rested: bool,
    },
    /// DELETE found and removed its resting order
    Canceled { order_id: OrderId },
    /// DELETE failed its locator lookup; the book is unchanged
    CancelRejected { order_id: OrderId },
}

/// Totals for a completed batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub commands: usize,
    pub trades: usize,
    pub books: usize,
}

/// The order book service
///
/// Exclusive owner of the books and the append-only trade log. The
/// ingestion clock is a plain counter: wall time never enters the engine,
/// which is what keeps replays identical.
pub struct OrderBookService {
    books: HashMap<String, OrderBook>,
    trades: Vec<Trade>,
    engine: MatchEngine,
    clock: u64,
}

impl OrderBookService {
    /// Create a service with no books, no trades, and the clock at zero
    pub fn new() -> Self {
        Self {
            books: HashMap::new(),
            trades: Vec::new(),
            engine: MatchEngine::new(),
            clock: 0,
        }
    }

    /// Process a single command.
    ///
    /// Validates, promotes to an order with the next ingestion timestamp,
    /// creates the pair's book if this is its first command, and
    /// dispatches. CREATE matches first and rests any non-zero residual;
    /// DELETE cancels by exact `(side, limit_price, order_id)` locator,
    /// and a failed cancel is an outcome, not an error.
    pub fn process(&mut self, command: &OrderCommand) -> Result<CommandOutcome, ServiceError> {
        let validated = validator::validate(command)?;

        self.clock += 1;
        let mut order = Order {
            order_id: validated.order_id,
            account_id: validated.account_id,
            pair: validated.pair,
            side: validated.side,
            amount: validated.amount,
            limit_price: validated.limit_price,
            timestamp: self.clock,
        };

        let book = self
            .books
            .entry(order.pair.as_str().to_string())
            .or_insert_with(|| OrderBook::new(order.pair.clone()));

        match validated.type_op {
            TypeOp::Create => {
                let trades = self.engine.match_order(&mut order, book)?;
                let fills = trades.len();
                self.trades.extend(trades);

                let rested = !order.amount.is_zero();
                if rested {
                    self.engine.rest(&order, book);
                }

                debug!(
                    order_id = %order.order_id,
                    pair = %order.pair,
                    side = order.side.as_str(),
                    fills,
                    rested,
                    "processed CREATE"
                );

                Ok(CommandOutcome::Created {
                    order_id: order.order_id,
                    trades: fills,
                    rested,
                })
            }
            TypeOp::Delete => {
                if self.engine.cancel(&order, book) {
                    debug!(order_id = %order.order_id, pair = %order.pair, "processed DELETE");
                    Ok(CommandOutcome::Canceled {
                        order_id: order.order_id,
                    })
                } else {
                    warn!(
                        order_id = %order.order_id,
                        pair = %order.pair,
                        side = order.side.as_str(),
                        limit_price = %order.limit_price,
                        "cancel found no matching resting order"
                    );
                    Ok(CommandOutcome::CancelRejected {
                        order_id: order.order_id,
                    })
                }
            }
        }
    }

    /// Process a batch of commands in input order.
    ///
    /// Stops at the first error; everything processed up to that point
    /// remains applied.
    pub fn process_all(&mut self, commands: &[OrderCommand]) -> Result<BatchSummary, ServiceError> {
        for command in commands {
            self.process(command)?;
        }

        Ok(BatchSummary {
            commands: commands.len(),
            trades: self.trades.len(),
            books: self.books.len(),
        })
    }

    /// All trades in emission order
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// A pair's book, if any command has referenced it
    pub fn book(&self, pair: &str) -> Option<&OrderBook> {
        self.books.get(pair)
    }

    /// Snapshot every book for the output document, keyed by pair.
    ///
    /// The result is ordered by pair so repeated serialization of the
    /// same state is byte-identical.
    pub fn book_snapshots(&self) -> BTreeMap<String, BookSnapshot> {
        self.books
            .iter()
            .map(|(pair, book)| (pair.clone(), BookSnapshot::from_book(book)))
            .collect()
    }
}

impl Default for OrderBookService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::errors::ValidationError;
    use types::numeric::{Price, Quantity};

    fn create(id: &str, account: &str, side: &str, amount: &str, price: &str) -> OrderCommand {
        OrderCommand {
            type_op: "CREATE".to_string(),
            account_id: account.to_string(),
            order_id: id.to_string(),
            pair: "BTC/USDC".to_string(),
            side: side.to_string(),
            amount: amount.to_string(),
            limit_price: price.to_string(),
        }
    }

    fn delete(id: &str, account: &str, side: &str, amount: &str, price: &str) -> OrderCommand {
        OrderCommand {
            type_op: "DELETE".to_string(),
            ..create(id, account, side, amount, price)
        }
    }

    #[test]
    fn test_create_rests_non_marketable_order() {
        let mut service = OrderBookService::new();
        let outcome = service
            .process(&create("1", "a", "BUY", "10", "50000"))
            .unwrap();

        assert_eq!(
            outcome,
            CommandOutcome::Created {
                order_id: OrderId::new("1"),
                trades: 0,
                rested: true,
            }
        );
        let book = service.book("BTC/USDC").unwrap();
        assert_eq!(book.best_bid(), Some(Price::from_u64(50000)));
    }

    #[test]
    fn test_create_matches_then_rests_residual() {
        let mut service = OrderBookService::new();
        service
            .process(&create("S1", "2", "SELL", "10", "50000"))
            .unwrap();
        let outcome = service
            .process(&create("B1", "1", "BUY", "15", "50500"))
            .unwrap();

        assert_eq!(
            outcome,
            CommandOutcome::Created {
                order_id: OrderId::new("B1"),
                trades: 1,
                rested: true,
            }
        );
        assert_eq!(service.trades().len(), 1);
        assert_eq!(
            service.trades()[0].amount,
            Quantity::from_str("10").unwrap()
        );

        let book = service.book("BTC/USDC").unwrap();
        assert!(book.asks.is_empty());
        assert_eq!(
            book.bids.total_volume(),
            Quantity::from_str("5").unwrap()
        );
    }

    #[test]
    fn test_delete_of_missing_order_is_not_an_error() {
        let mut service = OrderBookService::new();
        let outcome = service
            .process(&delete("ghost", "a", "BUY", "10", "50000"))
            .unwrap();

        assert_eq!(
            outcome,
            CommandOutcome::CancelRejected {
                order_id: OrderId::new("ghost"),
            }
        );
    }

    #[test]
    fn test_invalid_command_rejected_without_state_change() {
        let mut service = OrderBookService::new();
        let mut bad = create("1", "a", "BUY", "10", "50000");
        bad.amount = "-10".to_string();

        let err = service.process(&bad).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::Numeric { field: "amount", .. })
        ));
        // No book was created and the clock did not advance
        assert!(service.book("BTC/USDC").is_none());

        service.process(&create("1", "a", "BUY", "10", "50000")).unwrap();
        let book = service.book("BTC/USDC").unwrap();
        let snapshot = BookSnapshot::from_book(book);
        assert_eq!(snapshot.bids[0].timestamp, 1);
    }

    #[test]
    fn test_books_created_lazily_per_pair() {
        let mut service = OrderBookService::new();
        service
            .process(&create("1", "a", "BUY", "10", "50000"))
            .unwrap();

        let mut eth = create("2", "a", "BUY", "10", "3000");
        eth.pair = "ETH/USDC".to_string();
        service.process(&eth).unwrap();

        assert!(service.book("BTC/USDC").is_some());
        assert!(service.book("ETH/USDC").is_some());
        assert!(service.book("SOL/USDC").is_none());
    }

    #[test]
    fn test_timestamps_are_monotonic_across_pairs() {
        let mut service = OrderBookService::new();
        service
            .process(&create("1", "a", "BUY", "10", "50000"))
            .unwrap();

        let mut eth = create("2", "a", "BUY", "10", "3000");
        eth.pair = "ETH/USDC".to_string();
        service.process(&eth).unwrap();

        let btc = service.book_snapshots()["BTC/USDC"].clone();
        let eth = service.book_snapshots()["ETH/USDC"].clone();
        assert_eq!(btc.bids[0].timestamp, 1);
        assert_eq!(eth.bids[0].timestamp, 2);
    }

    #[test]
    fn test_process_all_summary() {
        let mut service = OrderBookService::new();
        let commands = vec![
            create("S1", "2", "SELL", "10", "50000"),
            create("B1", "1", "BUY", "15", "50500"),
        ];

        let summary = service.process_all(&commands).unwrap();
        assert_eq!(
            summary,
            BatchSummary {
                commands: 2,
                trades: 1,
                books: 1,
            }
        );
    }
}
