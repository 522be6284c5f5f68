//! Order book infrastructure module
//!
//! Contains price levels, the bid and ask sides, and the per-pair book
//! that composes them.

pub mod ask_book;
pub mod bid_book;
pub mod price_level;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use price_level::{FrontFill, LevelEntry, PriceLevel};

use rust_decimal::Decimal;
use types::errors::MatchingError;
use types::ids::MarketId;
use types::numeric::{Price, Quantity};
use types::order::Side;

/// Order book for a single trading pair
///
/// Created lazily on the first command referencing its pair. All mutation
/// goes through the matching engine; the book itself only exposes state.
#[derive(Debug, Clone)]
pub struct OrderBook {
    pub symbol: MarketId,
    pub bids: BidBook,
    pub asks: AskBook,
}

impl OrderBook {
    /// Create a book with two empty sides
    pub fn new(symbol: MarketId) -> Self {
        Self {
            symbol,
            bids: BidBook::new(),
            asks: AskBook::new(),
        }
    }

    /// Best bid price (highest resting buy)
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Best ask price (lowest resting sell)
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Spread (best ask − best bid), None when either side is empty
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.as_decimal() - bid.as_decimal()),
            _ => None,
        }
    }

    /// Check if both sides are empty
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Total resting orders across both sides (walks every level)
    pub fn order_count(&self) -> usize {
        self.bids.order_count() + self.asks.order_count()
    }

    /// Total resting amount across both sides
    pub fn total_volume(&self) -> Quantity {
        self.bids.total_volume() + self.asks.total_volume()
    }

    /// Verify the book's structural invariants.
    ///
    /// Checks that no empty level is retained, that every level's volume
    /// equals the sum of its entries, and that the book is not crossed.
    /// A failure here is a bug in the engine, not a property of the input.
    pub fn check_integrity(&self) -> Result<(), MatchingError> {
        check_side(Side::Buy, self.bids.levels())?;
        check_side(Side::Sell, self.asks.levels())?;

        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            if bid >= ask {
                return Err(MatchingError::CrossedBook {
                    best_bid: bid.canonical(),
                    best_ask: ask.canonical(),
                });
            }
        }

        Ok(())
    }
}

/// Level checks shared by both sides
fn check_side<'a>(
    side: Side,
    levels: impl Iterator<Item = (&'a Price, &'a PriceLevel)>,
) -> Result<(), MatchingError> {
    for (price, level) in levels {
        if level.is_empty() {
            return Err(MatchingError::EmptyLevelRetained {
                price: price.canonical(),
                side: side.as_str().to_string(),
            });
        }
        let sum = level.entry_sum();
        if sum != level.total_volume() {
            return Err(MatchingError::VolumeMismatch {
                price: price.canonical(),
                total: level.total_volume().canonical(),
                sum: sum.canonical(),
            });
        }
    }
    Ok(())
}
