//! Crossing detection logic
//!
//! Determines when an incoming order is price-compatible with a resting
//! level. The walk over the opposite side halts on the first failure,
//! since every later price is strictly worse for the taker.

use types::numeric::Price;
use types::order::Side;

/// Check if a bid and ask can trade at given prices
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming order crosses a resting maker price
///
/// A buy crosses when its limit is at or above the maker's price;
/// a sell crosses when its limit is at or below it.
pub fn taker_crosses(taker_side: Side, taker_price: Price, maker_price: Price) -> bool {
    match taker_side {
        Side::Buy => can_match(taker_price, maker_price),
        Side::Sell => can_match(maker_price, taker_price),
    }
}
