//! Order command and order types
//!
//! A command arrives as seven raw strings, is validated, and is promoted to
//! an [`Order`] with parsed numerics and a monotonically assigned ingestion
//! timestamp. The timestamp is a per-service counter, never wall clock, so
//! two runs over the same input assign identical timestamps.

use crate::errors::MatchingError;
use crate::ids::{AccountId, MarketId, OrderId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Command operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TypeOp {
    Create,
    Delete,
}

impl TypeOp {
    /// Parse the wire form ("CREATE" / "DELETE")
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CREATE" => Some(TypeOp::Create),
            "DELETE" => Some(TypeOp::Delete),
            _ => None,
        }
    }
}

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Parse the wire form ("BUY" / "SELL")
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BUY" => Some(Side::Buy),
            "SELL" => Some(Side::Sell),
            _ => None,
        }
    }

    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

/// Raw order command as it appears in the input document
///
/// All seven fields are strings on the wire; `amount` and `limit_price`
/// stay unparsed until validation so a malformed command can be rejected
/// with field context instead of a document-level parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCommand {
    pub type_op: String,
    pub account_id: String,
    pub order_id: String,
    pub pair: String,
    pub side: String,
    pub amount: String,
    pub limit_price: String,
}

/// An accepted order inside the engine
///
/// `amount` is the remaining (unfilled) amount; matching decrements it in
/// place so the residual the caller rests is exactly what survived the
/// match walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub account_id: AccountId,
    pub pair: MarketId,
    pub side: Side,
    pub amount: Quantity,
    pub limit_price: Price,
    /// Ingestion counter assigned at promotion, strictly monotonic per run
    pub timestamp: u64,
}

impl Order {
    /// Check if the order has no remaining amount
    pub fn is_filled(&self) -> bool {
        self.amount.is_zero()
    }

    /// Decrement the remaining amount by a fill
    pub fn fill(&mut self, fill: Quantity) -> Result<(), MatchingError> {
        self.amount = self.amount.checked_sub(fill).ok_or_else(|| {
            MatchingError::FillExceedsRemaining {
                fill: fill.canonical(),
                remaining: self.amount.canonical(),
            }
        })?;
        Ok(())
    }
}
