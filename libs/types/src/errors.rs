//! Error taxonomy for the matching engine
//!
//! Domain outcomes (no match, failed cancel) are values, not errors. The
//! enums here cover the three genuine failure kinds: bad numbers, bad
//! commands, and invariant breaches that indicate a bug in the engine
//! itself.

use thiserror::Error;

/// Decimal parse and arithmetic failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericError {
    #[error("invalid decimal literal: {0:?}")]
    InvalidDecimal(String),

    #[error("value must be strictly positive: {0:?}")]
    NotPositive(String),

    #[error("division by zero")]
    DivisionByZero,
}

/// Command rejection reasons
///
/// Raised by the validator before any state changes; a rejected command
/// leaves the service untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("unknown type_op: {0:?}")]
    UnknownTypeOp(String),

    #[error("unknown side: {0:?}")]
    UnknownSide(String),

    #[error("field {0} must not be empty")]
    EmptyField(&'static str),

    #[error("pair {0:?} is not in BASE/QUOTE format")]
    InvalidPair(String),

    #[error("invalid {field}: {source}")]
    Numeric {
        field: &'static str,
        source: NumericError,
    },
}

/// Engine invariant breaches
///
/// Any of these aborting a run indicates a programming error, not bad
/// input. They are checked at the point the invariant could break.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchingError {
    #[error("fill of {fill} exceeds remaining amount {remaining}")]
    FillExceedsRemaining { fill: String, remaining: String },

    #[error("volume at price level {price} would go negative")]
    VolumeUnderflow { price: String },

    #[error("empty price level {price} retained on the {side} side")]
    EmptyLevelRetained { price: String, side: String },

    #[error("level volume {total} disagrees with entry sum {sum} at price {price}")]
    VolumeMismatch {
        price: String,
        total: String,
        sum: String,
    },

    #[error("book crossed: best bid {best_bid} >= best ask {best_ask}")]
    CrossedBook { best_bid: String, best_ask: String },
}

/// Top-level error surfaced by the order book service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("numeric error: {0}")]
    Numeric(#[from] NumericError),

    #[error("matching error: {0}")]
    Matching(#[from] MatchingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::UnknownTypeOp("UPDATE".to_string());
        assert_eq!(err.to_string(), "unknown type_op: \"UPDATE\"");
    }

    #[test]
    fn test_numeric_error_nested_in_validation() {
        let err = ValidationError::Numeric {
            field: "amount",
            source: NumericError::InvalidDecimal("abc".to_string()),
        };
        assert!(err.to_string().contains("amount"));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_service_error_from_validation() {
        let err: ServiceError = ValidationError::EmptyField("order_id").into();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_service_error_from_matching() {
        let err: ServiceError = MatchingError::VolumeUnderflow {
            price: "50000".to_string(),
        }
        .into();
        assert!(matches!(err, ServiceError::Matching(_)));
    }
}
