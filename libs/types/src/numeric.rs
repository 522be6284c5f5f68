//! Fixed-point decimal types for prices and amounts
//!
//! Wraps rust_decimal for exact arithmetic (no floating-point on the
//! matching path). Values serialize as strings to prevent JSON number
//! precision loss, always in canonical form: trailing zeros stripped,
//! integers without a fractional part. Equal values render identically,
//! which is what makes a decimal usable as a price-level key.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};

use crate::errors::NumericError;

/// Render a decimal in canonical form.
///
/// `1.100` and `1.1` are the same value and produce the same string;
/// integer values render without a fractional part.
pub fn canonical(value: &Decimal) -> String {
    value.normalize().to_string()
}

/// Parse a decimal literal, rejecting anything non-numeric.
pub fn parse_decimal(s: &str) -> Result<Decimal, NumericError> {
    Decimal::from_str(s).map_err(|_| NumericError::InvalidDecimal(s.to_string()))
}

/// Exact division with divide-by-zero as an error, never a panic.
///
/// rust_decimal carries 28 significant digits through division with
/// midpoint-nearest-even behavior at the precision boundary.
pub fn checked_div(dividend: Decimal, divisor: Decimal) -> Result<Decimal, NumericError> {
    dividend
        .checked_div(divisor)
        .ok_or(NumericError::DivisionByZero)
}

/// Price type with exact decimal representation
///
/// Must always be strictly positive. Ordering and equality are numeric
/// (scale-insensitive), so a `BTreeMap<Price, _>` keys equal values
/// identically regardless of how they were written in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Create a new Price from a Decimal
    ///
    /// # Panics
    /// Panics if the price is not strictly positive
    pub fn new(value: Decimal) -> Self {
        assert!(value > Decimal::ZERO, "Price must be positive");
        Self(value)
    }

    /// Try to create a Price, returning None if not strictly positive
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create from integer (for testing/convenience)
    pub fn from_u64(value: u64) -> Self {
        Self::new(Decimal::from(value))
    }

    /// Parse from a decimal string
    pub fn from_str(s: &str) -> Result<Self, NumericError> {
        let decimal = parse_decimal(s)?;
        Self::try_new(decimal).ok_or_else(|| NumericError::NotPositive(s.to_string()))
    }

    /// Get the inner decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Canonical string form, the identity of a price level
    pub fn canonical(&self) -> String {
        canonical(&self.0)
    }

    /// Difference between two prices, None if the result would not be positive
    pub fn checked_sub(&self, rhs: Price) -> Option<Price> {
        Self::try_new(self.0 - rhs.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

// Canonical string serialization to preserve precision
impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

/// Amount type with exact decimal representation
///
/// Non-negative; zero appears only as the residual of a fully matched
/// order and never rests on the book. Serialized as a canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Create a new Quantity from a Decimal
    ///
    /// # Panics
    /// Panics if the quantity is negative
    pub fn new(value: Decimal) -> Self {
        assert!(value >= Decimal::ZERO, "Quantity must not be negative");
        Self(value)
    }

    /// Try to create a strictly positive Quantity
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The shared zero constant
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Create from integer (for testing/convenience)
    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    /// Parse from a decimal string, rejecting non-positive values
    pub fn from_str(s: &str) -> Result<Self, NumericError> {
        let decimal = parse_decimal(s)?;
        Self::try_new(decimal).ok_or_else(|| NumericError::NotPositive(s.to_string()))
    }

    /// Get the inner decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Canonical string form
    pub fn canonical(&self) -> String {
        canonical(&self.0)
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::ZERO
    }

    /// Subtraction that refuses to go negative
    ///
    /// Returns None on underflow; a None here on the matching path is an
    /// invariant breach, not a user error.
    pub fn checked_sub(&self, rhs: Quantity) -> Option<Quantity> {
        if self.0 >= rhs.0 {
            Some(Self(self.0 - rhs.0))
        } else {
            None
        }
    }

    /// The smaller of two amounts (the fill size of a match)
    pub fn min(self, rhs: Quantity) -> Quantity {
        if self.0 <= rhs.0 {
            self
        } else {
            rhs
        }
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<Price> for Quantity {
    type Output = Decimal;

    fn mul(self, rhs: Price) -> Self::Output {
        self.0 * rhs.as_decimal()
    }
}

// Canonical string serialization to preserve precision
impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let decimal = parse_decimal(&s).map_err(serde::de::Error::custom)?;
        // Zero is accepted here: a fully matched residual round-trips
        if decimal >= Decimal::ZERO {
            Ok(Self(decimal))
        } else {
            Err(serde::de::Error::custom("Quantity cannot be negative"))
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}
