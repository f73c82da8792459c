//! # Money Module
//!
//! Provides the `Money` type for purchase prices, sold prices and estimated
//! values.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A price typed as "19.99" and stored as a float:                        │
//! │    19.99 * 3 = 59.97000000000001  ❌                                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "19.99" is parsed once at the form boundary into 1999 cents.         │
//! │    Stored records carry decimals (19.99); they are converted to and     │
//! │    from cents only at the serde boundary.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use curio_core::money::Money;
//!
//! let price: Money = "24.5".parse().unwrap();
//! assert_eq!(price.cents(), 2450);
//! assert_eq!(price.to_string(), "$24.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Amounts on an [`Item`](crate::types::Item) are never negative; that is
/// checked by [`validate_amount`](crate::validation::validate_amount), not by
/// this type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use curio_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Converts a decimal amount (`12.5`) as found in stored records,
    /// rounding to the nearest cent.
    ///
    /// ## Returns
    /// `None` for NaN, infinities and amounts too large to hold in cents.
    pub fn from_decimal(amount: f64) -> Option<Self> {
        let cents = (amount * 100.0).round();
        if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// The amount as a decimal number of dollars, for stored records.
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parses a decimal amount as typed into a price input.
    ///
    /// ## Accepted Input
    /// ```text
    /// "12"      → 1200
    /// "12.5"    → 1250
    /// "12.50"   → 1250
    /// "$12.50"  → 1250
    /// ".99"     → 99
    /// "-3"      → -300   (rejected later by validation)
    /// "12.505"  → error  (more than two decimals)
    /// "abc"     → error
    /// ```
    pub fn parse_amount(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (rest, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("must be a number"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("must be a number"));
        }
        if fraction.len() > 2 {
            return Err(invalid("must have at most two decimal places"));
        }

        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("is too large"))?
        };
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("must be a number"))? * 10,
            _ => fraction.parse().map_err(|_| invalid("must be a number"))?,
        };

        let total = dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .ok_or_else(|| invalid("is too large"))?;

        Ok(Money(if negative { -total } else { total }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$12.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse_amount(s)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(Money::parse_amount("12").unwrap().cents(), 1200);
        assert_eq!(Money::parse_amount("12.5").unwrap().cents(), 1250);
        assert_eq!(Money::parse_amount("12.50").unwrap().cents(), 1250);
        assert_eq!(Money::parse_amount(" $8.05 ").unwrap().cents(), 805);
        assert_eq!(Money::parse_amount(".99").unwrap().cents(), 99);
        assert_eq!(Money::parse_amount("-3").unwrap().cents(), -300);
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(Money::parse_amount("").is_err());
        assert!(Money::parse_amount(".").is_err());
        assert!(Money::parse_amount("abc").is_err());
        assert!(Money::parse_amount("1.2.3").is_err());
        assert!(Money::parse_amount("12.505").is_err());
        assert!(Money::parse_amount("99999999999999999999").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::default().to_string(), "$0.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
    }

    #[test]
    fn test_decimal_conversion_rounds_to_cents() {
        assert_eq!(Money::from_decimal(10.99), Some(Money::from_cents(1099)));
        assert_eq!(Money::from_decimal(12.5), Some(Money::from_cents(1250)));
        assert_eq!(Money::from_decimal(0.1 + 0.2), Some(Money::from_cents(30)));
        assert_eq!(Money::from_decimal(f64::NAN), None);
        assert_eq!(Money::from_decimal(f64::INFINITY), None);
        assert_eq!(Money::from_decimal(1e300), None);

        assert_eq!(Money::from_cents(1099).to_decimal(), 10.99);
        assert_eq!(Money::from_cents(0).to_decimal(), 0.0);
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(2450)).unwrap();
        assert_eq!(json, "2450");
    }
}
