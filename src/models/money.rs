//! Money type for representing expense and budget amounts
//!
//! Internally stores amounts in cents (i64) so that aggregation is exact and
//! independent of the order in which records are summed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::error::{MonitorError, MonitorResult};

/// Largest magnitude, in whole units, accepted when parsing an amount
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_monitor::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_units_cents(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// The amount as a floating-point number of units, for charts and exports
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a money amount from user or file text
    ///
    /// Surrounding whitespace is ignored and a decimal comma is accepted in
    /// place of a decimal point ("12,50" is 12.50). A leading sign is allowed.
    /// Digits past the second decimal place are rounded half away from zero.
    ///
    /// Fails on empty input, non-numeric content, more than one decimal
    /// separator once commas have been normalized ("1,234.50"), or a magnitude
    /// above [`MAX_AMOUNT_UNITS`].
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let normalized = s.trim().replace(',', ".");
        if normalized.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let invalid = || MoneyParseError::InvalidFormat(s.trim().to_string());

        let (negative, body) = if let Some(rest) = normalized.strip_prefix('-') {
            (true, rest)
        } else {
            (false, normalized.strip_prefix('+').unwrap_or(normalized.as_str()))
        };

        let mut parts = body.split('.');
        let whole = parts.next().unwrap_or("");
        let fraction = parts.next().unwrap_or("");
        if parts.next().is_some() {
            return Err(invalid());
        }

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let fraction = fraction.as_bytes();
        let mut cents = match fraction.len() {
            0 => 0,
            1 => i64::from(fraction[0] - b'0') * 10,
            _ => i64::from(fraction[0] - b'0') * 10 + i64::from(fraction[1] - b'0'),
        };
        if fraction.len() > 2 && fraction[2] >= b'5' {
            cents += 1;
        }

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .filter(|total| *total <= MAX_AMOUNT_UNITS * 100)
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.format_with_symbol("");
        // Honor width/alignment flags so amounts line up in tables
        f.pad(&text)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is empty"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

/// Parse an amount, reporting failures as `InvalidAmount`
///
/// The result is held in whole cents: a third decimal place is rounded half
/// away from zero, so "1.005" becomes 1.01 and "1.004" becomes 1.00. See
/// [`Money::parse`] for the accepted formats and the size limit.
///
/// # Examples
/// ```
/// use expense_monitor::models::parse_amount;
/// assert_eq!(parse_amount("12,50").unwrap().cents(), 1250);
/// assert_eq!(parse_amount("1.005").unwrap().cents(), 101);
/// assert!(parse_amount("abc").is_err());
/// ```
pub fn parse_amount(text: &str) -> MonitorResult<Money> {
    Money::parse(text).map_err(|_| MonitorError::InvalidAmount(text.trim().to_string()))
}
