//! Exact monetary cost attached to a to-do item.
//!
//! Stored as integer minor units (cents) so equality and persistence are
//! exact. Negative values are representable on purpose; rejecting them is a
//! validation concern (`rules::validate_cost`).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CENTS_PER_UNIT: i64 = 100;

/// Cost with two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cost(i64);

/// Error returned when a cost literal cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostParseError(String);

impl Display for CostParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid cost `{}`", self.0)
    }
}

impl Error for CostParseError {}

impl Cost {
    pub const ZERO: Cost = Cost(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Parses decimal literals such as `12`, `12.5`, `-0.99`.
    ///
    /// At most two fractional digits are accepted; nothing is rounded.
    pub fn parse(value: &str) -> Result<Self, CostParseError> {
        let invalid = || CostParseError(value.to_string());
        let trimmed = value.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        if whole.is_empty() || fraction.len() > 2 {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let fraction_cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|value| value.checked_add(fraction_cents))
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{sign}{}.{:02}",
            abs / CENTS_PER_UNIT as u64,
            abs % CENTS_PER_UNIT as u64
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Cost;

    #[test]
    fn parse_accepts_whole_and_fractional_values() {
        assert_eq!(Cost::parse("12").unwrap().cents(), 1200);
        assert_eq!(Cost::parse("12.5").unwrap().cents(), 1250);
        assert_eq!(Cost::parse(" 0.99 ").unwrap().cents(), 99);
        assert_eq!(Cost::parse("-3.10").unwrap().cents(), -310);
    }

    #[test]
    fn parse_rejects_malformed_values() {
        for input in ["", ".5", "1.234", "abc", "1.x", "--1", "1e3"] {
            assert!(Cost::parse(input).is_err(), "`{input}` should be rejected");
        }
    }

    #[test]
    fn display_uses_two_fraction_digits() {
        assert_eq!(Cost::from_cents(1250).to_string(), "12.50");
        assert_eq!(Cost::from_cents(5).to_string(), "0.05");
        assert_eq!(Cost::from_cents(-310).to_string(), "-3.10");
    }
}
