//! Exact fixed-point money.
//!
//! Amounts are signed integers scaled by 10^6 (six decimal places, matching
//! common stablecoin precision). Arithmetic is always checked: overflow is a
//! hard [`LedgerError::ArithmeticOverflow`], never a wrap or a saturation,
//! and floating point is never involved.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// A fixed-point currency amount in units of 10^-6.
///
/// Serializes transparently as the underlying integer so it round-trips
/// exactly through any storage or transport layer.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Decimal places carried by every amount.
    pub const DECIMALS: u32 = 6;

    /// Smallest units per whole currency unit.
    pub const SCALE: i64 = 1_000_000;

    pub const ZERO: Money = Money(0);

    /// Amount from raw 10^-6 units.
    pub const fn from_units(units: i64) -> Self {
        Self(units)
    }

    /// Amount from whole currency units.
    pub fn from_major(major: i64) -> LedgerResult<Self> {
        major
            .checked_mul(Self::SCALE)
            .map(Self)
            .ok_or(LedgerError::ArithmeticOverflow)
    }

    pub const fn units(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, other: Money) -> LedgerResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(LedgerError::ArithmeticOverflow)
    }

    pub fn checked_sub(self, other: Money) -> LedgerResult<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or(LedgerError::ArithmeticOverflow)
    }

    pub fn checked_neg(self) -> LedgerResult<Money> {
        self.0
            .checked_neg()
            .map(Money)
            .ok_or(LedgerError::ArithmeticOverflow)
    }

    pub fn checked_abs(self) -> LedgerResult<Money> {
        self.0
            .checked_abs()
            .map(Money)
            .ok_or(LedgerError::ArithmeticOverflow)
    }

    /// Checked sum over an iterator of amounts.
    pub fn checked_sum<I>(amounts: I) -> LedgerResult<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, m| acc.checked_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{sign}{}.{:06}",
            abs / Self::SCALE as u64,
            abs % Self::SCALE as u64
        )
    }
}

impl FromStr for Money {
    type Err = LedgerError;

    /// Parses a human decimal string, rounding to the nearest 10^-6 unit
    /// with ties away from zero. This is the canonical rounding rule any
    /// layer feeding the engine must reproduce.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(LedgerError::invalid_amount(format!("'{s}' is not a number")));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(LedgerError::invalid_amount(format!("'{s}' is not a number")));
        }

        let whole: i64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| LedgerError::ArithmeticOverflow)?
        };

        let mut frac: i64 = 0;
        for i in 0..Self::DECIMALS as usize {
            let digit = frac_part.as_bytes().get(i).map_or(0, |b| (b - b'0') as i64);
            frac = frac * 10 + digit;
        }
        // Round on the first dropped digit, ties away from zero.
        if frac_part
            .as_bytes()
            .get(Self::DECIMALS as usize)
            .is_some_and(|b| *b >= b'5')
        {
            frac += 1;
        }

        let mut units = whole
            .checked_mul(Self::SCALE)
            .and_then(|w| w.checked_add(frac))
            .ok_or(LedgerError::ArithmeticOverflow)?;
        if negative {
            units = -units;
        }
        Ok(Money(units))
    }
}
