//! Exact fixed-point numbers with two fraction digits.
//!
//! Used for hour estimates and material costs, mirroring the
//! `DECIMAL(7,2)` columns of the projects schema.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const SCALE: i64 = 100;

/// Decimal value stored as a count of hundredths.
///
/// `"10"` parses to `10.00`, `"12.5"` to `12.50`. Input needing more than two
/// fraction digits is rejected rather than rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal2 {
    hundredths: i64,
}

impl Decimal2 {
    pub const ZERO: Self = Self { hundredths: 0 };

    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self { hundredths }
    }

    /// Builds a value with no fractional part; `None` on overflow.
    pub fn from_whole(units: i64) -> Option<Self> {
        units.checked_mul(SCALE).map(Self::from_hundredths)
    }

    pub const fn hundredths(self) -> i64 {
        self.hundredths
    }

    pub const fn is_negative(self) -> bool {
        self.hundredths < 0
    }

    /// Absolute value in hundredths, without overflow on `i64::MIN`.
    pub const fn abs_hundredths(self) -> u64 {
        self.hundredths.unsigned_abs()
    }
}

impl Display for Decimal2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let abs = self.abs_hundredths();
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{sign}{}.{:02}", abs / SCALE as u64, abs % SCALE as u64)
    }
}

/// Error returned when text is not a two-digit decimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseDecimalError {
    /// Empty input, stray characters, or no digits at all.
    Invalid(String),
    /// More than two digits after the decimal point.
    TooPrecise(String),
    /// Value does not fit in the backing integer.
    Overflow(String),
}

impl Display for ParseDecimalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(input) => write!(f, "`{input}` is not a decimal number"),
            Self::TooPrecise(input) => {
                write!(f, "`{input}` has more than 2 digits after the decimal point")
            }
            Self::Overflow(input) => write!(f, "`{input}` is too large"),
        }
    }
}

impl Error for ParseDecimalError {}

impl FromStr for Decimal2 {
    type Err = ParseDecimalError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let invalid = || ParseDecimalError::Invalid(trimmed.to_string());
        let overflow = || ParseDecimalError::Overflow(trimmed.to_string());

        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }
        if fraction.len() > 2 {
            return Err(ParseDecimalError::TooPrecise(trimmed.to_string()));
        }

        let mut hundredths: i64 = 0;
        for byte in whole.bytes() {
            hundredths = hundredths
                .checked_mul(10)
                .and_then(|value| value.checked_add(i64::from(byte - b'0')))
                .ok_or_else(overflow)?;
        }
        hundredths = hundredths.checked_mul(SCALE).ok_or_else(overflow)?;

        let mut fraction_value = 0_i64;
        for (index, byte) in fraction.bytes().enumerate() {
            let weight = if index == 0 { 10 } else { 1 };
            fraction_value += i64::from(byte - b'0') * weight;
        }
        hundredths = hundredths.checked_add(fraction_value).ok_or_else(overflow)?;

        Ok(Self::from_hundredths(if negative {
            -hundredths
        } else {
            hundredths
        }))
    }
}
