//! Decimal places and human-unit conversion.

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::AmmError;

/// Maximum allowed decimal places (EVM standard).
const MAX_DECIMALS: u8 = 18;

/// Number of decimal places between an asset's whole unit and its base unit.
///
/// Valid range is `0..=18`.  Besides scaling whole numbers,
/// [`parse_units`](Self::parse_units) and [`format_units`](Self::format_units)
/// convert decimal strings such as `"3.99"` exactly, without floating point.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Amount, Decimals};
///
/// let d = Decimals::ETHER;
/// assert_eq!(d.units(1), Amount::new(1_000_000_000_000_000_000));
/// assert_eq!(d.parse_units("3.99").expect("valid"), Amount::new(3_990_000_000_000_000_000));
/// assert_eq!(d.format_units(Amount::new(1_500_000_000_000_000_000)), "1.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Decimals(u8);

impl Default for Decimals {
    fn default() -> Self {
        Self::ETHER
    }
}

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Eighteen decimal places, the native-currency convention.
    pub const ETHER: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrecision`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self, AmmError> {
        if value > MAX_DECIMALS {
            return Err(AmmError::InvalidPrecision("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Converts a whole number of units to base units.
    ///
    /// Cannot overflow because `u64::MAX × 10^18 < u128::MAX`.
    pub const fn units(&self, whole: u64) -> Amount {
        Amount::new((whole as u128) * self.factor())
    }

    /// Parses a decimal string (`"1000"`, `"3.99"`, `"0.000001"`) into base units.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrecision`] if the string is empty, holds
    /// a non-digit, has more fractional digits than `self`, or overflows.
    pub fn parse_units(&self, text: &str) -> Result<Amount, AmmError> {
        let text = text.trim();
        let (whole, fraction) = match text.split_once('.') {
            Some((w, f)) => (w, f),
            None => (text, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(AmmError::InvalidPrecision("empty amount"));
        }
        if fraction.len() > usize::from(self.0) {
            return Err(AmmError::InvalidPrecision("more fractional digits than decimals"));
        }
        let whole_value = parse_digits(whole)?;
        let fraction_value = parse_digits(fraction)?;
        let padding = u32::from(self.0) - fraction.len() as u32;

        whole_value
            .checked_mul(self.factor())
            .and_then(|w| w.checked_add(fraction_value * 10u128.pow(padding)))
            .map(Amount::new)
            .ok_or(AmmError::InvalidPrecision("amount overflows base units"))
    }

    /// Formats base units as a decimal string, trimming trailing zeros.
    ///
    /// Whole values keep one fractional digit (`"1000.0"`).
    #[must_use]
    pub fn format_units(&self, amount: Amount) -> String {
        let factor = self.factor();
        let whole = amount.get() / factor;
        let fraction = amount.get() % factor;
        if self.0 == 0 {
            return whole.to_string();
        }
        let digits = format!("{:0width$}", fraction, width = usize::from(self.0));
        let trimmed = digits.trim_end_matches('0');
        if trimmed.is_empty() {
            format!("{whole}.0")
        } else {
            format!("{whole}.{trimmed}")
        }
    }

    /// Returns `10^decimals`.
    #[must_use]
    const fn factor(&self) -> u128 {
        10u128.pow(self.0 as u32)
    }
}

impl TryFrom<u8> for Decimals {
    type Error = AmmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(value: Decimals) -> Self {
        value.0
    }
}

fn parse_digits(digits: &str) -> Result<u128, AmmError> {
    if digits.is_empty() {
        return Ok(0);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmmError::InvalidPrecision("amount must be decimal digits"));
    }
    digits
        .parse::<u128>()
        .map_err(|_| AmmError::InvalidPrecision("amount overflows base units"))
}
