//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, BasisPoints, Rounding};
use crate::error::AmmError;

/// The fraction of every swap input retained by the pool.
///
/// Pricing uses the fee as a ratio `multiplier / denominator` equal to
/// `1 − fee`.  With a 30 bp tier that is `9 970 / 10 000`, the same
/// ratio as the classic `997 / 1000`.
///
/// # Examples
///
/// ```
/// use pairswap::domain::FeeTier;
///
/// let tier = FeeTier::TIER_0_30_PERCENT;
/// assert_eq!(tier.multiplier(), 9_970);
/// assert_eq!(tier.denominator(), 10_000);
/// assert!(tier.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.01% fee (1 bp).
    pub const TIER_0_01_PERCENT: Self = Self(BasisPoints::new(1));

    /// 0.05% fee (5 bp).
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30% fee (30 bp).
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00% fee (100 bp).
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    #[must_use]
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Numerator of `1 − fee`.
    #[must_use]
    pub const fn multiplier(&self) -> u128 {
        self.0.complement().get() as u128
    }

    /// Denominator of `1 − fee`.
    #[must_use]
    pub const fn denominator(&self) -> u128 {
        BasisPoints::MAX_PERCENT.get() as u128
    }

    /// Fee portion of `amount`, floored.
    ///
    /// Reporting only: pricing folds the fee into the output formula, so
    /// the value actually retained can carry a fractional remainder.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the computation overflows.
    pub fn fee_on(&self, amount: Amount) -> crate::error::Result<Amount> {
        self.0.apply(amount, Rounding::Down)
    }

    /// Rejects a fee of 100% or more, which would price every swap at zero.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee is not below 100%.
    pub const fn validate(&self) -> crate::error::Result<()> {
        if self.0.get() >= BasisPoints::MAX_PERCENT.get() {
            return Err(AmmError::InvalidFee("fee must be below 100%"));
        }
        Ok(())
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_05_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
