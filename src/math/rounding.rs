//! Rounding helpers for integer division.
//!
//! [`div_round`] performs `u128` division with an explicit [`Rounding`]
//! direction.  It backs [`Amount::checked_div`](crate::domain::Amount::checked_div).
//!
//! # Convention
//!
//! The exchange only ever rounds down: swap outputs, the asset required by
//! a ratio-preserving deposit, shares minted and amounts withdrawn are all
//! floored.  `Rounding::Up` exists for callers that quote required inputs.
//!
//! # Examples
//!
//! ```
//! use pairswap::domain::Rounding;
//! use pairswap::math::div_round;
//!
//! assert_eq!(div_round(10, 3, Rounding::Down), Some(3));
//! assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
//! assert_eq!(div_round(10, 0, Rounding::Down), None);
//! ```

use crate::domain::Rounding;

/// Integer division of `u128` values with explicit rounding direction.
///
/// Returns [`None`] if `denominator` is zero.
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let q = numerator / denominator;
    match rounding {
        Rounding::Down => Some(q),
        // q + 1 cannot overflow: a non-zero remainder implies q < u128::MAX.
        Rounding::Up if numerator % denominator != 0 => Some(q + 1),
        Rounding::Up => Some(q),
    }
}
