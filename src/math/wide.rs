//! 256-bit intermediates for `a × b / c`.

pub use primitive_types::U256;

use crate::domain::Rounding;

/// Computes `a × b / denominator` without overflowing the product.
///
/// The product is formed in 256 bits, which holds any pair of `u128`
/// factors.  Returns `None` if `denominator` is zero or the quotient does
/// not fit back into `u128`.
///
/// # Examples
///
/// ```
/// use pairswap::domain::Rounding;
/// use pairswap::math::mul_div;
///
/// let wei = 1_000_000_000_000_000_000u128;
/// assert_eq!(mul_div(1_000 * wei, 4_000 * wei, 1_000 * wei, Rounding::Down), Some(4_000 * wei));
/// assert_eq!(mul_div(7, 1, 2, Rounding::Up), Some(4));
/// ```
#[must_use]
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let product = U256::from(a).checked_mul(U256::from(b))?;
    let (quotient, remainder) = product.div_mod(U256::from(denominator));
    let quotient = if rounding.is_up() && !remainder.is_zero() {
        quotient.checked_add(U256::one())?
    } else {
        quotient
    };
    narrow(quotient)
}

/// Converts a 256-bit value back to `u128`, or `None` if it does not fit.
#[must_use]
pub fn narrow(value: U256) -> Option<u128> {
    if value > U256::from(u128::MAX) {
        return None;
    }
    Some(value.low_u128())
}
