//! Integer arithmetic helpers for pricing and share math.
//!
//! Every division takes an explicit [`Rounding`](crate::domain::Rounding).
//! Products of two `u128` values are formed in 256 bits by [`mul_div`] so
//! that 1e18-scaled reserves never overflow an intermediate.

mod rounding;
mod wide;

pub use rounding::div_round;
pub use wide::{mul_div, narrow, U256};
