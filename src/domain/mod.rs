//! Domain value types used throughout the exchange.
//!
//! Addresses, amounts, fee tiers, decimals, liquidity shares and the
//! receipts returned by pool operations.  All types are newtypes with
//! validated constructors where an invariant exists.

mod address;
mod amount;
mod basis_points;
mod decimals;
mod fee_tier;
mod liquidity_receipt;
mod rounding;
mod shares;
mod swap_receipt;

pub use address::Address;
pub use amount::Amount;
pub use basis_points::BasisPoints;
pub use decimals::Decimals;
pub use fee_tier::FeeTier;
pub use liquidity_receipt::LiquidityReceipt;
pub use rounding::Rounding;
pub use shares::Shares;
pub use swap_receipt::{SwapDirection, SwapReceipt};
