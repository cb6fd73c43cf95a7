//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use pairswap::prelude::*;
//!
//! let exchange = Exchange::default();
//! assert_eq!(exchange.pool_count(), 0);
//! ```

pub use crate::domain::{
    Address, Amount, BasisPoints, Decimals, FeeTier, LiquidityReceipt, Rounding, Shares,
    SwapDirection, SwapReceipt,
};

pub use crate::traits::Account;

pub use crate::config::ExchangeConfig;

pub use crate::error::{AmmError, Result};

pub use crate::exchange::Exchange;
pub use crate::ledger::{FungibleAsset, Ledger};
pub use crate::pools::{Pool, PoolState};
pub use crate::registry::PoolRegistry;
pub use crate::router::{RouteReceipt, TokenToTokenSwap};
