//! Outcome of a deposit into or a withdrawal from a pool.

use serde::Serialize;

use super::{Amount, Shares};

/// Amounts moved by `add_liquidity` or `remove_liquidity`.
///
/// For a deposit `shares` were minted to the provider; for a withdrawal
/// they were burned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LiquidityReceipt {
    asset_amount: Amount,
    native_amount: Amount,
    shares: Shares,
}

impl LiquidityReceipt {
    /// Creates a new receipt.
    #[must_use]
    pub const fn new(asset_amount: Amount, native_amount: Amount, shares: Shares) -> Self {
        Self {
            asset_amount,
            native_amount,
            shares,
        }
    }

    /// Asset moved between the provider and the pool.
    pub const fn asset_amount(&self) -> Amount {
        self.asset_amount
    }

    /// Native currency moved between the provider and the pool.
    pub const fn native_amount(&self) -> Amount {
        self.native_amount
    }

    /// Shares minted or burned.
    #[must_use]
    pub const fn shares(&self) -> Shares {
        self.shares
    }
}
