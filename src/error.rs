//! Unified error types for the exchange.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Every error is a rejected operation: the exchange facade
//! restores the state it held before the call, so no variant signals
//! corrupted state.

use thiserror::Error;

use crate::domain::{Address, Amount, Shares};

/// Errors raised by assets, pools, the registry and the router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// An asset was constructed with a zero initial supply.
    #[error("initial supply must be positive")]
    InvalidSupply,

    /// The debited holder owns less than the requested amount.
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance {
        /// Current balance of the debited holder.
        have: Amount,
        /// Amount the operation tried to move.
        need: Amount,
    },

    /// The spender is authorized for less than the requested amount.
    #[error("insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance {
        /// Current allowance granted to the spender.
        have: Amount,
        /// Amount the operation tried to move.
        need: Amount,
    },

    /// Pricing was requested against a pool with a zero reserve.
    #[error("pool reserves are empty")]
    EmptyReserves,

    /// A deposit into a seeded pool offered less asset than the ratio requires.
    #[error("deposit breaks the reserve ratio: requires {required}, supplied {supplied}")]
    RatioViolation {
        /// Asset amount implied by the attached native amount.
        required: Amount,
        /// Asset amount the caller offered.
        supplied: Amount,
    },

    /// The computed output is below the caller's minimum.
    #[error("slippage exceeded: minimum {minimum}, actual {actual}")]
    SlippageExceeded {
        /// Minimum output the caller accepts.
        minimum: Amount,
        /// Output the current reserves produce.
        actual: Amount,
    },

    /// A pool is already registered for the asset.
    #[error("pool already exists for asset {0}")]
    PoolAlreadyExists(Address),

    /// No pool is registered for the asset.
    #[error("no pool registered for asset {0}")]
    PoolNotFound(Address),

    /// The asset reference cannot back a pool.
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// Direct transfers into a pool's custody address are refused.
    #[error("address {0} is pool custody")]
    PoolCustody(Address),

    /// No asset is deployed at the address.
    #[error("asset not found: {0}")]
    AssetNotFound(Address),

    /// An amount is zero or otherwise unusable for the operation.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// The holder owns fewer liquidity shares than it tried to redeem.
    #[error("insufficient shares: have {have}, need {need}")]
    InsufficientShares {
        /// Shares owned by the holder.
        have: Shares,
        /// Shares the holder tried to redeem.
        need: Shares,
    },

    /// Checked arithmetic overflowed or underflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A division had a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// The fee tier is unusable.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A decimal count or unit string is out of range.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// Configuration could not be read or failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;
