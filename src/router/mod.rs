//! Token-to-token routing through the native currency.
//!
//! There is no direct asset/asset pool.  A token-to-token swap sells the
//! source asset into its pool for native currency and forwards that native
//! amount straight into the destination pool, which pays out the
//! destination asset:
//!
//! ```text
//! caller ──tokens──▶ source pool ──native──▶ destination pool ──tokens──▶ caller
//! ```
//!
//! Both hops are quoted and checked against their minimums before any
//! balance moves.  The [`Exchange`](crate::exchange::Exchange) additionally
//! runs the whole route under one checkpoint, so a failure in either hop
//! leaves both pools and the ledger untouched.

use core::fmt;

use serde::Serialize;
use tracing::debug;

use crate::domain::{Address, Amount};
use crate::error::{AmmError, Result};
use crate::ledger::Ledger;
use crate::pools::NativeFunding;
use crate::registry::PoolRegistry;

/// Parameters of a token-to-token swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenToTokenSwap {
    /// Source asset sold into the source pool.
    pub tokens_sold: Amount,
    /// Minimum native amount the first hop must produce.
    pub min_native_out: Amount,
    /// Minimum destination asset the caller accepts.
    pub min_tokens_out: Amount,
    /// Asset the caller wants to receive.
    pub destination_asset: Address,
}

/// Amounts moved by a completed route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteReceipt {
    pub tokens_sold: Amount,
    /// Native amount forwarded between the pools.
    pub native_out: Amount,
    pub tokens_out: Amount,
}

impl fmt::Display for RouteReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RouteReceipt(sold={}, native={}, out={})",
            self.tokens_sold, self.native_out, self.tokens_out
        )
    }
}

/// Swaps `source_asset` for `request.destination_asset` via native currency.
///
/// `caller` must have authorized the source pool's address for at least
/// `tokens_sold`.
///
/// Validation follows the order of the hops: the source side (pool,
/// balance and allowance, first-hop minimum) is checked before the
/// destination pool is resolved, so a route that fails on both sides
/// reports the source-side error.
///
/// # Errors
///
/// - [`AmmError::PoolNotFound`] if either asset has no pool.
/// - [`AmmError::InvalidAsset`] if source and destination are the same.
/// - [`AmmError::InsufficientBalance`] / [`AmmError::InsufficientAllowance`]
///   if `caller` cannot supply `tokens_sold`.
/// - [`AmmError::SlippageExceeded`] if either hop falls below its minimum.
/// - [`AmmError::InvalidQuantity`] for zero input or a hop that rounds to
///   zero.
pub fn token_to_token_swap(
    ledger: &mut Ledger,
    registry: &mut PoolRegistry,
    caller: Address,
    source_asset: Address,
    request: &TokenToTokenSwap,
) -> Result<RouteReceipt> {
    let source = registry.pool(&source_asset)?;
    if request.destination_asset == source_asset {
        return Err(AmmError::InvalidAsset("source and destination assets are the same"));
    }
    ledger.ensure_spendable(&source_asset, &caller, &source.address(), request.tokens_sold)?;

    // Both quotes come from untouched reserves: the hops use distinct pools.
    let native_quote = source.quote_token_to_native(request.tokens_sold)?;
    if native_quote < request.min_native_out {
        return Err(AmmError::SlippageExceeded {
            minimum: request.min_native_out,
            actual: native_quote,
        });
    }
    let destination = registry.pool(&request.destination_asset)?;
    let destination_address = destination.address();
    let tokens_quote = destination.quote_native_to_token(native_quote)?;
    if tokens_quote < request.min_tokens_out {
        return Err(AmmError::SlippageExceeded {
            minimum: request.min_tokens_out,
            actual: tokens_quote,
        });
    }

    let sold = registry.pool_mut(&source_asset)?.sell_tokens_for_native(
        ledger,
        caller,
        request.tokens_sold,
        request.min_native_out,
        destination_address,
    )?;
    let bought = registry
        .pool_mut(&request.destination_asset)?
        .buy_tokens_with_native(
            ledger,
            NativeFunding::Forwarded,
            sold.amount_out(),
            request.min_tokens_out,
            caller,
        )?;

    let receipt = RouteReceipt {
        tokens_sold: sold.amount_in(),
        native_out: sold.amount_out(),
        tokens_out: bought.amount_out(),
    };
    debug!(
        %caller,
        source = %source_asset,
        destination = %request.destination_asset,
        %receipt,
        "token route executed"
    );
    Ok(receipt)
}
