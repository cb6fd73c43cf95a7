//! Constant-product pools pairing one asset with the native currency.
//!
//! A [`Pool`] holds two reserve counters and a share book.  It prices
//! trades with [`constant_product_output`] and keeps its counters equal to
//! the ledger balances of its own address.
//!
//! | Operation | Input | Output |
//! |-----------|-------|--------|
//! | [`Pool::native_to_token_swap`] | native | asset |
//! | [`Pool::token_to_native_swap`] | asset | native |
//! | [`Pool::add_liquidity`] | asset + native | shares |
//! | [`Pool::remove_liquidity`] | shares | asset + native |

mod pool;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub(crate) use pool::NativeFunding;
pub use pool::{constant_product_output, Pool, PoolState};
