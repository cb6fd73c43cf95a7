//! One pool per asset, created on demand.
//!
//! The [`PoolRegistry`] is the only place pools come from.  It rejects a
//! second pool for the same asset and the two reserved addresses, derives
//! each pool's ledger address from a counter, and answers lookups in both
//! directions (asset → pool, pool address → asset).
//!
//! # Usage
//!
//! ```rust
//! use pairswap::domain::{Address, FeeTier};
//! use pairswap::registry::PoolRegistry;
//!
//! let gray = Address::derived(Address::ASSET_TAG, 0);
//! let mut registry = PoolRegistry::new();
//! let pool = registry.create_pool(gray, FeeTier::default()).expect("fresh asset");
//!
//! assert_eq!(registry.asset_of(&pool), Some(gray));
//! assert!(registry.create_pool(gray, FeeTier::default()).is_err());
//! assert_eq!(registry.pool_count(), 1);
//! ```

mod pool_registry;

pub use pool_registry::PoolRegistry;
