//! Asset-keyed pool registry.

use std::collections::BTreeMap;

use tracing::info;

use crate::domain::{Address, FeeTier};
use crate::error::{AmmError, Result};
use crate::pools::Pool;

/// Registry of every pool, keyed by the asset it trades.
///
/// Grows monotonically: pools are never removed, so the counter behind
/// pool addresses never repeats a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolRegistry {
    pools: BTreeMap<Address, Pool>,
    assets_by_pool: BTreeMap<Address, Address>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty pool for `asset` and returns the pool's address.
    ///
    /// # Flow
    ///
    /// 1. Reject [`Address::ZERO`] and [`Address::NATIVE`].
    /// 2. Reject an asset that already has a pool.
    /// 3. Validate `fee_tier`.
    /// 4. Derive the pool address from the current pool count.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] for a reserved address.
    /// - [`AmmError::PoolAlreadyExists`] if `asset` already has a pool.
    /// - [`AmmError::InvalidFee`] if `fee_tier` is 100% or more.
    pub fn create_pool(&mut self, asset: Address, fee_tier: FeeTier) -> Result<Address> {
        if asset.is_zero() {
            return Err(AmmError::InvalidAsset("zero address cannot back a pool"));
        }
        if asset.is_native() {
            return Err(AmmError::InvalidAsset("native currency cannot back a pool"));
        }
        if self.pools.contains_key(&asset) {
            return Err(AmmError::PoolAlreadyExists(asset));
        }
        fee_tier.validate()?;

        let index = u64::try_from(self.pools.len())
            .map_err(|_| AmmError::Overflow("pool counter overflow"))?;
        let address = Address::derived(Address::POOL_TAG, index);
        self.pools.insert(asset, Pool::new(asset, address, fee_tier));
        self.assets_by_pool.insert(address, asset);

        info!(%asset, pool = %address, %fee_tier, "pool created");
        Ok(address)
    }

    pub fn get_pool(&self, asset: &Address) -> Option<&Pool> {
        self.pools.get(asset)
    }

    pub fn get_pool_mut(&mut self, asset: &Address) -> Option<&mut Pool> {
        self.pools.get_mut(asset)
    }

    /// Like [`get_pool`](Self::get_pool) but fails with
    /// [`AmmError::PoolNotFound`].
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] if `asset` has no pool.
    pub fn pool(&self, asset: &Address) -> Result<&Pool> {
        self.pools.get(asset).ok_or(AmmError::PoolNotFound(*asset))
    }

    /// Mutable counterpart of [`pool`](Self::pool).
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] if `asset` has no pool.
    pub fn pool_mut(&mut self, asset: &Address) -> Result<&mut Pool> {
        self.pools
            .get_mut(asset)
            .ok_or(AmmError::PoolNotFound(*asset))
    }

    /// The asset traded by the pool at `pool`.
    #[must_use]
    pub fn asset_of(&self, pool: &Address) -> Option<Address> {
        self.assets_by_pool.get(pool).copied()
    }

    /// Returns `true` if `address` belongs to a pool.
    #[must_use]
    pub fn is_pool(&self, address: &Address) -> bool {
        self.assets_by_pool.contains_key(address)
    }

    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Pools in asset-address order.
    pub fn iter(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }
}
