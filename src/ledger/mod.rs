//! Value store: deployed assets and the native currency.
//!
//! [`Ledger`] is the explicit state object every pool and router call
//! receives.  It owns one [`FungibleAsset`] per deployed address and the
//! [`NativeCurrency`] balances, and it is cheap enough to clone that the
//! exchange facade snapshots it before each operation.

mod fungible_asset;
mod native;

use std::collections::BTreeMap;

use tracing::info;

pub use fungible_asset::FungibleAsset;
pub use native::NativeCurrency;

use crate::domain::{Address, Amount};
use crate::error::{AmmError, Result};

/// All balances the exchange can observe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    assets: BTreeMap<Address, FungibleAsset>,
    native: NativeCurrency,
    deployed: u64,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploys a new asset with its whole supply held by `creator`.
    ///
    /// The address is derived from a deployment counter, so replaying the
    /// same deployments yields the same addresses.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidSupply`] if `initial_supply` is zero.
    pub fn deploy_asset(
        &mut self,
        creator: Address,
        name: &str,
        ticker: &str,
        initial_supply: Amount,
    ) -> Result<Address> {
        let address = Address::derived(Address::ASSET_TAG, self.deployed);
        let asset = FungibleAsset::new(address, creator, name, ticker, initial_supply)?;
        self.deployed = self
            .deployed
            .checked_add(1)
            .ok_or(AmmError::Overflow("asset counter overflow"))?;
        self.assets.insert(address, asset);
        info!(%address, ticker, supply = %initial_supply, "asset deployed");
        Ok(address)
    }

    /// Credits native value to `holder` (genesis faucet).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the circulating total overflows.
    pub fn fund_native(&mut self, holder: Address, amount: Amount) -> Result<()> {
        self.native.mint(holder, amount)
    }

    pub fn asset(&self, address: &Address) -> Option<&FungibleAsset> {
        self.assets.get(address)
    }

    /// Deployed assets in address order.
    pub fn assets(&self) -> impl Iterator<Item = &FungibleAsset> {
        self.assets.values()
    }

    pub const fn native(&self) -> &NativeCurrency {
        &self.native
    }

    /// Balance of `holder` in `asset`; zero when the asset is unknown.
    pub fn asset_balance(&self, asset: &Address, holder: &Address) -> Amount {
        self.asset(asset).map_or(Amount::ZERO, |a| a.balance_of(holder))
    }

    pub fn native_balance(&self, holder: &Address) -> Amount {
        self.native.balance_of(holder)
    }

    /// Allowance granted by `owner` to `spender` in `asset`.
    pub fn allowance(&self, asset: &Address, owner: &Address, spender: &Address) -> Amount {
        self.asset(asset).map_or(Amount::ZERO, |a| a.allowance(owner, spender))
    }

    /// Sets `spender`'s allowance over `owner`'s balance of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::AssetNotFound`] if `asset` is not deployed.
    pub fn authorize(
        &mut self,
        asset: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<()> {
        self.asset_mut(asset)?.authorize(owner, spender, amount);
        Ok(())
    }

    /// Moves `amount` of `asset` on the holder's own authority.
    ///
    /// # Errors
    ///
    /// [`AmmError::AssetNotFound`] or any error of
    /// [`FungibleAsset::transfer`].
    pub fn transfer_asset(
        &mut self,
        asset: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.asset_mut(asset)?.transfer(from, to, amount)
    }

    /// Moves `amount` of `asset` from `owner` to `to`, spending `spender`'s
    /// allowance.
    ///
    /// # Errors
    ///
    /// [`AmmError::AssetNotFound`] or any error of
    /// [`FungibleAsset::transfer_from`].
    pub fn transfer_asset_from(
        &mut self,
        asset: Address,
        owner: Address,
        spender: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.asset_mut(asset)?
            .transfer_from(owner, spender, to, amount)
    }

    /// Validates a delegated asset transfer without performing it.
    ///
    /// # Errors
    ///
    /// Same as [`transfer_asset_from`](Self::transfer_asset_from).
    pub fn ensure_spendable(
        &self,
        asset: &Address,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<()> {
        self.asset(asset)
            .ok_or(AmmError::AssetNotFound(*asset))?
            .ensure_spendable(owner, spender, amount)
    }

    /// Moves native value between holders.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less than
    /// `amount`.
    pub fn transfer_native(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        self.native.transfer(from, to, amount)
    }

    /// Validates a native transfer without performing it.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`].
    pub fn ensure_native(&self, holder: &Address, amount: Amount) -> Result<()> {
        self.native.ensure_balance(holder, amount)
    }

    fn asset_mut(&mut self, asset: Address) -> Result<&mut FungibleAsset> {
        self.assets
            .get_mut(&asset)
            .ok_or(AmmError::AssetNotFound(asset))
    }
}
