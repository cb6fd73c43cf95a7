//! Caller capability used by every value-moving operation.
//!
//! Pools and the router never ask *who* a caller is beyond its
//! [`Address`]; they only need the caller to be able to grant an
//! allowance and to send an asset it owns.  [`Account`] captures exactly
//! that.  [`Address`] implements it directly, so tests and harnesses can
//! pass plain addresses wherever an account is expected.

use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::ledger::Ledger;

/// A participant that can authorize spenders and send assets.
///
/// Only [`address`](Account::address) is required; the two capability
/// methods act on the [`Ledger`] on the account's own authority.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Address, Amount};
/// use pairswap::ledger::Ledger;
/// use pairswap::traits::Account;
///
/// let alice = Address::from_bytes([1u8; 32]);
/// let pool = Address::from_bytes([2u8; 32]);
/// let mut ledger = Ledger::new();
/// let gray = ledger
///     .deploy_asset(alice, "Gray", "GRAY", Amount::new(1_000))
///     .expect("positive supply");
///
/// alice.authorize_spend(&mut ledger, gray, pool, Amount::new(250)).expect("deployed");
/// assert_eq!(ledger.allowance(&gray, &alice, &pool), Amount::new(250));
/// ```
pub trait Account {
    /// The ledger address this account acts as.
    fn address(&self) -> Address;

    /// Sets `spender`'s allowance over this account's `asset` balance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::AssetNotFound`] if `asset` is not deployed.
    fn authorize_spend(
        &self,
        ledger: &mut Ledger,
        asset: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        ledger.authorize(asset, self.address(), spender, amount)
    }

    /// Sends `amount` of `asset` from this account to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::AssetNotFound`] or
    /// [`AmmError::InsufficientBalance`].
    fn transfer(
        &self,
        ledger: &mut Ledger,
        asset: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        ledger.transfer_asset(asset, self.address(), to, amount)
    }
}

impl Account for Address {
    fn address(&self) -> Address {
        *self
    }
}
