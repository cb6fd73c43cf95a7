//! Fixed-supply fungible asset with delegated spending.

use std::collections::BTreeMap;

use crate::domain::{Address, Amount, Decimals};
use crate::error::{AmmError, Result};

/// A fungible asset: fixed supply, per-holder balances and allowances.
///
/// The whole supply is credited to the creator at construction and never
/// changes afterwards, so the sum of all balances always equals
/// [`total_supply`](Self::total_supply).
///
/// Every mutating method validates before it writes.  A call that returns
/// `Err` has left balances and allowances exactly as they were.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Address, Amount};
/// use pairswap::ledger::FungibleAsset;
///
/// let owner = Address::from_bytes([1u8; 32]);
/// let pool = Address::from_bytes([2u8; 32]);
/// let gray = Address::from_bytes([3u8; 32]);
///
/// let mut asset = FungibleAsset::new(gray, owner, "Gray", "GRAY", Amount::new(1_000))
///     .expect("positive supply");
/// asset.authorize(owner, pool, Amount::new(100));
/// asset.transfer_from(owner, pool, pool, Amount::new(60)).expect("authorized");
///
/// assert_eq!(asset.balance_of(&pool), Amount::new(60));
/// assert_eq!(asset.allowance(&owner, &pool), Amount::new(40));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FungibleAsset {
    address: Address,
    name: String,
    ticker: String,
    decimals: Decimals,
    total_supply: Amount,
    balances: BTreeMap<Address, Amount>,
    allowances: BTreeMap<(Address, Address), Amount>,
}

impl FungibleAsset {
    /// Creates an asset at `address` and credits `initial_supply` to `creator`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidSupply`] if `initial_supply` is zero.
    pub fn new(
        address: Address,
        creator: Address,
        name: impl Into<String>,
        ticker: impl Into<String>,
        initial_supply: Amount,
    ) -> Result<Self> {
        if initial_supply.is_zero() {
            return Err(AmmError::InvalidSupply);
        }
        let mut balances = BTreeMap::new();
        balances.insert(creator, initial_supply);
        Ok(Self {
            address,
            name: name.into(),
            ticker: ticker.into(),
            decimals: Decimals::default(),
            total_supply: initial_supply,
            balances,
            allowances: BTreeMap::new(),
        })
    }

    /// Address the asset is deployed at.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short symbol.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Balance of `holder`; zero for unknown holders.
    pub fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or(Amount::ZERO)
    }

    /// Amount `spender` may still move out of `owner`'s balance.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Number of holders with a non-zero balance.
    #[must_use]
    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Sets the allowance of `spender` over `owner`'s balance to `amount`.
    ///
    /// The value replaces any previous allowance; it is not added to it.
    pub fn authorize(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    /// Moves `amount` from `from` to `to` on the holder's own authority.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less than
    /// `amount`.
    pub fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        self.transfer_from(from, from, to, amount)
    }

    /// Checks that `spender` could move `amount` out of `owner`'s balance.
    ///
    /// Performs exactly the validation of [`transfer_from`](Self::transfer_from)
    /// without writing anything.
    ///
    /// # Errors
    ///
    /// Same as [`transfer_from`](Self::transfer_from).
    pub fn ensure_spendable(
        &self,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<()> {
        let have = self.balance_of(owner);
        if have < amount {
            return Err(AmmError::InsufficientBalance { have, need: amount });
        }
        if spender != owner {
            let granted = self.allowance(owner, spender);
            if granted < amount {
                return Err(AmmError::InsufficientAllowance {
                    have: granted,
                    need: amount,
                });
            }
        }
        Ok(())
    }

    /// Moves `amount` from `owner` to `to`, spending `spender`'s allowance.
    ///
    /// When `spender == owner` no allowance is consulted or consumed.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientBalance`] if `owner` holds less than `amount`.
    /// - [`AmmError::InsufficientAllowance`] if `spender` is not the owner
    ///   and is authorized for less than `amount`.
    /// - [`AmmError::Overflow`] if crediting `to` overflows.
    pub fn transfer_from(
        &mut self,
        owner: Address,
        spender: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.ensure_spendable(&owner, &spender, amount)?;

        let owner_after = self
            .balance_of(&owner)
            .checked_sub(&amount)
            .ok_or(AmmError::Overflow("owner balance underflow"))?;
        let to_after = if to == owner {
            None
        } else {
            Some(
                self.balance_of(&to)
                    .checked_add(&amount)
                    .ok_or(AmmError::Overflow("recipient balance overflow"))?,
            )
        };
        let allowance_after = if spender == owner {
            None
        } else {
            Some(
                self.allowance(&owner, &spender)
                    .checked_sub(&amount)
                    .ok_or(AmmError::Overflow("allowance underflow"))?,
            )
        };

        if let Some(to_after) = to_after {
            self.set_balance(owner, owner_after);
            self.set_balance(to, to_after);
        }
        if let Some(remaining) = allowance_after {
            self.authorize(owner, spender, remaining);
        }
        Ok(())
    }

    fn set_balance(&mut self, holder: Address, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&holder);
        } else {
            self.balances.insert(holder, amount);
        }
    }
}
