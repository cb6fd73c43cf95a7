//! Native-currency balances.

use std::collections::BTreeMap;

use crate::domain::{Address, Amount};
use crate::error::{AmmError, Result};

/// Balances of the host's native currency.
///
/// Value enters only through [`mint`](Self::mint), which models the host's
/// pre-funded accounts, and afterwards only moves between holders.  The
/// sum of balances always equals [`circulating`](Self::circulating).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeCurrency {
    balances: BTreeMap<Address, Amount>,
    circulating: Amount,
}

impl NativeCurrency {
    /// Creates an empty native ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or(Amount::ZERO)
    }

    /// Total native value in existence.
    pub const fn circulating(&self) -> Amount {
        self.circulating
    }

    /// Credits `amount` of new native value to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the circulating total overflows.
    pub fn mint(&mut self, to: Address, amount: Amount) -> Result<()> {
        let circulating = self
            .circulating
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("native circulating supply overflow"))?;
        let balance = self
            .balance_of(&to)
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("native balance overflow"))?;
        self.circulating = circulating;
        self.set_balance(to, balance);
        Ok(())
    }

    /// Fails unless `holder` owns at least `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`].
    pub fn ensure_balance(&self, holder: &Address, amount: Amount) -> Result<()> {
        let have = self.balance_of(holder);
        if have < amount {
            return Err(AmmError::InsufficientBalance { have, need: amount });
        }
        Ok(())
    }

    /// Moves `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less than
    /// `amount`.  Nothing is written on error.
    pub fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        self.ensure_balance(&from, amount)?;
        if from == to || amount.is_zero() {
            return Ok(());
        }
        let from_after = self
            .balance_of(&from)
            .checked_sub(&amount)
            .ok_or(AmmError::Overflow("native balance underflow"))?;
        let to_after = self
            .balance_of(&to)
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("native balance overflow"))?;
        self.set_balance(from, from_after);
        self.set_balance(to, to_after);
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
