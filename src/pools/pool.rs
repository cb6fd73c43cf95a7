//! Constant-product pool pairing one asset with the native currency.
//!
//! # Pricing
//!
//! With `m = 10 000 − fee_bps` and `d = 10 000`:
//!
//! ```text
//! numerator   = input × m × output_reserve
//! denominator = input_reserve × d + input × m
//! output      = floor(numerator / denominator)
//! ```
//!
//! The whole input is added to the input reserve, so the retained fee
//! raises `reserve_asset × reserve_native` on every swap.
//!
//! # Custody
//!
//! The pool owns a ledger address.  Its reserve counters always equal the
//! asset and native balances of that address: every method that changes a
//! counter moves the matching value in the [`Ledger`] in the same call.
//! Caller-side transfers are validated before anything is written.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::domain::{
    Address, Amount, FeeTier, LiquidityReceipt, Rounding, Shares, SwapDirection, SwapReceipt,
};
use crate::error::{AmmError, Result};
use crate::ledger::Ledger;
use crate::math::{narrow, U256};

/// Where the native input of a buy hop comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NativeFunding {
    /// Pulled from this holder's native balance.
    Payer(Address),
    /// Already credited to the pool by a previous hop of the same route.
    Forwarded,
}

/// Output of a constant-product trade for `fee_tier`.
///
/// Returns zero when the input is too small to buy one base unit.
///
/// # Errors
///
/// - [`AmmError::EmptyReserves`] if either reserve is zero.
/// - [`AmmError::Overflow`] if the 256-bit numerator overflows.
pub fn constant_product_output(
    fee_tier: FeeTier,
    input: Amount,
    input_reserve: Amount,
    output_reserve: Amount,
) -> Result<Amount> {
    if input_reserve.is_zero() || output_reserve.is_zero() {
        return Err(AmmError::EmptyReserves);
    }
    let input_with_fee = U256::from(input.get())
        .checked_mul(U256::from(fee_tier.multiplier()))
        .ok_or(AmmError::Overflow("input with fee overflow"))?;
    let numerator = input_with_fee
        .checked_mul(U256::from(output_reserve.get()))
        .ok_or(AmmError::Overflow("output numerator overflow"))?;
    let denominator = U256::from(input_reserve.get())
        .checked_mul(U256::from(fee_tier.denominator()))
        .and_then(|scaled| scaled.checked_add(input_with_fee))
        .ok_or(AmmError::Overflow("output denominator overflow"))?;
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    narrow(numerator / denominator)
        .map(Amount::new)
        .ok_or(AmmError::Overflow("output exceeds u128"))
}

/// A liquidity pool trading one asset against the native currency.
///
/// Created empty by the [`PoolRegistry`](crate::registry::PoolRegistry);
/// the first [`add_liquidity`](Self::add_liquidity) sets the price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    asset: Address,
    address: Address,
    fee_tier: FeeTier,
    reserve_asset: Amount,
    reserve_native: Amount,
    total_shares: Shares,
    shares: BTreeMap<Address, Shares>,
}

impl Pool {
    pub(crate) fn new(asset: Address, address: Address, fee_tier: FeeTier) -> Self {
        Self {
            asset,
            address,
            fee_tier,
            reserve_asset: Amount::ZERO,
            reserve_native: Amount::ZERO,
            total_shares: Shares::ZERO,
            shares: BTreeMap::new(),
        }
    }

    /// The asset this pool trades.
    #[must_use]
    pub const fn asset(&self) -> Address {
        self.asset
    }

    /// The ledger address holding the pool's reserves.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    pub const fn reserve_asset(&self) -> Amount {
        self.reserve_asset
    }

    pub const fn reserve_native(&self) -> Amount {
        self.reserve_native
    }

    /// `(reserve_asset, reserve_native)`.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.reserve_asset, self.reserve_native)
    }

    pub const fn total_shares(&self) -> Shares {
        self.total_shares
    }

    /// Liquidity shares owned by `holder`.
    pub fn share_of(&self, holder: &Address) -> Shares {
        self.shares.get(holder).copied().unwrap_or(Shares::ZERO)
    }

    /// Returns `true` once both reserves are non-zero.
    #[must_use]
    pub const fn is_seeded(&self) -> bool {
        !self.reserve_asset.is_zero() && !self.reserve_native.is_zero()
    }

    /// Serializable snapshot of the pool.
    #[must_use]
    pub fn state(&self) -> PoolState {
        PoolState {
            asset: self.asset,
            address: self.address,
            fee_tier: self.fee_tier,
            reserve_asset: self.reserve_asset,
            reserve_native: self.reserve_native,
            total_shares: self.total_shares,
            providers: self.shares.len(),
        }
    }

    /// Output for `input` against the given reserves at this pool's fee.
    ///
    /// # Errors
    ///
    /// See [`constant_product_output`].
    pub fn get_output_amount(
        &self,
        input: Amount,
        input_reserve: Amount,
        output_reserve: Amount,
    ) -> Result<Amount> {
        constant_product_output(self.fee_tier, input, input_reserve, output_reserve)
    }

    /// Asset amount `native_in` would buy at the current reserves.
    ///
    /// # Errors
    ///
    /// [`AmmError::EmptyReserves`] if the pool is not seeded.
    pub fn quote_native_to_token(&self, native_in: Amount) -> Result<Amount> {
        self.get_output_amount(native_in, self.reserve_native, self.reserve_asset)
    }

    /// Native amount `tokens_in` would buy at the current reserves.
    ///
    /// # Errors
    ///
    /// [`AmmError::EmptyReserves`] if the pool is not seeded.
    pub fn quote_token_to_native(&self, tokens_in: Amount) -> Result<Amount> {
        self.get_output_amount(tokens_in, self.reserve_asset, self.reserve_native)
    }

    /// Asset base units per `native_unit` at the marginal, fee-free price.
    ///
    /// # Errors
    ///
    /// [`AmmError::EmptyReserves`] if the pool is not seeded.
    pub fn spot_price_ratio(&self, native_unit: Amount) -> Result<Amount> {
        if !self.is_seeded() {
            return Err(AmmError::EmptyReserves);
        }
        native_unit
            .checked_mul_div(&self.reserve_asset, &self.reserve_native, Rounding::Down)
            .ok_or(AmmError::Overflow("spot price overflow"))
    }

    /// Deposits both sides of the pool and mints liquidity shares.
    ///
    /// An empty pool accepts any positive pair and mints `native_amount`
    /// shares.  A seeded pool is anchored on the native side: it pulls
    /// exactly `floor(native_amount × reserve_asset / reserve_native)` of
    /// the asset and mints shares in the same proportion.
    ///
    /// The asset side is pulled with `transfer_from`, so `provider` must
    /// have authorized the pool's address beforehand.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] for a zero amount, or a deposit too
    ///   small to move any asset or mint any share.
    /// - [`AmmError::RatioViolation`] if `asset_amount` is below the
    ///   required asset amount.
    /// - [`AmmError::InsufficientBalance`] / [`AmmError::InsufficientAllowance`]
    ///   from the ledger.
    pub fn add_liquidity(
        &mut self,
        ledger: &mut Ledger,
        provider: Address,
        asset_amount: Amount,
        native_amount: Amount,
    ) -> Result<LiquidityReceipt> {
        if native_amount.is_zero() {
            return Err(AmmError::InvalidQuantity("native deposit must be positive"));
        }
        self.ensure_external(provider)?;

        let (asset_in, minted) = if self.total_shares.is_zero() {
            if asset_amount.is_zero() {
                return Err(AmmError::InvalidQuantity("first deposit requires both sides"));
            }
            (asset_amount, Shares::new(native_amount.get()))
        } else {
            let required = native_amount
                .checked_mul_div(&self.reserve_asset, &self.reserve_native, Rounding::Down)
                .ok_or(AmmError::Overflow("required asset overflow"))?;
            if asset_amount < required {
                return Err(AmmError::RatioViolation {
                    required,
                    supplied: asset_amount,
                });
            }
            let minted = Amount::new(self.total_shares.get())
                .checked_mul_div(&native_amount, &self.reserve_native, Rounding::Down)
                .ok_or(AmmError::Overflow("minted shares overflow"))?;
            if required.is_zero() || minted.is_zero() {
                return Err(AmmError::InvalidQuantity("deposit too small to mint shares"));
            }
            (required, Shares::new(minted.get()))
        };

        let reserve_asset = self
            .reserve_asset
            .checked_add(&asset_in)
            .ok_or(AmmError::Overflow("asset reserve overflow"))?;
        let reserve_native = self
            .reserve_native
            .checked_add(&native_amount)
            .ok_or(AmmError::Overflow("native reserve overflow"))?;
        let total_shares = self
            .total_shares
            .checked_add(&minted)
            .ok_or(AmmError::Overflow("total shares overflow"))?;
        let provider_shares = self
            .share_of(&provider)
            .checked_add(&minted)
            .ok_or(AmmError::Overflow("provider shares overflow"))?;

        ledger.ensure_spendable(&self.asset, &provider, &self.address, asset_in)?;
        ledger.ensure_native(&provider, native_amount)?;
        ledger.transfer_asset_from(self.asset, provider, self.address, self.address, asset_in)?;
        ledger.transfer_native(provider, self.address, native_amount)?;

        self.reserve_asset = reserve_asset;
        self.reserve_native = reserve_native;
        self.total_shares = total_shares;
        self.shares.insert(provider, provider_shares);

        debug!(
            asset = %self.asset,
            %provider,
            asset_in = %asset_in,
            native_in = %native_amount,
            minted = %minted,
            reserve_asset = %self.reserve_asset,
            reserve_native = %self.reserve_native,
            "liquidity added"
        );
        Ok(LiquidityReceipt::new(asset_in, native_amount, minted))
    }

    /// Burns `shares` and pays out the proportional part of both reserves.
    ///
    /// Each side is `floor(reserve × shares / total_shares)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] for zero shares or a redemption
    ///   worth nothing on both sides.
    /// - [`AmmError::InsufficientShares`] if `provider` holds fewer shares.
    pub fn remove_liquidity(
        &mut self,
        ledger: &mut Ledger,
        provider: Address,
        shares: Shares,
    ) -> Result<LiquidityReceipt> {
        if shares.is_zero() {
            return Err(AmmError::InvalidQuantity("cannot redeem zero shares"));
        }
        self.ensure_external(provider)?;
        let held = self.share_of(&provider);
        if held < shares {
            return Err(AmmError::InsufficientShares {
                have: held,
                need: shares,
            });
        }

        let burned = Amount::new(shares.get());
        let total = Amount::new(self.total_shares.get());
        let asset_out = self
            .reserve_asset
            .checked_mul_div(&burned, &total, Rounding::Down)
            .ok_or(AmmError::DivisionByZero)?;
        let native_out = self
            .reserve_native
            .checked_mul_div(&burned, &total, Rounding::Down)
            .ok_or(AmmError::DivisionByZero)?;
        if asset_out.is_zero() && native_out.is_zero() {
            return Err(AmmError::InvalidQuantity("redemption too small to withdraw"));
        }

        let reserve_asset = self
            .reserve_asset
            .checked_sub(&asset_out)
            .ok_or(AmmError::Overflow("asset reserve underflow"))?;
        let reserve_native = self
            .reserve_native
            .checked_sub(&native_out)
            .ok_or(AmmError::Overflow("native reserve underflow"))?;
        let total_shares = self
            .total_shares
            .checked_sub(&shares)
            .ok_or(AmmError::Overflow("total shares underflow"))?;
        let remaining = held
            .checked_sub(&shares)
            .ok_or(AmmError::Overflow("provider shares underflow"))?;

        ledger.transfer_asset(self.asset, self.address, provider, asset_out)?;
        ledger.transfer_native(self.address, provider, native_out)?;

        self.reserve_asset = reserve_asset;
        self.reserve_native = reserve_native;
        self.total_shares = total_shares;
        if remaining.is_zero() {
            self.shares.remove(&provider);
        } else {
            self.shares.insert(provider, remaining);
        }

        debug!(
            asset = %self.asset,
            %provider,
            burned = %shares,
            asset_out = %asset_out,
            native_out = %native_out,
            "liquidity removed"
        );
        Ok(LiquidityReceipt::new(asset_out, native_out, shares))
    }

    /// Sells `native_in` of `caller`'s native currency for the asset.
    ///
    /// # Errors
    ///
    /// - [`AmmError::EmptyReserves`] if the pool is not seeded.
    /// - [`AmmError::SlippageExceeded`] if the output is below
    ///   `min_tokens_out`.
    /// - [`AmmError::InvalidQuantity`] for a zero input or a zero output.
    /// - [`AmmError::InsufficientBalance`] if `caller` cannot pay.
    pub fn native_to_token_swap(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        native_in: Amount,
        min_tokens_out: Amount,
    ) -> Result<SwapReceipt> {
        self.buy_tokens_with_native(
            ledger,
            NativeFunding::Payer(caller),
            native_in,
            min_tokens_out,
            caller,
        )
    }

    /// Sells `tokens_sold` of `caller`'s asset for native currency.
    ///
    /// The asset is pulled with `transfer_from`; `caller` must have
    /// authorized the pool's address.
    ///
    /// # Errors
    ///
    /// - [`AmmError::EmptyReserves`] if the pool is not seeded.
    /// - [`AmmError::SlippageExceeded`] if the output is below
    ///   `min_native_out`.
    /// - [`AmmError::InvalidQuantity`] for a zero input or a zero output.
    /// - [`AmmError::InsufficientBalance`] / [`AmmError::InsufficientAllowance`]
    ///   from the ledger.
    pub fn token_to_native_swap(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        tokens_sold: Amount,
        min_native_out: Amount,
    ) -> Result<SwapReceipt> {
        self.sell_tokens_for_native(ledger, caller, tokens_sold, min_native_out, caller)
    }

    /// Single sell hop: pulls `tokens_sold` from `seller`, pays native to
    /// `recipient`.
    pub(crate) fn sell_tokens_for_native(
        &mut self,
        ledger: &mut Ledger,
        seller: Address,
        tokens_sold: Amount,
        min_native_out: Amount,
        recipient: Address,
    ) -> Result<SwapReceipt> {
        if tokens_sold.is_zero() {
            return Err(AmmError::InvalidQuantity("tokens sold must be positive"));
        }
        self.ensure_external(seller)?;
        let native_out = self.quote_token_to_native(tokens_sold)?;
        check_minimum(native_out, min_native_out)?;

        let reserve_asset = self
            .reserve_asset
            .checked_add(&tokens_sold)
            .ok_or(AmmError::Overflow("asset reserve overflow"))?;
        let reserve_native = self
            .reserve_native
            .checked_sub(&native_out)
            .ok_or(AmmError::Overflow("native reserve underflow"))?;
        let receipt = SwapReceipt::new(
            SwapDirection::TokenToNative,
            tokens_sold,
            native_out,
            self.fee_tier.fee_on(tokens_sold)?,
        )?;

        ledger.transfer_asset_from(self.asset, seller, self.address, self.address, tokens_sold)?;
        ledger.transfer_native(self.address, recipient, native_out)?;

        self.reserve_asset = reserve_asset;
        self.reserve_native = reserve_native;
        self.log_swap(&receipt);
        Ok(receipt)
    }

    /// Single buy hop: takes `native_in` per `funding`, pays the asset to
    /// `recipient`.
    pub(crate) fn buy_tokens_with_native(
        &mut self,
        ledger: &mut Ledger,
        funding: NativeFunding,
        native_in: Amount,
        min_tokens_out: Amount,
        recipient: Address,
    ) -> Result<SwapReceipt> {
        if native_in.is_zero() {
            return Err(AmmError::InvalidQuantity("native input must be positive"));
        }
        let tokens_out = self.quote_native_to_token(native_in)?;
        check_minimum(tokens_out, min_tokens_out)?;

        let reserve_native = self
            .reserve_native
            .checked_add(&native_in)
            .ok_or(AmmError::Overflow("native reserve overflow"))?;
        let reserve_asset = self
            .reserve_asset
            .checked_sub(&tokens_out)
            .ok_or(AmmError::Overflow("asset reserve underflow"))?;
        let receipt = SwapReceipt::new(
            SwapDirection::NativeToToken,
            native_in,
            tokens_out,
            self.fee_tier.fee_on(native_in)?,
        )?;

        match funding {
            NativeFunding::Payer(payer) => {
                self.ensure_external(payer)?;
                ledger.transfer_native(payer, self.address, native_in)?;
            }
            NativeFunding::Forwarded => {
                // The forwarded value sits exactly on top of the recorded reserve.
                let expected = reserve_native;
                let held = ledger.native_balance(&self.address);
                if held < expected {
                    return Err(AmmError::InsufficientBalance {
                        have: held,
                        need: expected,
                    });
                }
                if held != expected {
                    return Err(AmmError::PoolCustody(self.address));
                }
            }
        }
        ledger.transfer_asset(self.asset, self.address, recipient, tokens_out)?;

        self.reserve_native = reserve_native;
        self.reserve_asset = reserve_asset;
        self.log_swap(&receipt);
        Ok(receipt)
    }

    /// The pool's own address cannot act as a counterparty: its ledger
    /// moves would cancel out while the reserves change.
    fn ensure_external(&self, party: Address) -> Result<()> {
        if party == self.address {
            return Err(AmmError::PoolCustody(party));
        }
        Ok(())
    }

    fn log_swap(&self, receipt: &SwapReceipt) {
        debug!(
            asset = %self.asset,
            direction = ?receipt.direction(),
            amount_in = %receipt.amount_in(),
            amount_out = %receipt.amount_out(),
            reserve_asset = %self.reserve_asset,
            reserve_native = %self.reserve_native,
            "swap executed"
        );
    }
}

/// Rejects outputs below the caller's minimum, then dust outputs.
fn check_minimum(actual: Amount, minimum: Amount) -> Result<()> {
    if actual < minimum {
        return Err(AmmError::SlippageExceeded { minimum, actual });
    }
    if actual.is_zero() {
        return Err(AmmError::InvalidQuantity("output rounds to zero"));
    }
    Ok(())
}

/// Read-only, serializable view of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolState {
    pub asset: Address,
    pub address: Address,
    pub fee_tier: FeeTier,
    pub reserve_asset: Amount,
    pub reserve_native: Amount,
    pub total_shares: Shares,
    /// Number of holders with a non-zero share balance.
    pub providers: usize,
}
