//! Transactional facade over the ledger, the registry and the router.
//!
//! Every mutating operation runs inside [`Exchange::transact`]: the ledger
//! and the registry are checkpointed first and restored if the operation
//! returns `Err`.  A caller therefore observes each operation either fully
//! applied or not applied at all, including multi-hop routes that fail on
//! their second pool.
//!
//! Pool addresses are custody only.  No operation accepts one as its
//! caller, and neither the faucet nor a plain transfer credits one.

use tracing::{debug, warn};

use crate::config::ExchangeConfig;
use crate::domain::{Address, Amount, LiquidityReceipt, Shares, SwapReceipt};
use crate::error::{AmmError, Result};
use crate::ledger::Ledger;
use crate::pools::{constant_product_output, Pool, PoolState};
use crate::registry::PoolRegistry;
use crate::router::{self, RouteReceipt, TokenToTokenSwap};
use crate::traits::Account;

/// An exchange: assets, native balances and one pool per asset.
///
/// # Example
///
/// ```rust
/// use pairswap::domain::{Address, Decimals};
/// use pairswap::exchange::Exchange;
///
/// let units = |n| Decimals::ETHER.units(n);
/// let owner = Address::from_bytes([1u8; 32]);
/// let mut exchange = Exchange::default();
///
/// exchange.fund_native(owner, units(10_000)).expect("faucet");
/// let gray = exchange.deploy_asset(&owner, "Gray", "GRAY", units(4_000)).expect("deployed");
/// let pool = exchange.create_pool(gray).expect("new pool");
/// exchange.authorize(&owner, gray, pool, units(4_000)).expect("authorized");
/// exchange.add_liquidity(&owner, gray, units(4_000), units(1_000)).expect("seeded");
///
/// let min = Decimals::ETHER.parse_units("3.99").expect("decimal");
/// let receipt = exchange.native_to_token_swap(&owner, gray, units(1), min).expect("swapped");
/// assert!(receipt.amount_out() >= min);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Exchange {
    config: ExchangeConfig,
    ledger: Ledger,
    registry: PoolRegistry,
}

impl Exchange {
    /// Creates an empty exchange.
    ///
    /// # Errors
    ///
    /// Propagates [`ExchangeConfig::validate`].
    pub fn new(config: ExchangeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ledger: Ledger::new(),
            registry: PoolRegistry::new(),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub const fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    /// Runs `operation` against the ledger and registry as one unit.
    ///
    /// On `Err` both are restored to the checkpoint taken before the call.
    ///
    /// # Errors
    ///
    /// Whatever `operation` returns.
    pub fn transact<T, F>(&mut self, name: &'static str, operation: F) -> Result<T>
    where
        F: FnOnce(&mut Ledger, &mut PoolRegistry) -> Result<T>,
    {
        let checkpoint = (self.ledger.clone(), self.registry.clone());
        match operation(&mut self.ledger, &mut self.registry) {
            Ok(value) => {
                debug!(operation = name, "committed");
                Ok(value)
            }
            Err(err) => {
                (self.ledger, self.registry) = checkpoint;
                warn!(operation = name, error = %err, "reverted");
                Err(err)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Ledger operations
    // -----------------------------------------------------------------------

    /// Deploys an asset whose whole supply is held by `creator`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidSupply`] for a zero supply.
    pub fn deploy_asset(
        &mut self,
        creator: &impl Account,
        name: &str,
        ticker: &str,
        initial_supply: Amount,
    ) -> Result<Address> {
        let creator = creator.address();
        self.transact("deploy_asset", |ledger, registry| {
            ensure_not_pool(registry, creator)?;
            ledger.deploy_asset(creator, name, ticker, initial_supply)
        })
    }

    /// Credits native currency to `holder` (genesis faucet).
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolCustody`] if `holder` is a pool address.
    /// - [`AmmError::Overflow`] if the circulating total overflows.
    pub fn fund_native(&mut self, holder: Address, amount: Amount) -> Result<()> {
        self.transact("fund_native", |ledger, registry| {
            ensure_not_pool(registry, holder)?;
            ledger.fund_native(holder, amount)
        })
    }

    /// Sets `spender`'s allowance over `caller`'s balance of `asset`.
    ///
    /// # Errors
    ///
    /// [`AmmError::AssetNotFound`] if `asset` is not deployed.
    pub fn authorize(
        &mut self,
        caller: &impl Account,
        asset: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<()> {
        self.transact("authorize", |ledger, registry| {
            ensure_not_pool(registry, caller.address())?;
            caller.authorize_spend(ledger, asset, spender, amount)
        })
    }

    /// Sends `amount` of `asset` from `caller` to `to`.
    ///
    /// Pool addresses only move value through liquidity and swaps, so
    /// their reserves always match their balances.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolCustody`] if `caller` or `to` is a pool address.
    /// - [`AmmError::AssetNotFound`] / [`AmmError::InsufficientBalance`].
    pub fn transfer(
        &mut self,
        caller: &impl Account,
        asset: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.transact("transfer", |ledger, registry| {
            ensure_not_pool(registry, caller.address())?;
            ensure_not_pool(registry, to)?;
            caller.transfer(ledger, asset, to, amount)
        })
    }

    // -----------------------------------------------------------------------
    // Pool operations
    // -----------------------------------------------------------------------

    /// Creates the pool for a deployed `asset` at the configured fee tier.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] for a reserved or undeployed asset.
    /// - [`AmmError::PoolAlreadyExists`] if the asset already has a pool.
    pub fn create_pool(&mut self, asset: Address) -> Result<Address> {
        let fee_tier = self.config.fee_tier();
        self.transact("create_pool", |ledger, registry| {
            if !asset.is_reserved() && ledger.asset(&asset).is_none() {
                return Err(AmmError::InvalidAsset("asset is not deployed"));
            }
            registry.create_pool(asset, fee_tier)
        })
    }

    /// Deposits into `asset`'s pool; see [`Pool::add_liquidity`].
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] plus every error of the pool operation.
    pub fn add_liquidity(
        &mut self,
        caller: &impl Account,
        asset: Address,
        asset_amount: Amount,
        native_amount: Amount,
    ) -> Result<LiquidityReceipt> {
        let caller = caller.address();
        self.transact("add_liquidity", |ledger, registry| {
            ensure_not_pool(registry, caller)?;
            registry
                .pool_mut(&asset)?
                .add_liquidity(ledger, caller, asset_amount, native_amount)
        })
    }

    /// Redeems shares of `asset`'s pool; see [`Pool::remove_liquidity`].
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] plus every error of the pool operation.
    pub fn remove_liquidity(
        &mut self,
        caller: &impl Account,
        asset: Address,
        shares: Shares,
    ) -> Result<LiquidityReceipt> {
        let caller = caller.address();
        self.transact("remove_liquidity", |ledger, registry| {
            ensure_not_pool(registry, caller)?;
            registry
                .pool_mut(&asset)?
                .remove_liquidity(ledger, caller, shares)
        })
    }

    /// Buys `asset` with native currency.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] plus every error of
    /// [`Pool::native_to_token_swap`].
    pub fn native_to_token_swap(
        &mut self,
        caller: &impl Account,
        asset: Address,
        native_in: Amount,
        min_tokens_out: Amount,
    ) -> Result<SwapReceipt> {
        let caller = caller.address();
        self.transact("native_to_token_swap", |ledger, registry| {
            ensure_not_pool(registry, caller)?;
            registry
                .pool_mut(&asset)?
                .native_to_token_swap(ledger, caller, native_in, min_tokens_out)
        })
    }

    /// Sells `asset` for native currency.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] plus every error of
    /// [`Pool::token_to_native_swap`].
    pub fn token_to_native_swap(
        &mut self,
        caller: &impl Account,
        asset: Address,
        tokens_sold: Amount,
        min_native_out: Amount,
    ) -> Result<SwapReceipt> {
        let caller = caller.address();
        self.transact("token_to_native_swap", |ledger, registry| {
            ensure_not_pool(registry, caller)?;
            registry
                .pool_mut(&asset)?
                .token_to_native_swap(ledger, caller, tokens_sold, min_native_out)
        })
    }

    /// Swaps `source_asset` for another asset through both pools.
    ///
    /// # Errors
    ///
    /// Every error of [`router::token_to_token_swap`].
    pub fn token_to_token_swap(
        &mut self,
        caller: &impl Account,
        source_asset: Address,
        request: &TokenToTokenSwap,
    ) -> Result<RouteReceipt> {
        let caller = caller.address();
        self.transact("token_to_token_swap", |ledger, registry| {
            ensure_not_pool(registry, caller)?;
            router::token_to_token_swap(ledger, registry, caller, source_asset, request)
        })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn pool(&self, asset: &Address) -> Option<&Pool> {
        self.registry.get_pool(asset)
    }

    /// Ledger address of `asset`'s pool, the spender to authorize.
    #[must_use]
    pub fn pool_address(&self, asset: &Address) -> Option<Address> {
        self.pool(asset).map(Pool::address)
    }

    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.registry.pool_count()
    }

    pub fn asset_balance(&self, asset: &Address, holder: &Address) -> Amount {
        self.ledger.asset_balance(asset, holder)
    }

    pub fn native_balance(&self, holder: &Address) -> Amount {
        self.ledger.native_balance(holder)
    }

    pub fn allowance(&self, asset: &Address, owner: &Address, spender: &Address) -> Amount {
        self.ledger.allowance(asset, owner, spender)
    }

    /// Parses a decimal native amount at the configured precision.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidPrecision`] for malformed text or too many
    /// fractional digits.
    pub fn parse_native(&self, text: &str) -> Result<Amount> {
        self.config.native_decimals().parse_units(text)
    }

    /// Renders a native amount at the configured precision.
    #[must_use]
    pub fn format_native(&self, amount: Amount) -> String {
        self.config.native_decimals().format_units(amount)
    }

    /// Pure pricing at the configured fee tier.
    ///
    /// # Errors
    ///
    /// [`AmmError::EmptyReserves`] if either reserve is zero.
    pub fn get_output_amount(
        &self,
        input: Amount,
        input_reserve: Amount,
        output_reserve: Amount,
    ) -> Result<Amount> {
        constant_product_output(self.config.fee_tier(), input, input_reserve, output_reserve)
    }

    /// Snapshot of `asset`'s pool.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] if `asset` has no pool.
    pub fn pool_state(&self, asset: &Address) -> Result<PoolState> {
        self.registry.pool(asset).map(Pool::state)
    }
}

/// Pool addresses hold reserves only; they never act as a caller.
fn ensure_not_pool(registry: &PoolRegistry, address: Address) -> Result<()> {
    if registry.is_pool(&address) {
        return Err(AmmError::PoolCustody(address));
    }
    Ok(())
}
