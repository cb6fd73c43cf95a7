//! Integration tests exercising the exchange end to end.
//!
//! These tests drive the public [`Exchange`] API the way a harness would:
//! deploy assets, fund accounts, create and seed pools, swap and route,
//! and check balances, reserves and rollback behaviour.

#![allow(clippy::panic)]

use pairswap::config::ExchangeConfig;
use pairswap::domain::{Address, Amount, Decimals, FeeTier, Shares};
use pairswap::error::AmmError;
use pairswap::exchange::Exchange;
use pairswap::router::TokenToTokenSwap;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn to_wei(text: &str) -> Amount {
    let Ok(v) = Decimals::ETHER.parse_units(text) else {
        panic!("valid decimal: {text}");
    };
    v
}

fn units(whole: u64) -> Amount {
    Decimals::ETHER.units(whole)
}

fn owner() -> Address {
    Address::from_bytes([1u8; 32])
}

fn user() -> Address {
    Address::from_bytes([2u8; 32])
}

/// Exchange where `owner` and `user` each hold 10 000 native units.
fn funded_exchange() -> Exchange {
    init_tracing();
    let mut exchange = Exchange::default();
    for holder in [owner(), user()] {
        let Ok(()) = exchange.fund_native(holder, units(10_000)) else {
            panic!("faucet");
        };
    }
    exchange
}

fn deploy(exchange: &mut Exchange, ticker: &str, supply: u64) -> Address {
    let Ok(asset) = exchange.deploy_asset(&owner(), ticker, ticker, units(supply)) else {
        panic!("deploy {ticker}");
    };
    asset
}

/// Creates `asset`'s pool and seeds it from `owner`.
fn seed(exchange: &mut Exchange, asset: Address, asset_units: u64, native_units: u64) -> Address {
    let Ok(pool) = exchange.create_pool(asset) else {
        panic!("create pool");
    };
    let Ok(()) = exchange.authorize(&owner(), asset, pool, units(asset_units)) else {
        panic!("authorize");
    };
    let Ok(_) = exchange.add_liquidity(&owner(), asset, units(asset_units), units(native_units))
    else {
        panic!("seed pool");
    };
    pool
}

/// Reserves equal the pool address's ledger balances for every pool.
fn assert_custody(exchange: &Exchange) {
    for pool in exchange.registry().iter() {
        assert_eq!(
            exchange.asset_balance(&pool.asset(), &pool.address()),
            pool.reserve_asset()
        );
        assert_eq!(exchange.native_balance(&pool.address()), pool.reserve_native());
    }
}

/// Σ balances over every known holder equals the asset's supply.
fn assert_conserved(exchange: &Exchange, asset: Address) {
    let mut holders = vec![owner(), user()];
    holders.extend(exchange.registry().iter().map(|p| p.address()));
    let total: u128 = holders
        .iter()
        .map(|h| exchange.asset_balance(&asset, h).get())
        .sum();
    let Some(supply) = exchange.ledger().asset(&asset).map(|a| a.total_supply()) else {
        panic!("asset deployed");
    };
    assert_eq!(Amount::new(total), supply);
}

// ---------------------------------------------------------------------------
// Liquidity
// ---------------------------------------------------------------------------

#[test]
fn add_liquidity_to_empty_pool_sets_reserves() {
    let mut exchange = funded_exchange();
    let gray = deploy(&mut exchange, "GRAY", 1_000_000);
    let pool = seed(&mut exchange, gray, 4_000, 1_000);

    let Ok(state) = exchange.pool_state(&gray) else {
        panic!("pool exists");
    };
    assert_eq!(state.reserve_asset, units(4_000));
    assert_eq!(state.reserve_native, units(1_000));
    assert_eq!(exchange.native_balance(&pool), units(1_000));
    assert_eq!(exchange.asset_balance(&gray, &pool), units(4_000));
    assert_eq!(exchange.native_balance(&owner()), units(9_000));
}

#[test]
fn seeded_deposit_keeps_ratio() {
    let mut exchange = funded_exchange();
    let gray = deploy(&mut exchange, "GRAY", 1_000_000);
    let pool = seed(&mut exchange, gray, 4_000, 1_000);

    let Ok(()) = exchange.authorize(&owner(), gray, pool, units(1_000)) else {
        panic!("authorize");
    };
    let Ok(receipt) = exchange.add_liquidity(&owner(), gray, units(1_000), units(10)) else {
        panic!("deposit");
    };
    assert_eq!(receipt.asset_amount(), units(40));

    let short = exchange.add_liquidity(&owner(), gray, units(39), units(10));
    assert_eq!(
        short,
        Err(AmmError::RatioViolation {
            required: units(40),
            supplied: units(39),
        })
    );
    let Some(p) = exchange.pool(&gray) else {
        panic!("pool exists");
    };
    assert_eq!(p.reserves(), (units(4_040), units(1_010)));
    assert_custody(&exchange);
}

#[test]
fn remove_liquidity_pays_proportionally() {
    let mut exchange = funded_exchange();
    let gray = deploy(&mut exchange, "GRAY", 4_000);
    seed(&mut exchange, gray, 4_000, 1_000);

    let Some(held) = exchange.pool(&gray).map(|p| p.share_of(&owner())) else {
        panic!("pool exists");
    };
    let half = Shares::new(held.get() / 2);
    let Ok(receipt) = exchange.remove_liquidity(&owner(), gray, half) else {
        panic!("withdraw");
    };
    assert_eq!(receipt.asset_amount(), units(2_000));
    assert_eq!(receipt.native_amount(), units(500));
    assert_eq!(exchange.asset_balance(&gray, &owner()), units(2_000));
    assert_eq!(exchange.native_balance(&owner()), units(9_500));

    let too_many = exchange.remove_liquidity(&user(), gray, Shares::new(1));
    assert!(matches!(too_many, Err(AmmError::InsufficientShares { .. })));
    assert_custody(&exchange);
    assert_conserved(&exchange, gray);
}

// ---------------------------------------------------------------------------
// Single-hop swaps
// ---------------------------------------------------------------------------

#[test]
fn get_output_amount_for_four_to_one_pool() {
    let mut exchange = funded_exchange();
    let gray = deploy(&mut exchange, "GRAY", 1_000_000);
    seed(&mut exchange, gray, 4_000, 1_000);

    let Ok(out) = exchange.get_output_amount(units(1), units(1_000), units(4_000)) else {
        panic!("priced");
    };
    assert!(out >= to_wei("3.99") && out < units(4));
    let Some(Ok(quote)) = exchange.pool(&gray).map(|p| p.quote_native_to_token(units(1))) else {
        panic!("quoted");
    };
    assert_eq!(quote, out);
}

#[test]
fn native_to_token_swap_within_slippage() {
    let mut exchange = funded_exchange();
    let gray = deploy(&mut exchange, "GRAY", 1_000_000);
    seed(&mut exchange, gray, 4_000, 1_000);

    let Ok(receipt) = exchange.native_to_token_swap(&user(), gray, units(1), to_wei("3.99")) else {
        panic!("swap");
    };
    let received = exchange.asset_balance(&gray, &user());
    assert_eq!(received, receipt.amount_out());
    assert!(received >= to_wei("3.99"));
    assert_eq!(exchange.native_balance(&user()), units(9_999));
    assert_custody(&exchange);
}

#[test]
fn native_to_token_swap_below_minimum_reverts() {
    let mut exchange = funded_exchange();
    let gray = deploy(&mut exchange, "GRAY", 1_000_000);
    seed(&mut exchange, gray, 4_000, 1_000);
    let before = exchange.pool_state(&gray);

    let result = exchange.native_to_token_swap(&user(), gray, units(1), units(4));
    let Err(AmmError::SlippageExceeded { minimum, actual }) = result else {
        panic!("expected slippage error");
    };
    assert_eq!(minimum, units(4));
    assert!(actual < units(4));
    assert_eq!(exchange.pool_state(&gray), before);
    assert_eq!(exchange.native_balance(&user()), units(10_000));
    assert_eq!(exchange.asset_balance(&gray, &user()), Amount::ZERO);
}

#[test]
fn token_to_native_swap_requires_allowance() {
    let mut exchange = funded_exchange();
    let gray = deploy(&mut exchange, "GRAY", 1_000_000);
    let pool = seed(&mut exchange, gray, 1_000, 1_000);

    let denied = exchange.token_to_native_swap(&owner(), gray, units(10), Amount::ZERO);
    assert!(matches!(denied, Err(AmmError::InsufficientAllowance { .. })));

    let Ok(()) = exchange.authorize(&owner(), gray, pool, units(10)) else {
        panic!("authorize");
    };
    let Ok(receipt) = exchange.token_to_native_swap(&owner(), gray, units(10), units(9)) else {
        panic!("swap");
    };
    assert!(receipt.amount_out() > units(9) && receipt.amount_out() < units(10));
    assert_eq!(exchange.allowance(&gray, &owner(), &pool), Amount::ZERO);
    assert_custody(&exchange);
    assert_conserved(&exchange, gray);
}

#[test]
fn swap_against_missing_or_empty_pool() {
    let mut exchange = funded_exchange();
    let gray = deploy(&mut exchange, "GRAY", 1_000);
    assert_eq!(
        exchange.native_to_token_swap(&user(), gray, units(1), Amount::ZERO),
        Err(AmmError::PoolNotFound(gray))
    );
    let Ok(_) = exchange.create_pool(gray) else {
        panic!("create pool");
    };
    assert_eq!(
        exchange.native_to_token_swap(&user(), gray, units(1), Amount::ZERO),
        Err(AmmError::EmptyReserves)
    );
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[test]
fn token_to_token_swap_through_two_pools() {
    let mut exchange = funded_exchange();
    let gray = deploy(&mut exchange, "GRAY", 1_010);
    let fast = deploy(&mut exchange, "FAST", 1_000);
    let gray_pool = seed(&mut exchange, gray, 1_000, 1_000);
    seed(&mut exchange, fast, 1_000, 1_000);

    let Ok(()) = exchange.authorize(&owner(), gray, gray_pool, units(10)) else {
        panic!("authorize");
    };
    let request = TokenToTokenSwap {
        tokens_sold: units(10),
        min_native_out: units(9),
        min_tokens_out: units(9),
        destination_asset: fast,
    };
    let Ok(receipt) = exchange.token_to_token_swap(&owner(), gray, &request) else {
        panic!("route");
    };

    let received = exchange.asset_balance(&fast, &owner());
    assert_eq!(received, receipt.tokens_out);
    assert!(received > units(9) && received < units(10));
    assert_eq!(exchange.asset_balance(&gray, &owner()), Amount::ZERO);
    // The forwarded native never touches the caller.
    assert_eq!(exchange.native_balance(&owner()), units(8_000));
    assert_custody(&exchange);
    assert_conserved(&exchange, gray);
    assert_conserved(&exchange, fast);
}

#[test]
fn failed_route_restores_both_pools() {
    let mut exchange = funded_exchange();
    let gray = deploy(&mut exchange, "GRAY", 1_010);
    let fast = deploy(&mut exchange, "FAST", 1_000);
    let gray_pool = seed(&mut exchange, gray, 1_000, 1_000);
    seed(&mut exchange, fast, 1_000, 1_000);
    let Ok(()) = exchange.authorize(&owner(), gray, gray_pool, units(10)) else {
        panic!("authorize");
    };
    let (gray_before, fast_before) = (exchange.pool_state(&gray), exchange.pool_state(&fast));

    let greedy = TokenToTokenSwap {
        tokens_sold: units(10),
        min_native_out: units(9),
        min_tokens_out: units(10),
        destination_asset: fast,
    };
    let result = exchange.token_to_token_swap(&owner(), gray, &greedy);
    assert!(matches!(result, Err(AmmError::SlippageExceeded { .. })));

    let unfunded = TokenToTokenSwap {
        tokens_sold: units(11),
        min_native_out: Amount::ZERO,
        min_tokens_out: Amount::ZERO,
        destination_asset: fast,
    };
    let result = exchange.token_to_token_swap(&owner(), gray, &unfunded);
    assert!(matches!(result, Err(AmmError::InsufficientBalance { .. })));

    assert_eq!(exchange.pool_state(&gray), gray_before);
    assert_eq!(exchange.pool_state(&fast), fast_before);
    assert_eq!(exchange.asset_balance(&gray, &owner()), units(10));
    assert_eq!(exchange.allowance(&gray, &owner(), &gray_pool), units(10));
}

#[test]
fn route_to_same_asset_rejected() {
    let mut exchange = funded_exchange();
    let gray = deploy(&mut exchange, "GRAY", 1_010);
    seed(&mut exchange, gray, 1_000, 1_000);
    let request = TokenToTokenSwap {
        tokens_sold: units(1),
        min_native_out: Amount::ZERO,
        min_tokens_out: Amount::ZERO,
        destination_asset: gray,
    };
    assert!(matches!(
        exchange.token_to_token_swap(&owner(), gray, &request),
        Err(AmmError::InvalidAsset(_))
    ));
}

// ---------------------------------------------------------------------------
// Custody
// ---------------------------------------------------------------------------

#[test]
fn faucet_cannot_credit_pool_address() {
    let mut exchange = funded_exchange();
    let gray = deploy(&mut exchange, "GRAY", 4_000);
    let pool = seed(&mut exchange, gray, 4_000, 1_000);

    assert_eq!(exchange.fund_native(pool, units(5)), Err(AmmError::PoolCustody(pool)));
    assert_eq!(exchange.native_balance(&pool), units(1_000));
    assert_custody(&exchange);
}

#[test]
fn pool_address_cannot_send_or_receive_transfers() {
    let mut exchange = funded_exchange();
    let gray = deploy(&mut exchange, "GRAY", 5_000);
    let pool = seed(&mut exchange, gray, 4_000, 1_000);

    assert_eq!(
        exchange.transfer(&pool, gray, user(), units(100)),
        Err(AmmError::PoolCustody(pool))
    );
    assert_eq!(
        exchange.transfer(&owner(), gray, pool, units(100)),
        Err(AmmError::PoolCustody(pool))
    );
    assert_eq!(
        exchange.authorize(&pool, gray, user(), units(100)),
        Err(AmmError::PoolCustody(pool))
    );
    assert_eq!(exchange.asset_balance(&gray, &pool), units(4_000));
    assert_eq!(exchange.asset_balance(&gray, &user()), Amount::ZERO);
    assert_custody(&exchange);
    assert_conserved(&exchange, gray);
}

#[test]
fn pool_address_cannot_trade_as_caller() {
    let mut exchange = funded_exchange();
    let gray = deploy(&mut exchange, "GRAY", 4_000);
    let fast = deploy(&mut exchange, "FAST", 1_000);
    let gray_pool = seed(&mut exchange, gray, 4_000, 1_000);
    let fast_pool = seed(&mut exchange, fast, 1_000, 1_000);

    // Its own pool and a neighbouring pool are both refused.
    for caller in [gray_pool, fast_pool] {
        assert_eq!(
            exchange.native_to_token_swap(&caller, gray, units(1), Amount::ZERO),
            Err(AmmError::PoolCustody(caller))
        );
        assert_eq!(
            exchange.token_to_native_swap(&caller, gray, units(1), Amount::ZERO),
            Err(AmmError::PoolCustody(caller))
        );
        assert_eq!(
            exchange.add_liquidity(&caller, gray, units(4), units(1)),
            Err(AmmError::PoolCustody(caller))
        );
        assert_eq!(
            exchange.remove_liquidity(&caller, gray, Shares::new(1)),
            Err(AmmError::PoolCustody(caller))
        );
    }

    let request = TokenToTokenSwap {
        tokens_sold: units(1),
        min_native_out: Amount::ZERO,
        min_tokens_out: Amount::ZERO,
        destination_asset: gray,
    };
    assert_eq!(
        exchange.token_to_token_swap(&fast_pool, fast, &request),
        Err(AmmError::PoolCustody(fast_pool))
    );

    let Ok(gray_state) = exchange.pool_state(&gray) else {
        panic!("gray pool");
    };
    assert_eq!(gray_state.reserve_asset, units(4_000));
    assert_eq!(gray_state.reserve_native, units(1_000));
    assert_custody(&exchange);
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[test]
fn second_pool_for_asset_rejected() {
    let mut exchange = funded_exchange();
    let gray = deploy(&mut exchange, "GRAY", 1_000);
    let Ok(pool) = exchange.create_pool(gray) else {
        panic!("create pool");
    };
    assert_eq!(
        exchange.create_pool(gray),
        Err(AmmError::PoolAlreadyExists(gray))
    );
    assert_eq!(exchange.pool_count(), 1);
    assert_eq!(exchange.pool_address(&gray), Some(pool));
    assert_eq!(exchange.registry().asset_of(&pool), Some(gray));
}

#[test]
fn reserved_assets_cannot_back_pools() {
    let mut exchange = funded_exchange();
    assert!(matches!(
        exchange.create_pool(Address::ZERO),
        Err(AmmError::InvalidAsset(_))
    ));
    assert!(matches!(
        exchange.create_pool(Address::NATIVE),
        Err(AmmError::InvalidAsset(_))
    ));
    assert_eq!(exchange.pool_count(), 0);
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn exchange_from_config_file_uses_its_fee() {
    init_tracing();
    let path = std::env::temp_dir().join(format!("pairswap-{}.toml", std::process::id()));
    let Ok(()) = std::fs::write(&path, "fee_tier = 30\nnative_decimals = 18\n") else {
        panic!("write config");
    };
    let loaded = ExchangeConfig::from_file(&path);
    let _ = std::fs::remove_file(&path);
    let Ok(config) = loaded else {
        panic!("load config");
    };
    assert_eq!(config.fee_tier(), FeeTier::TIER_0_30_PERCENT);

    let Ok(mut exchange) = Exchange::new(config) else {
        panic!("valid config");
    };
    assert_eq!(exchange.parse_native("10"), Ok(units(10)));
    let Ok(()) = exchange.fund_native(owner(), units(10_000)) else {
        panic!("faucet");
    };
    let gray = deploy(&mut exchange, "GRAY", 1_000);
    seed(&mut exchange, gray, 1_000, 1_000);
    let Some(pool) = exchange.pool(&gray) else {
        panic!("pool exists");
    };
    assert_eq!(pool.fee_tier(), FeeTier::TIER_0_30_PERCENT);
    assert_eq!(
        pool.quote_token_to_native(units(10)),
        Ok(Amount::new(9_871_580_343_970_612_988))
    );
}
