//! Property-based tests using `proptest` for pool invariant validation.
//!
//! 1. **Output monotonicity**: a larger input never buys less, and only
//!    dust buys nothing.
//! 2. **Invariant preservation**: `reserve_asset × reserve_native` never
//!    decreases across swaps of either direction.
//! 3. **Round trip loses value**: native → token → native returns
//!    strictly less than was sold.
//! 4. **Ratio preservation**: a seeded deposit keeps the reserve ratio
//!    within floor tolerance.
//! 5. **Custody**: reserves equal the pool address's ledger balances.

use proptest::prelude::*;

use super::pool::{constant_product_output, Pool};
use crate::domain::{Address, Amount, FeeTier};
use crate::ledger::Ledger;
use crate::math::U256;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn provider() -> Address {
    Address::from_bytes([1u8; 32])
}

fn trader() -> Address {
    Address::from_bytes([2u8; 32])
}

/// Seeds a fresh pool with `(asset, native)` from `provider`, and funds
/// `trader` with native currency and the remaining asset supply.
fn make_pool(asset: u128, native: u128) -> (Ledger, Pool) {
    let supply = asset.saturating_mul(4);
    let mut ledger = Ledger::new();
    let Ok(gray) = ledger.deploy_asset(provider(), "Gray", "GRAY", Amount::new(supply)) else {
        panic!("valid asset");
    };
    let mut pool = Pool::new(gray, Address::derived(Address::POOL_TAG, 0), FeeTier::default());
    let funded = (
        ledger.fund_native(provider(), Amount::new(native.saturating_mul(4))),
        ledger.fund_native(trader(), Amount::new(native.saturating_mul(4))),
        ledger.authorize(gray, provider(), pool.address(), Amount::MAX),
        ledger.transfer_asset(gray, provider(), trader(), Amount::new(asset)),
        ledger.authorize(gray, trader(), pool.address(), Amount::MAX),
    );
    let (Ok(()), Ok(()), Ok(()), Ok(()), Ok(())) = funded else {
        panic!("valid funding");
    };
    let Ok(_) = pool.add_liquidity(&mut ledger, provider(), Amount::new(asset), Amount::new(native))
    else {
        panic!("valid seed");
    };
    (ledger, pool)
}

fn k(pool: &Pool) -> U256 {
    U256::from(pool.reserve_asset().get()) * U256::from(pool.reserve_native().get())
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values from dust-sized to 1e9 whole units at 18 decimals.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=1_000_000_000_000_000_000_000_000_000u128
}

/// Swap size as a fraction of the input reserve, in basis points.
fn fraction_strategy() -> impl Strategy<Value = u128> {
    1u128..=5_000u128
}

fn fee_strategy() -> impl Strategy<Value = FeeTier> {
    prop_oneof![
        Just(FeeTier::ZERO),
        Just(FeeTier::TIER_0_01_PERCENT),
        Just(FeeTier::TIER_0_05_PERCENT),
        Just(FeeTier::TIER_0_30_PERCENT),
        Just(FeeTier::TIER_1_00_PERCENT),
    ]
}

// ---------------------------------------------------------------------------
// Property 1: Output Monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_output_monotone_in_input(
        input_reserve in reserve_strategy(),
        output_reserve in reserve_strategy(),
        small in 0u128..=1_000_000_000_000u128,
        extra in 0u128..=1_000_000_000_000u128,
        fee in fee_strategy(),
    ) {
        let input_reserve = Amount::new(input_reserve);
        let output_reserve = Amount::new(output_reserve);
        let (Ok(lo), Ok(hi)) = (
            constant_product_output(fee, Amount::new(small), input_reserve, output_reserve),
            constant_product_output(fee, Amount::new(small + extra), input_reserve, output_reserve),
        ) else {
            return Err(TestCaseError::fail("pricing failed on valid reserves"));
        };
        prop_assert!(lo <= hi, "output decreased: {} > {}", lo, hi);
        prop_assert!(hi < output_reserve, "output drained the reserve");
    }

    #[test]
    fn prop_output_zero_only_for_dust(
        input_reserve in reserve_strategy(),
        output_reserve in reserve_strategy(),
        input in 1u128..=1_000_000_000_000_000_000_000u128,
    ) {
        let fee = FeeTier::default();
        let Ok(out) = constant_product_output(
            fee,
            Amount::new(input),
            Amount::new(input_reserve),
            Amount::new(output_reserve),
        ) else {
            return Err(TestCaseError::fail("pricing failed on valid reserves"));
        };
        // out == 0 iff input × m × R_out < R_in × d + input × m.
        let scaled = U256::from(input) * U256::from(fee.multiplier());
        let numerator = scaled * U256::from(output_reserve);
        let denominator = U256::from(input_reserve) * U256::from(fee.denominator()) + scaled;
        prop_assert_eq!(out.is_zero(), numerator < denominator);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Invariant Preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_k_non_decreasing_across_swaps(
        ra in reserve_strategy(),
        rn in reserve_strategy(),
        fraction in fraction_strategy(),
    ) {
        let (mut ledger, mut pool) = make_pool(ra, rn);
        let mut k_prev = k(&pool);

        for round in 0..4 {
            let result = if round % 2 == 0 {
                let native_in = (pool.reserve_native().get() * fraction / 10_000).max(1);
                let native_in = Amount::new(native_in);
                pool.native_to_token_swap(&mut ledger, trader(), native_in, Amount::ZERO)
            } else {
                let tokens_in = (pool.reserve_asset().get() * fraction / 10_000).max(1);
                let tokens_in = Amount::new(tokens_in);
                pool.token_to_native_swap(&mut ledger, trader(), tokens_in, Amount::ZERO)
            };
            if result.is_err() { continue; }
            let k_now = k(&pool);
            prop_assert!(k_now >= k_prev, "k decreased: {} < {}", k_now, k_prev);
            k_prev = k_now;
        }

        prop_assert_eq!(
            ledger.asset_balance(&pool.asset(), &pool.address()),
            pool.reserve_asset()
        );
        prop_assert_eq!(ledger.native_balance(&pool.address()), pool.reserve_native());
    }
}

// ---------------------------------------------------------------------------
// Property 3: Round Trip Loses Value
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_returns_less(
        ra in reserve_strategy(),
        rn in reserve_strategy(),
        fraction in fraction_strategy(),
    ) {
        let (mut ledger, mut pool) = make_pool(ra, rn);
        let native_in = (rn * fraction / 10_000).max(1);

        let Ok(bought) = pool.native_to_token_swap(
            &mut ledger,
            trader(),
            Amount::new(native_in),
            Amount::ZERO,
        ) else {
            return Ok(());
        };
        let Ok(sold) = pool.token_to_native_swap(
            &mut ledger,
            trader(),
            bought.amount_out(),
            Amount::ZERO,
        ) else {
            return Ok(());
        };

        prop_assert!(
            sold.amount_out() < Amount::new(native_in),
            "round trip should lose value: {} >= {}",
            sold.amount_out(), native_in
        );
    }
}

// ---------------------------------------------------------------------------
// Property 4: Ratio Preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_preserves_ratio(
        ra in reserve_strategy(),
        rn in reserve_strategy(),
        fraction in fraction_strategy(),
    ) {
        let (mut ledger, mut pool) = make_pool(ra, rn);
        let (a0, n0) = pool.reserves();
        let native_in = (rn * fraction / 10_000).max(1);

        let Ok(receipt) = pool.add_liquidity(
            &mut ledger,
            provider(),
            Amount::new(ra),
            Amount::new(native_in),
        ) else {
            return Ok(());
        };
        let (a1, n1) = pool.reserves();

        // a1 / n1 <= a0 / n0, and the deficit is under one unit of asset
        // per unit of native deposited.
        let lhs = U256::from(a1.get()) * U256::from(n0.get());
        let rhs = U256::from(a0.get()) * U256::from(n1.get());
        prop_assert!(lhs <= rhs);
        prop_assert!(rhs - lhs < U256::from(n0.get()));
        prop_assert!(receipt.asset_amount() <= Amount::new(ra));
    }
}
