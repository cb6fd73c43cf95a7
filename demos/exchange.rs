//! Exchange walkthrough.
//!
//! Deploys two assets, seeds their pools, then trades native → token,
//! token → native and token → token, printing balances along the way.
//! Set `RUST_LOG=pairswap=debug` to see the exchange's tracing events.
//!
//! # Run
//!
//! ```bash
//! cargo run --example exchange
//! ```

use pairswap::config::ExchangeConfig;
use pairswap::domain::{Address, Decimals};
use pairswap::exchange::Exchange;
use pairswap::router::TokenToTokenSwap;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Constant-product exchange ===\n");

    // ── 1. Configure the exchange ───────────────────────────────────────
    let config = ExchangeConfig::from_toml_str("fee_tier = 5\nnative_decimals = 18\n")?;
    let wei = config.native_decimals();
    let units = |n| wei.units(n);
    let mut exchange = Exchange::new(config)?;
    println!("Fee tier: {}", config.fee_tier());

    // ── 2. Fund two accounts ────────────────────────────────────────────
    let owner = Address::from_bytes([1u8; 32]);
    let user = Address::from_bytes([2u8; 32]);
    exchange.fund_native(owner, units(10_000))?;
    exchange.fund_native(user, units(10_000))?;

    // ── 3. Deploy GRAY and FAST, seed their pools ──────────────────────
    let gray = exchange.deploy_asset(&owner, "GrayToken", "GRAY", units(5_010))?;
    let fast = exchange.deploy_asset(&owner, "FastToken", "FAST", units(1_000))?;

    let gray_pool = exchange.create_pool(gray)?;
    exchange.authorize(&owner, gray, gray_pool, units(5_010))?;
    exchange.add_liquidity(&owner, gray, units(4_000), units(1_000))?;

    let fast_pool = exchange.create_pool(fast)?;
    exchange.authorize(&owner, fast, fast_pool, units(1_000))?;
    exchange.add_liquidity(&owner, fast, units(1_000), units(1_000))?;

    println!("\nGRAY pool {gray_pool}");
    println!("FAST pool {fast_pool}");

    // ── 4. Native → token: 1 native buys almost 4 GRAY ────────────────
    let min = Decimals::ETHER.parse_units("3.99")?;
    let bought = exchange.native_to_token_swap(&user, gray, units(1), min)?;
    println!("\n--- Buy GRAY with 1 native ---");
    println!("  Received:    {} GRAY", wei.format_units(bought.amount_out()));
    println!("  Fee share:   {} native", exchange.format_native(bought.fee()));

    // ── 5. A minimum of 4 GRAY is out of reach and changes nothing ─────
    let greedy = exchange.native_to_token_swap(&user, gray, units(1), units(4));
    println!("\n--- Buy GRAY with minimum 4 ---");
    println!("  Result:      {}", greedy.err().map_or_else(String::new, |e| e.to_string()));

    // ── 6. Token → token: GRAY → native → FAST ─────────────────────────
    let route = TokenToTokenSwap {
        tokens_sold: units(10),
        min_native_out: units(9),
        min_tokens_out: units(9),
        destination_asset: fast,
    };
    let receipt = exchange.token_to_token_swap(&owner, gray, &route)?;
    println!("\n--- Route 10 GRAY → FAST ---");
    println!("  Native hop:  {}", exchange.format_native(receipt.native_out));
    println!("  Received:    {} FAST", wei.format_units(receipt.tokens_out));

    // ── 7. Final pool states ───────────────────────────────────────────
    println!("\n--- Pools ---");
    for asset in [gray, fast] {
        let state = exchange.pool_state(&asset)?;
        println!(
            "  {}: asset={} native={}",
            state.address,
            wei.format_units(state.reserve_asset),
            wei.format_units(state.reserve_native)
        );
    }

    println!("\n=== Done ===");
    Ok(())
}
