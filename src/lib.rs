//! # pairswap
//!
//! Constant-product exchange: one liquidity pool per asset, each pairing
//! the asset with the host's native currency, plus token-to-token routing
//! through the native side.
//!
//! This crate provides:
//!
//! - **Assets**: fixed-supply fungible assets with delegated spending
//! - **Pools**: `x · y = k` pricing with a fee folded into the input
//! - **Liquidity shares**: proportional deposits and withdrawals
//! - **Routing**: asset → native → asset swaps across two pools
//! - **Atomicity**: every public operation commits or reverts as a unit
//!
//! # Quick Start
//!
//! ```toml
//! [dependencies]
//! pairswap = "0.1"
//! ```
//!
//! ## Seed two pools and route between them
//!
//! ```rust
//! use pairswap::domain::{Address, Decimals};
//! use pairswap::exchange::Exchange;
//! use pairswap::router::TokenToTokenSwap;
//!
//! let units = |n| Decimals::ETHER.units(n);
//! let owner = Address::from_bytes([1u8; 32]);
//! let mut exchange = Exchange::default();
//! exchange.fund_native(owner, units(10_000)).expect("faucet");
//!
//! // 1. Deploy two assets and give each a pool seeded 1000:1000
//! let mut assets = Vec::new();
//! for ticker in ["GRAY", "FAST"] {
//!     let asset = exchange.deploy_asset(&owner, ticker, ticker, units(1_010)).expect("deployed");
//!     let pool = exchange.create_pool(asset).expect("new pool");
//!     exchange.authorize(&owner, asset, pool, units(1_010)).expect("authorized");
//!     exchange.add_liquidity(&owner, asset, units(1_000), units(1_000)).expect("seeded");
//!     assets.push(asset);
//! }
//!
//! // 2. Sell 10 GRAY for at least 9 FAST
//! let route = TokenToTokenSwap {
//!     tokens_sold: units(10),
//!     min_native_out: units(9),
//!     min_tokens_out: units(9),
//!     destination_asset: assets[1],
//! };
//! let receipt = exchange.token_to_token_swap(&owner, assets[0], &route).expect("routed");
//!
//! assert!(receipt.tokens_out >= units(9));
//! assert!(receipt.tokens_out < units(10));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Exchange   │  checkpoint → operation → commit or restore
//! └──────┬──────┘
//!        │
//!        ├──────────────┐
//!        ▼              ▼
//! ┌─────────────┐ ┌─────────────┐
//! │   Router     │ │  Registry    │  asset → Pool, pool address → asset
//! └──────┬──────┘ └──────┬──────┘
//!        │ two hops       │
//!        ▼                ▼
//! ┌─────────────────────────────┐
//! │            Pools             │  reserves, shares, pricing
//! └──────────────┬──────────────┘
//!                │ transfer / transfer_from
//!                ▼
//! ┌─────────────────────────────┐
//! │            Ledger            │  FungibleAsset balances, native balances
//! └─────────────────────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`FeeTier`](domain::FeeTier), receipts |
//! | [`ledger`] | [`Ledger`](ledger::Ledger), [`FungibleAsset`](ledger::FungibleAsset), [`NativeCurrency`](ledger::NativeCurrency) |
//! | [`traits`] | [`Account`](traits::Account) caller capability |
//! | [`pools`]  | [`Pool`](pools::Pool) and the pricing function |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry), one pool per asset |
//! | [`router`] | [`token_to_token_swap`](router::token_to_token_swap) |
//! | [`exchange`] | [`Exchange`](exchange::Exchange) transactional facade |
//! | [`config`] | [`ExchangeConfig`](config::ExchangeConfig), TOML loading |
//! | [`math`]   | Rounded division and 256-bit `mul_div` |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber:
//! `info` for deployments and pool creation, `debug` for every committed
//! swap or liquidity change, `warn` when an operation is reverted.

pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod registry;
pub mod router;
pub mod traits;
