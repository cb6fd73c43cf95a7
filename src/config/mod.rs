//! Exchange configuration.
//!
//! [`ExchangeConfig`] carries the parameters every pool inherits at
//! creation.  It can be built in code, or loaded from TOML:
//!
//! ```toml
//! fee_tier = 5          # basis points retained per swap
//! native_decimals = 18  # display precision of the native currency
//! ```
//!
//! Missing keys fall back to [`ExchangeConfig::default`]; unknown keys are
//! rejected.

mod exchange_config;

pub use exchange_config::ExchangeConfig;
