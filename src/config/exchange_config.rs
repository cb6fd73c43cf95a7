//! Configuration for the exchange facade.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Decimals, FeeTier};
use crate::error::{AmmError, Result};

/// Parameters shared by every pool of an exchange.
///
/// # Validation
///
/// - The fee tier must be below 100%.
/// - The native decimals are range-checked when parsed (`0..=18`).
///
/// # Example
///
/// ```rust
/// use pairswap::config::ExchangeConfig;
/// use pairswap::domain::FeeTier;
///
/// let cfg = ExchangeConfig::from_toml_str("fee_tier = 30").expect("valid toml");
/// assert_eq!(cfg.fee_tier(), FeeTier::TIER_0_30_PERCENT);
/// assert_eq!(cfg.native_decimals().get(), 18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExchangeConfig {
    fee_tier: FeeTier,
    native_decimals: Decimals,
}

impl ExchangeConfig {
    /// Creates a new `ExchangeConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if `fee_tier` is 100% or more.
    pub fn new(fee_tier: FeeTier, native_decimals: Decimals) -> Result<Self> {
        let config = Self {
            fee_tier,
            native_decimals,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee tier is 100% or more.
    pub fn validate(&self) -> Result<()> {
        self.fee_tier.validate()
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] for malformed TOML or
    /// out-of-range values, and [`AmmError::InvalidFee`] from validation.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| AmmError::InvalidConfiguration(format!("parse exchange config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the file cannot be
    /// read, plus every error of [`from_toml_str`](Self::from_toml_str).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            AmmError::InvalidConfiguration(format!("read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|e| AmmError::InvalidConfiguration(format!("render exchange config: {e}")))
    }

    /// Fee tier given to every new pool.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Display precision of the native currency.
    #[must_use]
    pub const fn native_decimals(&self) -> Decimals {
        self.native_decimals
    }
}
