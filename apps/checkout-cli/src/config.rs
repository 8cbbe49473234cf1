//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;

use checkout_core::pricing::DEFAULT_TAX_RATE;
use checkout_core::request::DEFAULT_CURRENCY;
use checkout_core::{PricingConfig, Rate};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Tax rate in basis points (2100 = 21%)
    pub tax_rate_bps: u32,

    /// Currency reported when a request omits one
    pub default_currency: String,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = CliConfig {
            tax_rate_bps: lookup("CHECKOUT_TAX_RATE_BPS")
                .unwrap_or_else(|| DEFAULT_TAX_RATE.bps().to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CHECKOUT_TAX_RATE_BPS".to_string()))?,

            default_currency: lookup("CHECKOUT_DEFAULT_CURRENCY")
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        };

        // 0% to 100%
        if config.tax_rate_bps > Rate::BPS_PER_WHOLE {
            return Err(ConfigError::InvalidValue("CHECKOUT_TAX_RATE_BPS".to_string()));
        }

        if config.default_currency.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "CHECKOUT_DEFAULT_CURRENCY".to_string(),
            ));
        }

        Ok(config)
    }

    /// The pricing configuration handed to the core.
    pub fn pricing(&self) -> PricingConfig {
        PricingConfig {
            tax_rate: Rate::from_bps(self.tax_rate_bps),
            default_currency: self.default_currency.clone(),
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
