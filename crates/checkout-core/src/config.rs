//! Pricing configuration.
//!
//! The core never reads the environment; callers build a [`PricingConfig`]
//! (or take the default) and hand it to [`crate::checkout::Checkout`].

use serde::{Deserialize, Serialize};

use crate::money::Rate;
use crate::pricing::DEFAULT_TAX_RATE;
use crate::request::DEFAULT_CURRENCY;

/// Knobs of the pricing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Tax applied to the discounted amount.
    pub tax_rate: Rate,
    /// Currency reported when the request omits one.
    pub default_currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            tax_rate: DEFAULT_TAX_RATE,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PricingConfig::default();
        assert_eq!(config.tax_rate.bps(), 2100);
        assert_eq!(config.default_currency, "USD");
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let config: PricingConfig = serde_json::from_str(r#"{"default_currency": "EUR"}"#).unwrap();
        assert_eq!(config.default_currency, "EUR");
        assert_eq!(config.tax_rate, DEFAULT_TAX_RATE);
    }
}
