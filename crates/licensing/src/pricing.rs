//! Per-seat pricing configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PRICE_MONTHLY: u32 = 150;
pub const DEFAULT_PRICE_YEARLY: u32 = 1800;

pub const ENV_PRICE_MONTHLY: &str = "EHSRBAC_LICENSE_PRICE_MONTHLY";
pub const ENV_PRICE_YEARLY: &str = "EHSRBAC_LICENSE_PRICE_YEARLY";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingConfigError {
    #[error("{var} must be a whole number of dollars, got '{value}'")]
    InvalidPrice { var: &'static str, value: String },
}

/// Flat per-seat price of a paid license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicensePricing {
    pub monthly: u32,
    pub yearly: u32,
}

impl Default for LicensePricing {
    fn default() -> Self {
        Self {
            monthly: DEFAULT_PRICE_MONTHLY,
            yearly: DEFAULT_PRICE_YEARLY,
        }
    }
}

impl LicensePricing {
    /// Defaults overridden by `EHSRBAC_LICENSE_PRICE_MONTHLY` /
    /// `EHSRBAC_LICENSE_PRICE_YEARLY` when set.
    pub fn from_env() -> Result<Self, PricingConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PricingConfigError> {
        let defaults = Self::default();
        Ok(Self {
            monthly: read_price(&lookup, ENV_PRICE_MONTHLY, defaults.monthly)?,
            yearly: read_price(&lookup, ENV_PRICE_YEARLY, defaults.yearly)?,
        })
    }
}

fn read_price(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u32,
) -> Result<u32, PricingConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            tracing::warn!(var, value = %raw, "invalid license price");
            PricingConfigError::InvalidPrice { var, value: raw }
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let pricing = LicensePricing::from_lookup(lookup(&[])).unwrap();
        assert_eq!(pricing, LicensePricing { monthly: 150, yearly: 1800 });
    }

    #[test]
    fn overrides_each_price_independently() {
        let pricing = LicensePricing::from_lookup(lookup(&[(ENV_PRICE_MONTHLY, " 99 ")])).unwrap();
        assert_eq!(pricing.monthly, 99);
        assert_eq!(pricing.yearly, DEFAULT_PRICE_YEARLY);
    }

    #[test]
    fn rejects_non_numeric_prices() {
        let err = LicensePricing::from_lookup(lookup(&[(ENV_PRICE_YEARLY, "lots")])).unwrap_err();
        assert_eq!(
            err,
            PricingConfigError::InvalidPrice {
                var: ENV_PRICE_YEARLY,
                value: "lots".into()
            }
        );
    }
}
