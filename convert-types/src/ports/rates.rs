//! Exchange rate provider port.
//!
//! This trait defines the interface for upstream rate services.
//! Implementations can be HTTP clients, mock providers, etc.

use std::collections::HashMap;

use currency_codes::CurrencyCode;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::domain::ApiKey;
use crate::error::ProviderError;

/// Latest rates for one base currency, as reported upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestRates {
    pub base: CurrencyCode,
    /// Units of the keyed currency per one unit of `base`. Only numeric
    /// entries are kept; codes outside the supported catalogue may appear.
    pub rates: HashMap<String, f64>,
    /// Upstream's own last-update timestamp, passed through verbatim.
    pub last_updated: String,
}

impl LatestRates {
    /// Returns the rate for `to` alongside its exact decimal form.
    ///
    /// A rate is usable when it is finite, strictly positive and fits in a
    /// `Decimal`; anything else is treated as missing.
    pub fn usable_rate(&self, to: CurrencyCode) -> Option<(f64, Decimal)> {
        let rate = self
            .rates
            .get(to.code())
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)?;
        Decimal::from_f64(rate)
            .filter(|exact| exact.is_sign_positive() && !exact.is_zero())
            .map(|exact| (rate, exact))
    }
}

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Fetches the latest rates quoted against `base`.
    ///
    /// Called at most once per conversion; implementations must not retry.
    async fn latest_rates(
        &self,
        api_key: &ApiKey,
        base: CurrencyCode,
    ) -> Result<LatestRates, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, f64)]) -> LatestRates {
        LatestRates {
            base: CurrencyCode::USD,
            rates: entries.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            last_updated: "Mon, 01 Jan 2024 00:00:01 +0000".into(),
        }
    }

    #[test]
    fn test_usable_rate() {
        let rates = table(&[("EUR", 0.85), ("GBP", 0.0), ("JPY", -1.0), ("INR", f64::NAN)]);
        assert_eq!(
            rates.usable_rate(CurrencyCode::EUR),
            Some((0.85, Decimal::from_str_exact("0.85").unwrap()))
        );
        assert_eq!(rates.usable_rate(CurrencyCode::GBP), None);
        assert_eq!(rates.usable_rate(CurrencyCode::JPY), None);
        assert_eq!(rates.usable_rate(CurrencyCode::INR), None);
        assert_eq!(rates.usable_rate(CurrencyCode::CHF), None);
    }

    #[test]
    fn test_rate_outside_decimal_range_is_unusable() {
        let rates = table(&[("JPY", 1e30), ("KRW", f64::MAX), ("EUR", 1e-300)]);
        assert_eq!(rates.usable_rate(CurrencyCode::JPY), None);
        assert_eq!(rates.usable_rate(CurrencyCode::KRW), None);
        assert_eq!(rates.usable_rate(CurrencyCode::EUR), None);
    }
}
