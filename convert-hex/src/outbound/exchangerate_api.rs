//! ExchangeRate-API v6 adapter.
//!
//! Implements [`RateProvider`] against `GET {base}/{key}/latest/{CODE}`.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use convert_types::{ApiKey, CurrencyCode, LatestRates, ProviderError, RateProvider};

/// Public endpoint of the v6 API.
pub const DEFAULT_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";

/// HTTP client for ExchangeRate-API.
#[derive(Debug, Clone)]
pub struct ExchangeRateApi {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    result: Option<String>,
    conversion_rates: Option<HashMap<String, serde_json::Value>>,
    time_last_update_utc: Option<String>,
    error: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

impl ExchangeRateApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Both the key and the code are percent-encoded as single path segments.
    fn latest_url(&self, api_key: &ApiKey, base: CurrencyCode) -> String {
        format!(
            "{}/{}/latest/{}",
            self.base_url,
            urlencoding::encode(api_key.expose()),
            urlencoding::encode(base.code())
        )
    }
}

impl Default for ExchangeRateApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Interprets a response body. Non-numeric rate entries are dropped.
fn parse_latest(base: CurrencyCode, body: &[u8]) -> Result<LatestRates, ProviderError> {
    let data: LatestResponse = serde_json::from_slice(body)
        .map_err(|e| ProviderError::Malformed(Some(format!("body is not valid JSON: {e}"))))?;

    let upstream_error = || data.error.clone().or_else(|| data.error_type.clone());

    if data.result.as_deref() != Some("success") {
        return Err(ProviderError::Malformed(upstream_error()));
    }
    let Some(raw_rates) = data.conversion_rates.as_ref() else {
        return Err(ProviderError::Malformed(upstream_error()));
    };
    let Some(last_updated) = data.time_last_update_utc.clone() else {
        return Err(ProviderError::Malformed(Some(
            "missing time_last_update_utc".into(),
        )));
    };

    let rates = raw_rates
        .iter()
        .filter_map(|(code, value)| value.as_f64().map(|rate| (code.clone(), rate)))
        .collect();

    Ok(LatestRates {
        base,
        rates,
        last_updated,
    })
}

#[async_trait]
impl RateProvider for ExchangeRateApi {
    #[instrument(name = "ExchangeRateApiLatest", skip(self, api_key, base), fields(base = %base))]
    async fn latest_rates(
        &self,
        api_key: &ApiKey,
        base: CurrencyCode,
    ) -> Result<LatestRates, ProviderError> {
        // The URL embeds the key; errors are stripped of it before surfacing.
        let response = self
            .http
            .get(self.latest_url(api_key, base))
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), "received upstream response");
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url().to_string()))?;

        parse_latest(base, &body)
    }
}
