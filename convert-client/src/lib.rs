//! # Convert Client SDK
//!
//! A typed Rust client for the Currency Converter API.

use convert_types::{Amount, CurrenciesResponse, CurrencyCode, HealthResponse, RateQuoteResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Currency Converter API client.
pub struct ConverterClient {
    base_url: String,
    http: Client,
}

impl ConverterClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Fetches the health status.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get("/api/health", &[]).await
    }

    /// Lists the supported currencies.
    pub async fn currencies(&self) -> Result<CurrenciesResponse, ClientError> {
        self.get("/api/currencies", &[]).await
    }

    /// Quotes `from -> to`, converting `amount` when given.
    pub async fn convert(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
        amount: Option<Amount>,
    ) -> Result<RateQuoteResponse, ClientError> {
        let mut query = vec![("from", from.code().to_string()), ("to", to.code().to_string())];
        if let Some(amount) = amount {
            query.push(("amount", amount.to_string()));
        }
        self.get("/api/convert", &query).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
