//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use currency_codes::CurrencyCode;

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Successful conversion result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateQuoteResponse {
    /// Always `true`
    #[schema(example = true)]
    pub success: bool,
    /// Units of `to` per one unit of `from`, as quoted upstream
    #[schema(example = 0.85)]
    pub rate: f64,
    /// `amount * rate` rounded half away from zero to 6 decimals; null without an amount
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 85.0)]
    pub converted_amount: Option<Decimal>,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    /// Upstream's last update time
    #[schema(example = "Mon, 01 Jan 2024 00:00:01 +0000")]
    pub last_updated: String,
}

impl RateQuoteResponse {
    pub fn new(
        rate: f64,
        converted_amount: Option<Decimal>,
        from: CurrencyCode,
        to: CurrencyCode,
        last_updated: String,
    ) -> Self {
        Self {
            success: true,
            rate,
            converted_amount,
            from,
            to,
            last_updated,
        }
    }
}

/// Failure body shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Currency codes must be 3-letter ISO codes.")]
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalogue & Health DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// One entry of the supported currency catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CurrencyInfo {
    pub code: CurrencyCode,
    #[schema(example = "United States Dollar")]
    pub name: String,
}

impl From<CurrencyCode> for CurrencyInfo {
    fn from(code: CurrencyCode) -> Self {
        Self {
            code,
            name: code.name().to_string(),
        }
    }
}

/// Supported currencies, in catalogue order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CurrenciesResponse {
    pub success: bool,
    pub currencies: Vec<CurrencyInfo>,
}

impl CurrenciesResponse {
    pub fn catalogue() -> Self {
        Self {
            success: true,
            currencies: CurrencyCode::all().iter().copied().map(CurrencyInfo::from).collect(),
        }
    }
}

/// Liveness check body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "Currency converter API is healthy.")]
    pub message: String,
    /// RFC 3339 server time
    #[schema(example = "2024-01-01T00:00:00Z")]
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_serializes_camel_case_numbers() {
        let quote = RateQuoteResponse::new(
            0.85,
            Some(dec!(85.000000)),
            CurrencyCode::USD,
            CurrencyCode::EUR,
            "Mon, 01 Jan 2024 00:00:01 +0000".into(),
        );
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["rate"], 0.85);
        assert_eq!(json["convertedAmount"], 85.0);
        assert_eq!(json["from"], "USD");
        assert_eq!(json["to"], "EUR");
        assert_eq!(json["lastUpdated"], "Mon, 01 Jan 2024 00:00:01 +0000");
    }

    #[test]
    fn test_quote_without_amount_serializes_null() {
        let quote = RateQuoteResponse::new(
            1.1,
            None,
            CurrencyCode::EUR,
            CurrencyCode::USD,
            "now".into(),
        );
        let json = serde_json::to_value(&quote).unwrap();
        assert!(json["convertedAmount"].is_null());
        assert!(json.as_object().unwrap().contains_key("convertedAmount"));
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::new("nope")).unwrap();
        assert_eq!(json, serde_json::json!({ "success": false, "error": "nope" }));
    }

    #[test]
    fn test_catalogue_lists_every_code() {
        let catalogue = CurrenciesResponse::catalogue();
        assert_eq!(catalogue.currencies.len(), CurrencyCode::all().len());
        assert_eq!(catalogue.currencies[0].code, CurrencyCode::USD);
        assert_eq!(catalogue.currencies[0].name, "United States Dollar");
    }
}
