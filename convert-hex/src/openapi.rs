//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use convert_types::CurrencyCode;
use convert_types::dto::{
    CurrenciesResponse, CurrencyInfo, ErrorResponse, HealthResponse, RateQuoteResponse,
};
use utoipa::OpenApi;

// Path stubs for documentation only; the real handlers live in `inbound::handlers`.

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
async fn health() {}

/// Supported currencies
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "currencies",
    responses(
        (status = 200, description = "Currency catalogue", body = CurrenciesResponse)
    )
)]
async fn currencies() {}

/// Quote an exchange rate and optionally convert an amount
///
/// Currency codes are case-insensitive and trimmed. `amount` must be a plain
/// decimal (no exponent), non-negative, at most 1e12 with at most 8 decimals.
#[utoipa::path(
    get,
    path = "/api/convert",
    tag = "conversion",
    params(
        ("from" = String, Query, description = "Source currency (ISO 4217)", example = "USD"),
        ("to" = String, Query, description = "Target currency (ISO 4217)", example = "EUR"),
        ("amount" = Option<String>, Query, description = "Amount in the source currency", example = "100")
    ),
    responses(
        (status = 200, description = "Rate quoted", body = RateQuoteResponse),
        (status = 400, description = "Invalid request or rate unavailable", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 429, description = "Too many requests", body = ErrorResponse),
        (status = 500, description = "Server misconfigured", body = ErrorResponse),
        (status = 502, description = "Upstream rate API failed", body = ErrorResponse)
    )
)]
async fn convert() {}

/// OpenAPI documentation for the Currency Converter API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Converter API",
        version = "1.0.0",
        description = "Validating proxy in front of ExchangeRate-API.\n\nRates are quoted per one unit of `from`; `convertedAmount` is rounded half away from zero to 6 decimal places.",
        license(name = "MIT"),
    ),
    paths(health, currencies, convert),
    components(
        schemas(
            RateQuoteResponse,
            ErrorResponse,
            HealthResponse,
            CurrenciesResponse,
            CurrencyInfo,
            CurrencyCode,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "currencies", description = "Supported currency catalogue"),
        (name = "conversion", description = "Rate quotes and conversions"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| *p == "/api/convert"));
        assert!(paths.iter().any(|p| *p == "/api/health"));
        assert!(paths.iter().any(|p| *p == "/api/currencies"));
    }
}
