//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use utoipa::OpenApi;

use convert_types::{
    CurrenciesResponse, ErrorResponse, HealthResponse, RateProvider, RejectionReason, validate,
};

use crate::ConversionService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<P: RateProvider> {
    pub service: ConversionService<P>,
}

/// Wrapper to implement IntoResponse for RejectionReason (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub RejectionReason);

impl From<RejectionReason> for ApiError {
    fn from(err: RejectionReason) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            RejectionReason::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RejectionReason::ServiceMisconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            RejectionReason::UpstreamUnavailable
            | RejectionReason::UpstreamMalformedResponse { .. } => StatusCode::BAD_GATEWAY,
            RejectionReason::RateUnavailable { .. } => StatusCode::BAD_REQUEST,
            reason if reason.is_validation() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorResponse::new(self.0.to_string()))).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Currency converter API is healthy.".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Supported currency catalogue.
pub async fn currencies() -> impl IntoResponse {
    Json(CurrenciesResponse::catalogue())
}

/// OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Quote a rate and optionally convert an amount.
///
/// The raw pairs are validated before anything else; a rejected request
/// never reaches the upstream API.
#[tracing::instrument(skip_all)]
pub async fn convert<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(pairs) = query.map_err(|e| {
        tracing::debug!(error = %e, "query string rejected");
        RejectionReason::InvalidQueryString
    })?;

    let request = validate(&pairs).inspect_err(|reason| {
        tracing::debug!(%reason, "conversion request rejected");
    })?;

    let quote = state.service.convert(request).await?;
    Ok(Json(quote))
}

/// Any method other than GET on the conversion route.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        [(header::ALLOW, "GET, HEAD")],
        ApiError(RejectionReason::MethodNotAllowed),
    )
}

/// Unknown routes.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use convert_types::CurrencyCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (RejectionReason::MalformedCurrencyCode, StatusCode::BAD_REQUEST),
            (RejectionReason::InvalidQueryString, StatusCode::BAD_REQUEST),
            (RejectionReason::TooManyDecimals, StatusCode::BAD_REQUEST),
            (RejectionReason::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (RejectionReason::ServiceMisconfigured, StatusCode::INTERNAL_SERVER_ERROR),
            (RejectionReason::UpstreamUnavailable, StatusCode::BAD_GATEWAY),
            (
                RejectionReason::UpstreamMalformedResponse { detail: None },
                StatusCode::BAD_GATEWAY,
            ),
            (
                RejectionReason::RateUnavailable {
                    from: CurrencyCode::USD,
                    to: CurrencyCode::EUR,
                },
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (reason, expected) in cases {
            assert_eq!(ApiError(reason.clone()).status(), expected, "{reason:?}");
        }
    }
}
