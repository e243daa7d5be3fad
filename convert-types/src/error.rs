//! Error types for the currency converter.

use currency_codes::CurrencyCode;

/// Why a conversion request was not answered with a quote.
///
/// The `Display` text is what the caller sees. Variants that describe server
/// or upstream trouble render a generic message; their detail is for logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectionReason {
    #[error("Unexpected query parameter \"{0}\".")]
    UnexpectedParameter(String),

    #[error("Query parameter \"{0}\" may only be given once.")]
    DuplicateParameter(String),

    #[error("Invalid query string.")]
    InvalidQueryString,

    #[error("Missing required query parameters \"from\" and \"to\".")]
    MissingRequiredParameter,

    #[error("Currency codes must be 3-letter ISO codes.")]
    MalformedCurrencyCode,

    #[error("Unsupported currency code \"{0}\".")]
    UnsupportedCurrency(String),

    #[error("\"amount\" must not be empty.")]
    EmptyAmount,

    #[error("\"amount\" must be a plain decimal number without exponent.")]
    MalformedAmount,

    #[error("\"amount\" must be a finite number.")]
    NonFiniteAmount,

    #[error("\"amount\" exceeds maximum limit.")]
    AmountOutOfRange,

    #[error("Negative \"amount\" is not allowed.")]
    NegativeAmountRejected,

    #[error("\"amount\" may have at most 8 decimal places.")]
    TooManyDecimals,

    #[error("Method not allowed.")]
    MethodNotAllowed,

    #[error("Internal server error.")]
    ServiceMisconfigured,

    #[error("Failed to fetch exchange rate from upstream API.")]
    UpstreamUnavailable,

    #[error("Failed to fetch exchange rate from upstream API.")]
    UpstreamMalformedResponse { detail: Option<String> },

    #[error("Exchange rate from {from} to {to} not available.")]
    RateUnavailable { from: CurrencyCode, to: CurrencyCode },
}

impl RejectionReason {
    /// True for failures caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RejectionReason::UnexpectedParameter(_)
                | RejectionReason::DuplicateParameter(_)
                | RejectionReason::InvalidQueryString
                | RejectionReason::MissingRequiredParameter
                | RejectionReason::MalformedCurrencyCode
                | RejectionReason::UnsupportedCurrency(_)
                | RejectionReason::EmptyAmount
                | RejectionReason::MalformedAmount
                | RejectionReason::NonFiniteAmount
                | RejectionReason::AmountOutOfRange
                | RejectionReason::NegativeAmountRejected
                | RejectionReason::TooManyDecimals
        )
    }
}

/// Rate provider errors (upstream access failures).
///
/// Messages are for operators and must never contain the API key.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    #[error("Malformed upstream response: {}", .0.as_deref().unwrap_or("no error text"))]
    Malformed(Option<String>),
}

impl From<ProviderError> for RejectionReason {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Transport(_) | ProviderError::Status(_) => {
                RejectionReason::UpstreamUnavailable
            }
            ProviderError::Malformed(detail) => RejectionReason::UpstreamMalformedResponse { detail },
        }
    }
}
