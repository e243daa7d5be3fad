//! Conversion Application Service
//!
//! Orchestrates a validated conversion through the rate provider port.
//! Contains NO infrastructure logic - pure business orchestration.

use convert_types::{ApiKey, ConversionRequest, RateProvider, RateQuoteResponse, RejectionReason};

/// Application service for currency conversion.
///
/// Generic over `P: RateProvider` - the adapter is injected at compile time.
/// The API key is loaded once at startup and never changes; when it is absent
/// every conversion fails with `ServiceMisconfigured` without touching the
/// network.
pub struct ConversionService<P: RateProvider> {
    provider: P,
    api_key: Option<ApiKey>,
}

impl<P: RateProvider> ConversionService<P> {
    /// Creates a new conversion service with the given provider and key.
    pub fn new(provider: P, api_key: Option<ApiKey>) -> Self {
        Self { provider, api_key }
    }

    /// Returns a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Quotes `request.from -> request.to` and converts the amount, if any.
    ///
    /// Exactly one upstream call is made, and only once the key is known to
    /// be configured. Failures are not retried.
    #[tracing::instrument(
        skip(self, request),
        fields(from = %request.from_currency(), to = %request.to_currency())
    )]
    pub async fn convert(
        &self,
        request: ConversionRequest,
    ) -> Result<RateQuoteResponse, RejectionReason> {
        let Some(api_key) = self.api_key.as_ref() else {
            tracing::error!("EXCHANGE_RATE_API_KEY is not configured, refusing conversion");
            return Err(RejectionReason::ServiceMisconfigured);
        };

        let from = request.from_currency();
        let to = request.to_currency();

        let latest = self
            .provider
            .latest_rates(api_key, from)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "upstream rate lookup failed");
                RejectionReason::from(e)
            })?;

        let Some((rate, exact_rate)) = latest.usable_rate(to) else {
            tracing::warn!("missing_rate");
            return Err(RejectionReason::RateUnavailable { from, to });
        };

        let converted_amount = match request.amount() {
            Some(amount) => {
                let converted = amount.convert_at(exact_rate).ok_or_else(|| {
                    tracing::warn!(%amount, rate, "converted amount overflowed");
                    RejectionReason::AmountOutOfRange
                })?;
                Some(converted)
            }
            None => None,
        };

        tracing::debug!(rate, converted = ?converted_amount, "conversion quoted");

        Ok(RateQuoteResponse::new(
            rate,
            converted_amount,
            from,
            to,
            latest.last_updated,
        ))
    }
}
