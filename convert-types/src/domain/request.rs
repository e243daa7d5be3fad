//! Normalized conversion request.

use currency_codes::CurrencyCode;

use super::Amount;

/// A validated request: an ordered currency pair and an optional amount.
///
/// Produced by [`crate::validate`] and consumed once by the conversion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    from: CurrencyCode,
    to: CurrencyCode,
    amount: Option<Amount>,
}

impl ConversionRequest {
    pub fn new(from: CurrencyCode, to: CurrencyCode, amount: Option<Amount>) -> Self {
        Self { from, to, amount }
    }

    pub fn from_currency(&self) -> CurrencyCode {
        self.from
    }

    pub fn to_currency(&self) -> CurrencyCode {
        self.to
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }
}
