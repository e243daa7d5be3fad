//! Domain models for the currency converter.

pub mod amount;
pub mod api_key;
pub mod request;

pub use amount::{Amount, MAX_AMOUNT, MAX_FRACTION_DIGITS, QUOTE_DECIMAL_PLACES};
pub use api_key::ApiKey;
pub use request::ConversionRequest;
