//! Outbound adapters that implement the ports from `convert-types`.

mod exchangerate_api;

pub use exchangerate_api::{DEFAULT_BASE_URL, ExchangeRateApi};
