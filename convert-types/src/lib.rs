//! # Convert Types
//!
//! Domain types, input validation and port traits for the currency converter.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Amount, ConversionRequest, ApiKey)
//! - `validate` - Turns raw query parameters into a `ConversionRequest`
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Rejection reasons and provider errors

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;
pub mod validate;

// Re-export commonly used types
pub use currency_codes::CurrencyCode;
pub use domain::{Amount, ApiKey, ConversionRequest};
pub use dto::*;
pub use error::{ProviderError, RejectionReason};
pub use ports::{LatestRates, RateProvider};
pub use validate::validate;
