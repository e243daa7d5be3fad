//! # Convert Hex
//!
//! Application service layer, HTTP adapter and upstream rate client for the
//! currency converter.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates one conversion)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `outbound/` - ExchangeRate-API client implementing `RateProvider`
//!
//! The service is generic over `P: RateProvider`, allowing
//! different rate sources to be injected.

pub mod inbound;
pub mod openapi;
pub mod outbound;
pub mod service;


pub use service::ConversionService;
