//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod cors;
mod handlers;
mod rate_limit;
mod server;

pub use cors::{CorsSettings, OriginPolicy};
pub use handlers::ApiError;
pub use server::{HttpServer, HttpSettings};
