//! # Currency Converter Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the upstream rate adapter
//! - Create the conversion service
//! - Start the HTTP server

mod config;

use std::env;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use convert_hex::{ConversionService, inbound::HttpServer, outbound::ExchangeRateApi};

use config::{Config, LogFormat};

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Endpoint is taken from OTEL_EXPORTER_OTLP_ENDPOINT
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("currency-converter"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // OpenTelemetry export is opt-in
    let otel = match env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        Ok(endpoint) if !endpoint.trim().is_empty() => Some(init_tracer()?),
        _ => None,
    };
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    let (pretty, json) = match config.log_format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,convert_app=debug,convert_hex=debug".into()),
        )
        .with(pretty)
        .with(json)
        .with(telemetry)
        .init();

    tracing::info!("Starting currency converter on port {}", config.port);
    tracing::info!("Upstream rate API: {}", config.api_base);
    if config.api_key.is_none() {
        tracing::warn!("EXCHANGE_RATE_API_KEY is not set; conversions will fail until it is configured");
    }

    // Create the conversion service
    let provider = ExchangeRateApi::new(config.api_base.as_str());
    let service = ConversionService::new(provider, config.api_key);

    // Create and run the HTTP server
    let server = HttpServer::with_settings(service, config.http);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    Ok(())
}
