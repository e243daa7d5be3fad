//! Configuration loading from environment.

use std::{env, num::NonZeroU32, str::FromStr, time::Duration};

use anyhow::{Context, bail};

use convert_hex::inbound::{CorsSettings, HttpSettings};
use convert_hex::outbound::DEFAULT_BASE_URL;
use convert_types::ApiKey;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    /// `None` keeps the server up but every conversion fails as misconfigured.
    pub api_key: Option<ApiKey>,
    pub api_base: String,
    pub log_format: LogFormat,
    pub http: HttpSettings,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = parse_or(&var, "PORT", 3000u16)?;
        let api_key = var("EXCHANGE_RATE_API_KEY").and_then(ApiKey::new);
        let api_base = var("EXCHANGE_RATE_API_BASE").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let log_format = match var("LOG_FORMAT").map(|v| v.trim().to_ascii_lowercase()) {
            None => LogFormat::Pretty,
            Some(v) if v == "pretty" => LogFormat::Pretty,
            Some(v) if v == "json" => LogFormat::Json,
            Some(other) => bail!("LOG_FORMAT must be \"pretty\" or \"json\", got {other:?}"),
        };

        let body_limit = parse_or(&var, "BODY_LIMIT", 10 * 1024usize)?;
        let timeout_ms = parse_or(&var, "REQUEST_TIMEOUT_MS", 30_000u64)?;
        let window_ms = parse_or(&var, "RATE_LIMIT_WINDOW_MS", 15 * 60 * 1000u64)?;
        if window_ms == 0 {
            bail!("RATE_LIMIT_WINDOW_MS must be greater than zero");
        }
        let max_requests = parse_or(
            &var,
            "RATE_LIMIT_MAX_REQUESTS",
            NonZeroU32::new(100).unwrap_or(NonZeroU32::MIN),
        )?;

        let default_cors = CorsSettings::default();
        let cors = CorsSettings {
            allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or(default_cors.allowed_origins),
            allow_credentials: var("CORS_ALLOW_CREDENTIALS")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
            max_age: Duration::from_secs(parse_or(
                &var,
                "CORS_PREFLIGHT_MAX_AGE",
                default_cors.max_age.as_secs(),
            )?),
        };

        Ok(Self {
            port,
            api_key,
            api_base,
            log_format,
            http: HttpSettings {
                body_limit,
                request_timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
                rate_limit_max_requests: max_requests,
                rate_limit_window: Duration::from_millis(window_ms),
                cors,
            },
        })
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.api_key.is_none());
        assert_eq!(config.api_base, DEFAULT_BASE_URL);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.http.body_limit, 10240);
        assert_eq!(config.http.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.http.rate_limit_max_requests.get(), 100);
        assert_eq!(config.http.rate_limit_window, Duration::from_secs(900));
        assert_eq!(config.http.cors, CorsSettings::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("EXCHANGE_RATE_API_KEY", " abc123 "),
            ("LOG_FORMAT", "JSON"),
            ("REQUEST_TIMEOUT_MS", "0"),
            ("RATE_LIMIT_MAX_REQUESTS", "5"),
            ("CORS_ALLOWED_ORIGINS", "https://a.test, *.example.com,"),
            ("CORS_ALLOW_CREDENTIALS", "True"),
            ("CORS_PREFLIGHT_MAX_AGE", "60"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.api_key.unwrap().expose(), "abc123");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.http.request_timeout, None);
        assert_eq!(config.http.rate_limit_max_requests.get(), 5);
        assert_eq!(
            config.http.cors.allowed_origins,
            vec!["https://a.test".to_string(), "*.example.com".to_string()]
        );
        assert!(config.http.cors.allow_credentials);
        assert_eq!(config.http.cors.max_age, Duration::from_secs(60));
    }

    #[test]
    fn test_blank_key_is_unset() {
        let config = load(&[("EXCHANGE_RATE_API_KEY", "   ")]).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_invalid_numbers_fail() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("RATE_LIMIT_MAX_REQUESTS", "0")]).is_err());
        assert!(load(&[("RATE_LIMIT_WINDOW_MS", "0")]).is_err());
        assert!(load(&[("LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = load(&[("EXCHANGE_RATE_API_KEY", "super-secret")]).unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
