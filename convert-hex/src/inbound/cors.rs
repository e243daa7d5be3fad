//! Cross-origin policy.
//!
//! Origins are either matched exactly or by `*.domain` wildcard patterns. A
//! wildcard covers any subdomain depth, and the scheme and port are optional
//! unless the pattern names a scheme.

use std::{collections::HashSet, sync::Arc, time::Duration};

use axum::http::{HeaderValue, Method, header, request::Parts};
use regex::Regex;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Settings for the CORS layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
    pub max_age: Duration,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            allow_credentials: false,
            max_age: Duration::from_secs(600),
        }
    }
}

/// Compiled origin allow-list.
#[derive(Debug)]
pub struct OriginPolicy {
    exact: HashSet<String>,
    wildcards: Vec<Regex>,
}

impl OriginPolicy {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut exact = HashSet::new();
        let mut wildcards = Vec::new();

        for pattern in patterns.iter().map(|p| p.as_ref().trim()) {
            if pattern.is_empty() {
                continue;
            }
            if !pattern.contains('*') {
                exact.insert(pattern.to_string());
                continue;
            }
            match wildcard_regex(pattern) {
                Ok(rx) => wildcards.push(rx),
                Err(e) => tracing::warn!(pattern, error = %e, "ignoring unusable CORS origin pattern"),
            }
        }

        Self { exact, wildcards }
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.exact.contains(origin) || self.wildcards.iter().any(|rx| rx.is_match(origin))
    }
}

fn wildcard_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let has_scheme = {
        let lower = pattern.to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    };
    let body = regex::escape(pattern).replace(r"\*", r"(?:[^.]+\.)*[^.]+");
    let scheme = if has_scheme { "" } else { r"https?://" };
    Regex::new(&format!(r"(?i)^{scheme}{body}(?::\d+)?$"))
}

/// Builds the CORS layer. Disallowed origins simply get no CORS headers.
pub fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let policy = Arc::new(OriginPolicy::new(&settings.allowed_origins));

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                let allowed = origin.to_str().is_ok_and(|o| policy.allows(o));
                if !allowed {
                    tracing::debug!(?origin, "blocked CORS origin");
                }
                allowed
            },
        ))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(settings.allow_credentials)
        .max_age(settings.max_age)
}
