//! Upstream provider API key.

use std::fmt;

/// Secret used to authenticate against the upstream rate provider.
///
/// Never rendered by `Debug`; the raw value is only reachable through
/// [`ApiKey::expose`], which the outbound adapter calls when building a URL.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for a blank key, so an empty environment variable
    /// counts as "not configured".
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
