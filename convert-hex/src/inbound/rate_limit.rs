//! Rate limiting middleware using Governor.
//!
//! Implements per-client-IP rate limiting with a token bucket algorithm.

use axum::{
    Json,
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    DefaultKeyedRateLimiter, Quota, RateLimiter,
    clock::{Clock, DefaultClock},
};
use std::{
    net::SocketAddr,
    num::NonZeroU32,
    sync::{Arc, Weak},
    time::Duration,
};
use tokio::task::JoinHandle;

use convert_types::ErrorResponse;

/// Paths that are never rate limited.
const EXEMPT_PATHS: [&str; 1] = ["/api/health"];

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests, please try again later.";

/// How often [`spawn_sweeper`] forgets idle clients.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Rate limiter state shared across requests.
///
/// One bucket per client key. Buckets that have refilled completely carry no
/// information and are dropped by [`RateLimiterState::retain_recent`].
pub struct RateLimiterState {
    limiter: DefaultKeyedRateLimiter<String>,
    clock: DefaultClock,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::new(
            NonZeroU32::new(100).unwrap_or(NonZeroU32::MIN),
            Duration::from_secs(15 * 60),
        )
    }
}

impl RateLimiterState {
    /// Creates a new rate limiter state.
    ///
    /// A client may burst `requests` at once; capacity refills evenly so that
    /// `requests` more become available over each `window`.
    pub fn new(requests: NonZeroU32, window: Duration) -> Self {
        let quota = Quota::with_period(window / requests.get())
            .unwrap_or_else(|| Quota::per_second(requests))
            .allow_burst(requests);

        Self {
            limiter: RateLimiter::keyed(quota),
            clock: DefaultClock::default(),
        }
    }

    /// Checks whether `client` may make another request.
    /// On refusal returns how long the client should wait.
    pub fn check(&self, client: &str) -> Result<(), Duration> {
        self.limiter
            .check_key(&client.to_string())
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }

    /// Drops every client whose bucket is full again.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of clients currently tracked.
    pub fn len(&self) -> usize {
        self.limiter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limiter.is_empty()
    }
}

/// Periodically calls [`RateLimiterState::retain_recent`] until the state is
/// dropped.
pub fn spawn_sweeper(state: &Arc<RateLimiterState>, every: Duration) -> JoinHandle<()> {
    let state: Weak<RateLimiterState> = Arc::downgrade(state);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let Some(state) = state.upgrade() else {
                break;
            };
            let before = state.len();
            state.retain_recent();
            tracing::debug!(before, after = state.len(), "rate_limit_sweep");
        }
    })
}

/// Rate limiting middleware.
/// Clients are identified by peer IP when the server provides `ConnectInfo`.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if EXEMPT_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    if let Err(wait) = limiter.check(&client) {
        tracing::warn!(
            ip = %client,
            route = %request.uri(),
            origin = ?request.headers().get(header::ORIGIN),
            "rate_limit_exceeded"
        );

        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse::new(RATE_LIMITED_MESSAGE)),
        )
            .into_response();
        let retry_after = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(retry_after.max(1)));
        return response;
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(requests: u32, window: Duration) -> RateLimiterState {
        RateLimiterState::new(NonZeroU32::new(requests).unwrap(), window)
    }

    #[test]
    fn test_burst_then_refuse() {
        let state = limiter(3, Duration::from_secs(60));
        for _ in 0..3 {
            assert!(state.check("10.0.0.1").is_ok());
        }
        let wait = state.check("10.0.0.1").unwrap_err();
        assert!(wait > Duration::ZERO);
        assert!(wait <= Duration::from_secs(20));
    }

    #[test]
    fn test_clients_are_independent() {
        let state = limiter(1, Duration::from_secs(60));
        assert!(state.check("10.0.0.1").is_ok());
        assert!(state.check("10.0.0.1").is_err());
        assert!(state.check("10.0.0.2").is_ok());
    }

    #[test]
    fn test_zero_window_still_builds_a_quota() {
        let state = limiter(2, Duration::ZERO);
        assert!(state.check("a").is_ok());
        assert!(state.check("a").is_ok());
    }

    #[test]
    fn test_idle_clients_are_forgotten() {
        let state = limiter(1, Duration::from_millis(1));
        for i in 0..1000 {
            assert!(state.check(&format!("10.0.{}.{}", i / 256, i % 256)).is_ok());
        }
        assert_eq!(state.len(), 1000);

        std::thread::sleep(Duration::from_millis(50));
        state.retain_recent();

        assert!(state.is_empty());
    }

    #[test]
    fn test_throttled_clients_are_kept() {
        let state = limiter(1, Duration::from_secs(60));
        assert!(state.check("10.0.0.1").is_ok());
        assert!(state.check("10.0.0.1").is_err());

        state.retain_recent();

        assert_eq!(state.len(), 1);
        assert!(state.check("10.0.0.1").is_err());
    }

    #[tokio::test]
    async fn test_sweeper_prunes_and_stops_with_state() {
        let state = Arc::new(limiter(1, Duration::from_millis(1)));
        for i in 0..10 {
            assert!(state.check(&format!("client-{i}")).is_ok());
        }

        let sweeper = spawn_sweeper(&state, Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(state.is_empty());

        drop(state);
        tokio::time::timeout(Duration::from_secs(1), sweeper)
            .await
            .unwrap()
            .unwrap();
    }
}
