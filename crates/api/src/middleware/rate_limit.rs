//! Rate limiting middleware.
//!
//! Limits how often a single client can hit the public registration
//! endpoint. With no authentication layer, clients are identified by the
//! first hop in `X-Forwarded-For`; requests without it share one bucket.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota,
    RateLimiter as GovRateLimiter,
};
use std::num::NonZeroU32;

use crate::app::AppState;
use crate::error::ApiError;

/// Keyed rate limiter, one bucket per client.
type ClientRateLimiter = GovRateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Bucket key for clients that sent no forwarding header.
const SHARED_CLIENT_KEY: &str = "unidentified";

/// Once this many client buckets are tracked, idle ones are swept before
/// the next check. The client key comes from a header the caller controls,
/// so the bucket map must not grow without bound.
const SWEEP_THRESHOLD: usize = 4096;

/// Rate limiter state shared across all requests.
pub struct RateLimiterState {
    limiter: ClientRateLimiter,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    /// Create a new rate limiter state with the specified limit per minute.
    pub fn new(rate_limit_per_minute: u32) -> Self {
        let quota = Quota::per_minute(
            NonZeroU32::new(rate_limit_per_minute).unwrap_or(NonZeroU32::new(60).unwrap()),
        );
        Self {
            limiter: GovRateLimiter::keyed(quota),
            rate_limit_per_minute,
        }
    }

    /// Check if a request from the given client should be allowed.
    /// Returns Ok(()) if allowed, or Err with retry_after seconds if rate limited.
    pub fn check(&self, client_key: &str) -> Result<(), u64> {
        if self.limiter.len() >= SWEEP_THRESHOLD {
            // Buckets whose quota has fully replenished carry no state worth
            // keeping; actively limited clients survive the sweep.
            self.limiter.retain_recent();
            self.limiter.shrink_to_fit();
        }

        match self.limiter.check_key(&client_key.to_string()) {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(governor::clock::Clock::now(
                    &governor::clock::DefaultClock::default(),
                ));
                // Minimum of 1 second so clients do not hammer in a tight loop
                Err(wait_time.as_secs().max(1))
            }
        }
    }

    /// Number of client buckets currently tracked.
    fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("active_limiters", &self.tracked_clients())
            .finish()
    }
}

/// Extracts a client key from the request: the first `X-Forwarded-For` hop,
/// or a shared bucket when absent.
fn client_key(req: &Request<Body>) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| SHARED_CLIENT_KEY.to_string())
}

/// Middleware that applies rate limiting per client.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(ref rate_limiter) = state.rate_limiter {
        let key = client_key(&req);
        if let Err(retry_after) = rate_limiter.check(&key) {
            return ApiError::RateLimited {
                limit_per_minute: state.config.security.rate_limit_per_minute,
                retry_after_secs: retry_after,
            }
            .into_response();
        }
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_state_creation() {
        let state = RateLimiterState::new(100);
        assert_eq!(state.rate_limit_per_minute, 100);
    }

    #[test]
    fn test_allows_requests_within_limit() {
        let state = RateLimiterState::new(10);
        for _ in 0..10 {
            assert!(state.check("1.2.3.4").is_ok());
        }
    }

    #[test]
    fn test_blocks_requests_over_limit() {
        let state = RateLimiterState::new(3);
        for _ in 0..3 {
            assert!(state.check("1.2.3.4").is_ok());
        }
        let result = state.check("1.2.3.4");
        assert!(result.is_err());
        assert!(result.unwrap_err() >= 1);
    }

    #[test]
    fn test_clients_have_independent_buckets() {
        let state = RateLimiterState::new(2);
        assert!(state.check("1.1.1.1").is_ok());
        assert!(state.check("1.1.1.1").is_ok());
        assert!(state.check("1.1.1.1").is_err());
        // A different client is unaffected
        assert!(state.check("2.2.2.2").is_ok());
    }

    #[test]
    fn test_forged_client_keys_do_not_grow_buckets_unbounded() {
        // A high quota makes each single-use bucket go idle within
        // microseconds, standing in for buckets that aged out.
        let state = RateLimiterState::new(1_000_000);
        for i in 0..(SWEEP_THRESHOLD + 64) {
            let _ = state.check(&format!("spoofed-{}", i));
        }

        std::thread::sleep(std::time::Duration::from_millis(50));
        let _ = state.check("203.0.113.9");

        assert!(state.tracked_clients() < SWEEP_THRESHOLD);
    }

    #[test]
    fn test_sweep_keeps_actively_limited_clients() {
        let state = RateLimiterState::new(1);
        assert!(state.check("9.9.9.9").is_ok());
        assert!(state.check("9.9.9.9").is_err());

        state.limiter.retain_recent();
        // Still over quota after the sweep
        assert!(state.check("9.9.9.9").is_err());
    }

    #[test]
    fn test_client_key_from_forwarded_header() {
        let req = Request::builder()
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_key(&req), "203.0.113.9");
    }

    #[test]
    fn test_client_key_without_header_is_shared() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_key(&req), SHARED_CLIENT_KEY);
    }

    #[test]
    fn test_client_key_empty_header_is_shared() {
        let req = Request::builder()
            .header("x-forwarded-for", "  ")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_key(&req), SHARED_CLIENT_KEY);
    }
}
