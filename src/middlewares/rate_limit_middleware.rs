use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::RateLimitConfig;
use crate::util::error::{HandlerError, HandlerErrorKind};

const PURGE_THRESHOLD: usize = 1024;

/// Outcome of counting one request against its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_after: Duration,
}

pub trait RateLimiter: Send + Sync {
    /// Counts the request and decides whether it may proceed.
    fn check(&self, key: &str) -> RateDecision;

    fn allow(&self, key: &str) -> bool {
        self.check(key).allowed
    }
}

struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window counter per key, held in process memory.
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    windows: Mutex<HashMap<String, Window>>,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        InMemoryRateLimiter {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn tracked_keys(&self) -> usize {
        self.windows.lock().map(|w| w.len()).unwrap_or(0)
    }
}

impl RateLimiter for InMemoryRateLimiter {
    fn check(&self, key: &str) -> RateDecision {
        let now = Instant::now();
        let window_len = self.config.window;
        // counters are plain integers, a poisoned lock is still usable
        let mut windows = self.windows.lock().unwrap_or_else(|p| p.into_inner());

        if windows.len() >= PURGE_THRESHOLD {
            windows.retain(|_, w| now.duration_since(w.started) < window_len);
            debug!("Purged expired rate windows, {} left", windows.len());
        }

        let window = windows
            .entry(key.to_string())
            .or_insert(Window { started: now, count: 0 });
        if now.duration_since(window.started) >= window_len {
            window.started = now;
            window.count = 0;
        }
        window.count = window.count.saturating_add(1);

        RateDecision {
            allowed: window.count <= self.config.max_requests,
            remaining: self.config.max_requests.saturating_sub(window.count),
            reset_after: window_len.saturating_sub(now.duration_since(window.started)),
        }
    }
}

fn client_key(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit(
    State(limiter): State<Arc<dyn RateLimiter>>,
    req: Request,
    next: Next,
) -> Response {
    let key = client_key(&req);
    let decision = limiter.check(&key);
    if !decision.allowed {
        warn!("Rate limit exceeded for {}", key);
        let retry_after = decision.reset_after.as_secs_f64().ceil().max(1.0) as u64;
        let mut response =
            HandlerError::new(HandlerErrorKind::TooManyRequests, "Too many requests, please try again later.")
                .into_response();
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
        return response;
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32) -> InMemoryRateLimiter {
        InMemoryRateLimiter::new(RateLimitConfig {
            window: Duration::from_secs(60),
            max_requests,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_allows_up_to_limit_then_blocks() {
        let limiter = limiter(20);
        for i in 0..20 {
            let decision = limiter.check("10.0.0.1");
            assert!(decision.allowed);
            assert_eq!(decision.remaining, 19 - i);
        }
        let decision = limiter.check("10.0.0.1");
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
        assert_eq!(decision.reset_after, Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let limiter = limiter(1);
        assert!(limiter.allow("10.0.0.1"));
        assert!(!limiter.allow("10.0.0.1"));
        assert!(limiter.allow("10.0.0.2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_resets() {
        let limiter = limiter(2);
        assert!(limiter.allow("a"));
        assert!(limiter.allow("a"));
        tokio::time::advance(Duration::from_secs(30)).await;
        let decision = limiter.check("a");
        assert!(!decision.allowed);
        assert_eq!(decision.reset_after, Duration::from_secs(30));

        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(limiter.allow("a"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_windows_are_purged() {
        let limiter = limiter(5);
        for i in 0..PURGE_THRESHOLD {
            limiter.check(&format!("client-{}", i));
        }
        assert_eq!(limiter.tracked_keys(), PURGE_THRESHOLD);
        tokio::time::advance(Duration::from_secs(61)).await;
        limiter.check("late");
        assert_eq!(limiter.tracked_keys(), 1);
    }

    #[test]
    fn test_concurrent_checks_do_not_undercount() {
        let limiter = Arc::new(limiter(50));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                std::thread::spawn(move || (0..25).filter(|_| limiter.allow("shared")).count())
            })
            .collect();
        let allowed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(allowed, 50);
    }
}
