//! Fixed-window rate limiter middleware.
//!
//! Counts requests per wall-clock second in one atomic shared by all clones
//! of the limiter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Extension, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Shared state for the rate limiter.
///
/// The window second (high 32 bits) and the count within it (low 32 bits)
/// live in one atomic so a window reset and an increment cannot interleave.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    /// Maximum requests allowed per second. Zero disables limiting.
    max_per_sec: u64,
    state: Arc<AtomicU64>,
}

const COUNT_MASK: u64 = u32::MAX as u64;

impl RateLimiter {
    pub fn new(max_per_sec: u64) -> Self {
        Self {
            max_per_sec,
            state: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Try to acquire a permit. Returns true if the request is allowed.
    pub fn try_acquire(&self) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.try_acquire_at(now)
    }

    fn try_acquire_at(&self, now: u64) -> bool {
        if self.max_per_sec == 0 {
            return true;
        }

        let window = now & COUNT_MASK;
        let max = self.max_per_sec.min(COUNT_MASK);
        let mut allowed = false;
        let _ = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |packed| {
                let count = if packed >> 32 == window {
                    packed & COUNT_MASK
                } else {
                    0
                };
                allowed = count < max;
                if !allowed {
                    return None;
                }
                Some((window << 32) | (count + 1))
            });
        allowed
    }
}

/// Axum middleware that enforces the rate limit.
pub async fn rate_limit_middleware(
    Extension(limiter): Extension<RateLimiter>,
    req: Request,
    next: Next,
) -> Response {
    if limiter.try_acquire() {
        next.run(req).await
    } else {
        tracing::warn!(path = %req.uri().path(), "Rate limit exceeded");
        ApiError::TooManyRequests("Too many requests. Please slow down.".to_string())
            .into_response()
    }
}
