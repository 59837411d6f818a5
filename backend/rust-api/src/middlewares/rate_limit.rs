use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::services::AppState;

const RATE_WINDOW_SECONDS: u64 = 60;

// OTP requests get a much tighter budget than general traffic
const OTP_RATE_LIMIT: u32 = 10;
const OTP_RATE_WINDOW_SECONDS: u64 = 300;

/// Fixed-window request counter keyed by client IP. The single-instance scope
/// of this service keeps the whole table in process memory.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
}

struct Window {
    started: Instant,
    count: u32,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Count one hit for `key` and report whether it is still within `limit`
    /// for the current window.
    pub fn check(&self, key: &str, limit: u32, window: Duration) -> bool {
        let mut windows = self.windows.lock().expect("rate limiter poisoned");
        let now = Instant::now();

        let entry = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= window {
            entry.started = now;
            entry.count = 0;
        }

        entry.count += 1;
        entry.count <= limit
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_client_ip_from(headers: &HeaderMap, extensions: &axum::http::Extensions) -> String {
    if let Some(v) = headers.get("x-forwarded-for") {
        if let Ok(s) = v.to_str() {
            // x-forwarded-for can be a comma separated list; take first
            return s.split(',').next().unwrap_or(s).trim().to_string();
        }
    }

    if let Some(v) = headers.get("x-real-ip") {
        if let Ok(s) = v.to_str() {
            return s.trim().to_string();
        }
    }

    if let Some(ci) = extensions.get::<ConnectInfo<SocketAddr>>() {
        return ci.0.ip().to_string();
    }

    "unknown".to_string()
}

fn rate_limit_disabled() -> bool {
    std::env::var("RATE_LIMIT_DISABLED").unwrap_or_default() == "1"
}

/// Per-IP limiter applied to the whole /api surface.
pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if rate_limit_disabled() {
        return Ok(next.run(request).await);
    }

    let client_ip = extract_client_ip_from(request.headers(), request.extensions());

    // allow overriding per-IP limit via env RATE_LIMIT_PER_IP
    let ip_limit = std::env::var("RATE_LIMIT_PER_IP")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(state.config.rate_limit_per_minute);

    let allowed = state.rate_limiter.check(
        &format!("ratelimit:ip:{}", client_ip),
        ip_limit,
        Duration::from_secs(RATE_WINDOW_SECONDS),
    );

    if !allowed {
        tracing::warn!("Rate limit exceeded for IP: {}", client_ip);
        return Err(StatusCode::TOO_MANY_REQUESTS);
    }

    Ok(next.run(request).await)
}

/// Stricter limiter for OTP issuance, keyed separately from general traffic.
pub async fn otp_rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if rate_limit_disabled() {
        return Ok(next.run(request).await);
    }

    let client_ip = extract_client_ip_from(request.headers(), request.extensions());

    let allowed = state.rate_limiter.check(
        &format!("ratelimit:otp:{}", client_ip),
        OTP_RATE_LIMIT,
        Duration::from_secs(OTP_RATE_WINDOW_SECONDS),
    );

    if !allowed {
        tracing::warn!("OTP rate limit exceeded for IP: {}", client_ip);
        return Err(StatusCode::TOO_MANY_REQUESTS);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_limit_then_rejects() {
        let limiter = RateLimiter::new();
        let window = Duration::from_secs(60);

        for _ in 0..5 {
            assert!(limiter.check("ip:1.2.3.4", 5, window));
        }
        assert!(!limiter.check("ip:1.2.3.4", 5, window));
    }

    #[test]
    fn keys_are_independent() {
        let limiter = RateLimiter::new();
        let window = Duration::from_secs(60);

        assert!(limiter.check("ip:a", 1, window));
        assert!(!limiter.check("ip:a", 1, window));
        assert!(limiter.check("ip:b", 1, window));
    }

    #[test]
    fn window_resets_after_expiry() {
        let limiter = RateLimiter::new();
        let window = Duration::from_millis(10);

        assert!(limiter.check("ip:a", 1, window));
        assert!(!limiter.check("ip:a", 1, window));
        std::thread::sleep(Duration::from_millis(15));
        assert!(limiter.check("ip:a", 1, window));
    }
}
