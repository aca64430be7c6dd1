use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::state::AppState;

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests, please try again later.";

/// Fixed-window counter keyed by caller IP, shared across every route.
/// The window restarts `window` after its first hit; no retry-after hint
/// beyond that.
#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Arc<Mutex<HashMap<IpAddr, Window>>>,
}

struct Window {
    started: Instant,
    hits: u32,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Counts one request against `key`. Returns false once the window is full.
    pub fn try_acquire(&self, key: IpAddr) -> bool {
        let now = Instant::now();
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let slot = windows.entry(key).or_insert(Window {
            started: now,
            hits: 0,
        });
        if now.duration_since(slot.started) >= self.window {
            slot.started = now;
            slot.hits = 0;
        }
        if slot.hits >= self.max_requests {
            return false;
        }
        slot.hits += 1;
        true
    }
}

pub async fn limit_requests(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    if !state.limiter.try_acquire(addr.ip()) {
        warn!(ip = %addr.ip(), "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": RATE_LIMIT_MESSAGE })),
        )
            .into_response();
    }
    next.run(req).await
}
