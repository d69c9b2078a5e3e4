use axum::{
    Router,
    routing::{any, get},
};

use crate::api::handlers::{forward::forward, health::health};
use crate::state::AppState;

/// Liveness path, kept under a prefix no backend route is expected to use.
pub const HEALTH_PATH: &str = "/_gateway/health";

/// Routes that bypass the admission gate.
pub fn public() -> Router<AppState> {
    Router::new().route(HEALTH_PATH, get(health))
}

/// Every other path is forwarded upstream. The admission middleware goes on top of this.
pub fn proxied() -> Router<AppState> {
    Router::new()
        .route("/", any(forward))
        .route("/{*path}", any(forward))
}
