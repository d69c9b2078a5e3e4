//! HTTP-level middleware wrapped around the whole gateway (public and gated routes).
//!
//! Responsibility:
//! - Request-Id: generated when the client sent none, echoed on the response
//! - One span per request carrying method, path and request id, so admission
//!   and upstream events can be correlated
//! - Global timeout covering the revocation lookup and the upstream round trip

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::error_handling::HandleErrorLayer;
use axum::http::{Request, header::HeaderName};
use axum::response::IntoResponse;
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::error::AppError;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Apply HTTP-level middleware to the given Router.
///
/// Layer order (outermost first): request id → span → error mapping → timeout.
/// A timeout becomes a 504 response before it reaches the span and the
/// request-id layer, so it is logged and tagged like any other response.
pub fn apply(router: Router, timeout: Duration) -> Router {
    let layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(TraceLayer::new_for_http().make_span_with(gateway_span))
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                tracing::warn!("request exceeded the gateway timeout");
                AppError::GatewayTimeout.into_response()
            } else {
                tracing::error!(error = %err, "unhandled middleware error");
                AppError::Internal.into_response()
            }
        }))
        .layer(TimeoutLayer::new(timeout));

    router.layer(layers)
}

// Path only: query strings and headers may carry credentials.
fn gateway_span(req: &Request<Body>) -> Span {
    tracing::info_span!(
        "gateway",
        method = %req.method(),
        path = %req.uri().path(),
        request_id = request_id(req).unwrap_or("-"),
    )
}

fn request_id<B>(req: &Request<B>) -> Option<&str> {
    req.headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
}
