//! Bearer admission: decide → emit, before any backend sees the request.
//!
//! - Allow: the original request goes to the next stage unmodified.
//! - Deny: 401 JSON (`{"status","code","message"}`), nothing downstream runs.
//! - Decision could not be computed (revocation store down): `AppError`, never a 401.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::gate::{self, Emission, Outcome};
use crate::state::AppState;

/// Put the admission gate in front of every route of `router`.
///
/// ```ignore
/// let proxied = api::proxied();
/// let proxied = middleware::auth::admission::apply(proxied, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, admission_middleware))
}

async fn admission_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // `Body` is not `Sync`; only the parts are borrowed across the lookups.
    let (parts, body) = req.into_parts();
    let outcome = state.gate.decide(&parts.headers).await?;

    match outcome {
        Outcome::Allow => tracing::debug!(path = %parts.uri.path(), "request admitted"),
        Outcome::Deny(reason) => {
            tracing::info!(path = %parts.uri.path(), %reason, "request denied")
        }
    }

    let req = Request::from_parts(parts, body);
    match gate::emit(outcome) {
        Emission::Proceed => Ok(next.run(req).await),
        Emission::Reject(res) => Ok(res),
    }
}
