use axum::{
    body::Body,
    http::{HeaderValue, StatusCode, header},
    response::Response,
};
use serde::Serialize;

use super::outcome::{DenyReason, Outcome};

/// Wire shape of a denial. Field order is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub status: u16,
    pub code: u32,
    pub message: &'static str,
}

impl ErrorPayload {
    pub fn unauthorized(reason: DenyReason) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED.as_u16(),
            code: reason.code(),
            message: reason.message(),
        }
    }
}

/// What the pipeline does next.
pub enum Emission {
    /// Continue with the original request, unmodified.
    Proceed,
    /// Stop here and send this response.
    Reject(Response),
}

pub fn emit(outcome: Outcome) -> Emission {
    match outcome {
        Outcome::Allow => Emission::Proceed,
        Outcome::Deny(reason) => Emission::Reject(deny_response(reason)),
    }
}

fn deny_response(reason: DenyReason) -> Response {
    let payload = ErrorPayload::unauthorized(reason);

    render(StatusCode::UNAUTHORIZED, serialize_or_empty(&payload))
}

// The 401 status carries the essential signal; an unserializable body degrades to empty.
fn serialize_or_empty<T: Serialize>(payload: &T) -> Vec<u8> {
    serde_json::to_vec(payload).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "failed to serialize denial payload");
        Vec::new()
    })
}

fn render(status: StatusCode, body: Vec<u8>) -> Response {
    let mut res = Response::new(Body::from(body));
    *res.status_mut() = status;
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    res
}
