//! Admission gate: decides whether a bearer-authenticated request may proceed.
//!
//! - `credential`: header extraction
//! - `outcome`: decision result + denial taxonomy
//! - `decision`: the ordered checks (revocation → access token → refresh token)
//! - `response`: turns an outcome into "proceed" or a 401 JSON response
mod credential;
mod decision;
mod outcome;
mod response;

pub use credential::{BEARER_PREFIX, Credential, REFRESH_TOKEN_HEADER};
pub use decision::{AdmissionError, AdmissionGate};
pub use outcome::{DenyReason, Outcome};
pub use response::{Emission, ErrorPayload, emit};
