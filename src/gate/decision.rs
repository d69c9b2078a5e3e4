use std::sync::Arc;

use axum::http::HeaderMap;

use super::credential::Credential;
use super::outcome::{DenyReason, Outcome};
use crate::services::auth::revocation::{RevocationError, RevocationStore};
use crate::services::auth::token_validator::TokenValidator;

/// The decision could not be computed. This is not a security judgement and must
/// never be reported to the client as an invalid token.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionError {
    #[error("revocation lookup failed: {0}")]
    Revocation(#[from] RevocationError),
}

/// Admission decision engine.
///
/// Holds no per-request state; share it behind an `Arc` and call `decide`
/// concurrently. Each collaborator is queried at most once per credential per
/// request, in order: revocation → access token → refresh token.
#[derive(Clone)]
pub struct AdmissionGate {
    revocation: Arc<dyn RevocationStore>,
    validator: Arc<dyn TokenValidator>,
}

impl std::fmt::Debug for AdmissionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionGate").finish_non_exhaustive()
    }
}

impl AdmissionGate {
    pub fn new(revocation: Arc<dyn RevocationStore>, validator: Arc<dyn TokenValidator>) -> Self {
        Self {
            revocation,
            validator,
        }
    }

    pub async fn decide(&self, headers: &HeaderMap) -> Result<Outcome, AdmissionError> {
        self.evaluate(&Credential::from_headers(headers)).await
    }

    pub async fn evaluate(&self, credential: &Credential) -> Result<Outcome, AdmissionError> {
        let Some(access_token) = credential.access_token.as_deref() else {
            return Ok(Outcome::Deny(DenyReason::NoToken));
        };

        // Revocation wins over a still-valid signature.
        if self.revocation.contains(access_token).await? {
            return Ok(Outcome::Deny(DenyReason::TokenInvalid));
        }

        if self.validator.validate(access_token) {
            return Ok(Outcome::Allow);
        }

        // Still a denial on a valid refresh token: the gate never refreshes on the
        // caller's behalf.
        let outcome = match credential.refresh_token.as_deref() {
            Some(refresh_token) if self.validator.validate(refresh_token) => {
                Outcome::Deny(DenyReason::AccessTokenExpired)
            }
            _ => Outcome::Deny(DenyReason::TokenInvalid),
        };

        Ok(outcome)
    }
}
