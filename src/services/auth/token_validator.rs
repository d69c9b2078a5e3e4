use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// Structural + cryptographic validity check for a bearer token.
///
/// Must be total and side-effect free: any input string yields `true` or `false`.
/// Expired, malformed, badly signed and wrong-audience tokens all collapse to `false`.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str) -> bool;
}

/// Verification key material for `JwtValidator`.
///
/// Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub enum JwtKey {
    /// HS256 shared secret
    Secret(String),
    /// Ed25519 public key, PEM (SPKI)
    Ed25519Pem(String),
}

impl std::fmt::Debug for JwtKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Secret(_) => f.write_str("Secret(..)"),
            Self::Ed25519Pem(_) => f.write_str("Ed25519Pem(..)"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtValidatorError {
    #[error("invalid ed25519 public key pem: {0}")]
    InvalidKey(#[from] jsonwebtoken::errors::Error),
}

/// Claims we read back for logging. Everything else is validated by `jsonwebtoken`.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    sub: Option<serde_json::Value>,
}

/// JWT validator backed by `jsonwebtoken`.
///
/// `jsonwebtoken::Validation` checks:
/// - signature (algorithm pinned by the key type)
/// - `exp` (required) and `nbf` (when present), with `leeway`
/// - `iss` / `aud` when configured
#[derive(Clone)]
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtValidator")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtValidator {
    pub fn new(
        key: &JwtKey,
        issuer: Option<&str>,
        audience: Option<&str>,
        leeway_seconds: u64,
    ) -> Result<Self, JwtValidatorError> {
        let (decoding_key, algorithm) = match key {
            JwtKey::Secret(secret) => (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256),
            JwtKey::Ed25519Pem(pem) => (DecodingKey::from_ed_pem(pem.as_bytes())?, Algorithm::EdDSA),
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = leeway_seconds;
        validation.validate_nbf = true;
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self {
            decoding_key,
            validation,
        })
    }
}

impl TokenValidator for JwtValidator {
    fn validate(&self, token: &str) -> bool {
        match jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => {
                tracing::debug!(sub = ?data.claims.sub, "token verified");
                true
            }
            Err(err) => {
                tracing::debug!(kind = ?err.kind(), "token rejected");
                false
            }
        }
    }
}
