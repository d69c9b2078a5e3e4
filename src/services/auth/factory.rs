/// Factory: build the admission gate and its collaborators from application `Config`.
use std::sync::Arc;

use crate::config::{Config, RevocationBackend};
use crate::error::AppError;
use crate::gate::AdmissionGate;
use crate::services::auth::revocation::{
    InMemoryRevocationStore, RevocationStore, ValkeyRevocationStore,
};
use crate::services::auth::token_validator::{JwtValidator, TokenValidator};

pub async fn build_revocation_store(config: &Config) -> Result<Arc<dyn RevocationStore>, AppError> {
    match config.revocation_backend {
        RevocationBackend::Valkey => {
            let store = ValkeyRevocationStore::new_with_prefix(
                &config.redis_url,
                config.revocation_key_prefix.clone(),
            )
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to connect to revocation store");
                AppError::Internal
            })?;
            Ok(Arc::new(store))
        }
        RevocationBackend::Memory => {
            tracing::warn!("using in-memory revocation store; revocations are not shared");
            Ok(Arc::new(InMemoryRevocationStore::new()))
        }
    }
}

pub fn build_token_validator(config: &Config) -> Result<Arc<dyn TokenValidator>, AppError> {
    let validator = JwtValidator::new(
        &config.jwt_key,
        config.auth_issuer.as_deref(),
        config.auth_audience.as_deref(),
        config.token_leeway_seconds,
    )
    .map_err(|e| {
        tracing::error!(error = %e, "failed to build token validator");
        AppError::Internal
    })?;

    Ok(Arc::new(validator))
}

pub async fn build_admission_gate(config: &Config) -> Result<Arc<AdmissionGate>, AppError> {
    let revocation = build_revocation_store(config).await?;
    let validator = build_token_validator(config)?;

    Ok(Arc::new(AdmissionGate::new(revocation, validator)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{DenyReason, Outcome};

    fn config(pairs: &[(&str, &str)]) -> Config {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
        .unwrap()
    }

    #[tokio::test]
    async fn builds_memory_backed_gate() {
        let config = config(&[
            ("UPSTREAM_URL", "http://backend"),
            ("JWT_SECRET", "s3cret"),
            ("REVOCATION_BACKEND", "memory"),
        ]);

        let gate = build_admission_gate(&config).await.unwrap();
        let outcome = gate.decide(&Default::default()).await.unwrap();
        assert_eq!(outcome, Outcome::Deny(DenyReason::NoToken));
    }

    #[test]
    fn bad_public_key_fails_startup() {
        let config = config(&[
            ("UPSTREAM_URL", "http://backend"),
            ("ACCESS_JWT_PUBLIC_KEY_PEM", "garbage"),
        ]);

        assert!(matches!(build_token_validator(&config), Err(AppError::Internal)));
    }
}
