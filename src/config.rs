/*
 * Responsibility
 * - Read environment / .env settings (listen port, upstream, revocation store, JWT keys)
 * - Validate them (missing or unparsable values fail startup)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use axum::http::Uri;

use crate::services::auth::token_validator::JwtKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationBackend {
    Valkey,
    Memory,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Allowed requests are forwarded here (http only)
    pub upstream_url: Uri,
    pub request_timeout: Duration,

    pub revocation_backend: RevocationBackend,
    pub redis_url: String,
    pub revocation_key_prefix: String,

    pub jwt_key: JwtKey,
    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,
    pub token_leeway_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match var("PORT") {
            Some(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8080,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = var("APP_ENV")
            .map(|s| AppEnv::parse(&s))
            .unwrap_or(AppEnv::Development);

        let upstream_url = var("UPSTREAM_URL").ok_or(ConfigError::Missing("UPSTREAM_URL"))?;
        let upstream_url = parse_upstream(&upstream_url)?;

        let request_timeout = Duration::from_secs(
            var("REQUEST_TIMEOUT_SECONDS")
                .map(|s| s.parse::<u64>())
                .transpose()
                .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?
                .unwrap_or(30),
        );

        let revocation_backend = match var("REVOCATION_BACKEND")
            .unwrap_or_else(|| "valkey".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "valkey" | "redis" => RevocationBackend::Valkey,
            "memory" => RevocationBackend::Memory,
            _ => return Err(ConfigError::Invalid("REVOCATION_BACKEND")),
        };

        let redis_url = var("REDIS_URL").unwrap_or_else(|| "redis://127.0.0.1:6379".to_string());
        let revocation_key_prefix = var("REVOCATION_KEY_PREFIX").unwrap_or_default();

        // The public key wins when both are configured.
        let jwt_key = match (var("ACCESS_JWT_PUBLIC_KEY_PEM"), var("JWT_SECRET")) {
            (Some(pem), _) => JwtKey::Ed25519Pem(pem.replace("\\n", "\n")),
            (None, Some(secret)) if !secret.is_empty() => JwtKey::Secret(secret),
            (None, Some(_)) => return Err(ConfigError::Invalid("JWT_SECRET")),
            (None, None) => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        let auth_issuer = var("AUTH_ISSUER").filter(|s| !s.trim().is_empty());
        let auth_audience = var("AUTH_AUDIENCE").filter(|s| !s.trim().is_empty());

        let token_leeway_seconds = var("TOKEN_LEEWAY_SECONDS")
            .map(|s| s.parse::<u64>())
            .transpose()
            .map_err(|_| ConfigError::Invalid("TOKEN_LEEWAY_SECONDS"))?
            .unwrap_or(0);

        Ok(Self {
            addr,
            app_env,
            upstream_url,
            request_timeout,
            revocation_backend,
            redis_url,
            revocation_key_prefix,
            jwt_key,
            auth_issuer,
            auth_audience,
            token_leeway_seconds,
        })
    }
}

fn parse_upstream(raw: &str) -> Result<Uri, ConfigError> {
    let uri: Uri = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid("UPSTREAM_URL"))?;

    // The forwarding client speaks plain HTTP; TLS is terminated in front of the backend.
    match (uri.scheme_str(), uri.authority()) {
        (Some("http"), Some(_)) => Ok(uri),
        _ => Err(ConfigError::Invalid("UPSTREAM_URL")),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[
            ("UPSTREAM_URL", "http://backend:9000"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.revocation_backend, RevocationBackend::Valkey);
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
        assert_eq!(config.revocation_key_prefix, "");
        assert!(matches!(config.jwt_key, JwtKey::Secret(ref s) if s == "s3cret"));
        assert_eq!(config.auth_issuer, None);
        assert_eq!(config.token_leeway_seconds, 0);
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9999"),
            ("APP_ENV", "PROD"),
            ("UPSTREAM_URL", "http://backend:9000/base"),
            ("REQUEST_TIMEOUT_SECONDS", "5"),
            ("REVOCATION_BACKEND", "memory"),
            ("REVOCATION_KEY_PREFIX", "blacklist:"),
            ("ACCESS_JWT_PUBLIC_KEY_PEM", "-----BEGIN PUBLIC KEY-----\\nAAA\\n-----END PUBLIC KEY-----"),
            ("JWT_SECRET", "ignored"),
            ("AUTH_ISSUER", "auth.example"),
            ("AUTH_AUDIENCE", "gateway"),
            ("TOKEN_LEEWAY_SECONDS", "15"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 9999);
        assert!(config.app_env.is_production());
        assert_eq!(config.upstream_url.path(), "/base");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.revocation_backend, RevocationBackend::Memory);
        assert_eq!(config.revocation_key_prefix, "blacklist:");
        assert!(matches!(config.jwt_key, JwtKey::Ed25519Pem(ref pem) if pem.contains("\nAAA\n")));
        assert_eq!(config.auth_issuer.as_deref(), Some("auth.example"));
        assert_eq!(config.auth_audience.as_deref(), Some("gateway"));
        assert_eq!(config.token_leeway_seconds, 15);
    }

    #[test]
    fn missing_required_values() {
        let err = Config::from_lookup(lookup(&[("JWT_SECRET", "s")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("UPSTREAM_URL")));

        let err = Config::from_lookup(lookup(&[("UPSTREAM_URL", "http://b")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn invalid_values() {
        let base = [("UPSTREAM_URL", "http://b"), ("JWT_SECRET", "s")];
        for (key, value) in [
            ("PORT", "http"),
            ("UPSTREAM_URL", "https://b"),
            ("UPSTREAM_URL", "/relative"),
            ("REQUEST_TIMEOUT_SECONDS", "-1"),
            ("REVOCATION_BACKEND", "postgres"),
            ("JWT_SECRET", ""),
            ("TOKEN_LEEWAY_SECONDS", "soon"),
        ] {
            let mut pairs: Vec<(&str, &str)> =
                base.iter().copied().filter(|(k, _)| *k != key).collect();
            pairs.push((key, value));

            let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid(k) if k == key),
                "{key}={value}: {err}"
            );
        }
    }
}
