//! Cache client interface used by higher-level services (token revocation lookups).
use async_trait::async_trait;
use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache-layer errors (transport/command/value).
///
/// Note:
/// - We keep this independent from `AppError` so callers decide how to fail.
///   The admission gate never turns these into an "invalid token" denial.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    BackendConnection(String),
    #[error("cache command error: {0}")]
    BackendCommand(String),
    #[error("cache value error: {0}")]
    InvalidValue(String),
}

/// A minimal cache interface.
///
/// The gate only reads key existence; entries and their TTLs are written by the
/// token issuer (logout / forced invalidation), never by us.
///
/// Implementations must be cheap to clone (typically `Arc<...>` inside).
#[async_trait]
pub trait CacheClient: Clone + Send + Sync + 'static {
    // Returns the cache backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // `EXISTS <key>`
    async fn exists(&self, key: &str) -> CacheResult<bool>;
}
