use async_trait::async_trait;

use crate::services::cache::client::{CacheClient, CacheError, CacheResult};

/// Valkey/Redis-backed cache client.
#[derive(Clone, Debug)]
pub struct ValkeyClient {
    manager: redis::aio::ConnectionManager,
}

impl ValkeyClient {
    // Create a Valkey client from a URL like `redis://localhost:6379`
    pub async fn new(url: &str) -> Result<Self, CacheError> {
        let client =
            redis::Client::open(url).map_err(|e| CacheError::BackendConnection(e.to_string()))?;

        let manager = client
            .get_connection_manager()
            .await
            .map_err(|e| CacheError::BackendConnection(e.to_string()))?;

        Ok(Self { manager })
    }
}

#[async_trait]
impl CacheClient for ValkeyClient {
    fn backend_name(&self) -> &'static str {
        "valkey"
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        // ConnectionManager is a cheap handle; clone per call so `&self` stays shared.
        let mut conn = self.manager.clone();

        // EXISTS returns the number of listed keys that exist (0 or 1 here).
        let n: i64 = redis::cmd("EXISTS")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::BackendCommand(e.to_string()))?;

        match n {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CacheError::InvalidValue(format!(
                "EXISTS returned {other} for a single key"
            ))),
        }
    }
}
