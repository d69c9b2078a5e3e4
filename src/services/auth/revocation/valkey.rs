use std::{future::Future, pin::Pin, sync::Arc};

use crate::services::{
    auth::revocation::store::{RevocationError, RevocationStore},
    cache::{CacheClient, ValkeyClient},
};

/// Valkey-backed revocation list (Redis protocol).
///
/// Keys are `<prefix><raw token>`. The default prefix is empty because the issuer
/// writes the raw token as the key on logout; entries expire on the issuer's TTL.
#[derive(Clone)]
pub struct ValkeyRevocationStore<C: CacheClient> {
    cache: Arc<C>,
    prefix: String,
}

impl ValkeyRevocationStore<ValkeyClient> {
    pub async fn new_with_prefix(
        redis_url: &str,
        prefix: impl Into<String>,
    ) -> Result<Self, RevocationError> {
        let client = ValkeyClient::new(redis_url).await?;

        Ok(Self {
            cache: Arc::new(client),
            prefix: prefix.into(),
        })
    }
}

impl<C: CacheClient> ValkeyRevocationStore<C> {
    pub fn new_with_cache(cache: Arc<C>, prefix: impl Into<String>) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, raw: &str) -> String {
        format!("{}{}", self.prefix, raw)
    }
}

impl<C: CacheClient> RevocationStore for ValkeyRevocationStore<C> {
    fn contains<'a>(
        &'a self,
        token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, RevocationError>> + Send + 'a>> {
        Box::pin(async move {
            let revoked = self.cache.exists(&self.key(token)).await.map_err(|err| {
                tracing::warn!(
                    backend = self.cache.backend_name(),
                    error = %err,
                    "revocation lookup failed"
                );
                err
            })?;

            Ok(revoked)
        })
    }
}
