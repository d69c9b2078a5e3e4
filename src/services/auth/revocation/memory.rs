use std::{
    collections::HashSet,
    future::Future,
    pin::Pin,
    sync::{Arc, PoisonError, RwLock, RwLockWriteGuard},
};

use crate::services::auth::revocation::store::{RevocationError, RevocationStore};

/// In-memory revocation list for tests and local development.
///
/// State is per process, so this is not suitable for multi-instance deployments.
/// Entries never expire.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRevocationStore {
    revoked: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revoke(&self, token: impl Into<String>) {
        self.write().insert(token.into());
    }

    // Poisoned locks are recovered: an insert never leaves the set half-updated.
    fn is_revoked(&self, token: &str) -> bool {
        self.revoked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(token)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashSet<String>> {
        self.revoked.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RevocationStore for InMemoryRevocationStore {
    fn contains<'a>(
        &'a self,
        token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, RevocationError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.is_revoked(token)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn revoke_is_exact_match() {
        let store = InMemoryRevocationStore::new();
        assert!(!store.contains("t1").await.unwrap());

        store.revoke("t1");
        assert!(store.contains("t1").await.unwrap());
        // exact match only
        assert!(!store.contains("T1").await.unwrap());
        assert!(!store.contains(" t1").await.unwrap());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryRevocationStore::new();
        let other = store.clone();
        other.revoke("shared");
        assert!(store.contains("shared").await.unwrap());
    }
}
