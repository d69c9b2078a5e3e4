use std::{future::Future, pin::Pin};

use crate::services::cache::CacheError;

/// Revocation lookup result:
/// - `Ok(true)`: token is on the revocation list
/// - `Ok(false)`: token is not revoked
/// - `Err(_)`: store failure (the decision cannot be computed)
pub trait RevocationStore: Send + Sync {
    // Look up the raw token string exactly as it was extracted from the header.
    //
    // Returns:
    // - Ok(true)  => revoked
    // - Ok(false) => not revoked
    // - Err(_)    => backend failure (caller must surface it, not deny the token)
    fn contains<'a>(
        &'a self,
        token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, RevocationError>> + Send + 'a>>;
}

#[derive(Debug, thiserror::Error)]
pub enum RevocationError {
    #[error(transparent)]
    Cache(#[from] CacheError),
}
