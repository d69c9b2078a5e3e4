//! In-memory collaborators shared by unit tests.
use std::{
    collections::HashSet,
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex},
};

use crate::services::auth::revocation::{RevocationError, RevocationStore};
use crate::services::auth::token_validator::TokenValidator;
use crate::services::cache::CacheError;

/// Accepts a fixed set of tokens and records every call.
#[derive(Default)]
pub struct FakeValidator {
    valid: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeValidator {
    pub fn accepting(tokens: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            valid: tokens.iter().map(|t| t.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl TokenValidator for FakeValidator {
    fn validate(&self, token: &str) -> bool {
        self.calls.lock().unwrap().push(token.to_string());
        self.valid.contains(token)
    }
}

/// Revocation store whose backend is down.
pub struct UnreachableStore;

impl RevocationStore for UnreachableStore {
    fn contains<'a>(
        &'a self,
        _token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, RevocationError>> + Send + 'a>> {
        Box::pin(async {
            Err(RevocationError::Cache(CacheError::BackendConnection(
                "connection refused".into(),
            )))
        })
    }
}
