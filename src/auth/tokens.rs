//! Credential pair storage.
//!
//! Access and refresh credentials are opaque strings kept under fixed keys in
//! an injected storage backend. No validation happens here; the store only
//! guarantees that with a durable backend the pair survives a restart and
//! that `clear` removes both.

use std::sync::Arc;

use tracing::warn;

use crate::storage::{KeyValueStorage, MemoryStorage};

/// Storage key for the access credential
const ACCESS_TOKEN_KEY: &str = "patina_access_token";

/// Storage key for the refresh credential
const REFRESH_TOKEN_KEY: &str = "patina_refresh_token";

#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Ephemeral store for tests and anonymous-only runs.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Store a credential pair, as issued by login/signup. A missing refresh
    /// credential removes any stale one.
    pub fn set(&self, access: &str, refresh: Option<&str>) {
        self.write(ACCESS_TOKEN_KEY, Some(access));
        self.write(REFRESH_TOKEN_KEY, refresh);
    }

    /// Replace only the access credential, as issued by a refresh.
    pub fn set_access(&self, access: &str) {
        self.write(ACCESS_TOKEN_KEY, Some(access));
    }

    pub fn access(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY)
    }

    pub fn refresh(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY)
    }

    /// Remove both credentials.
    pub fn clear(&self) {
        self.write(ACCESS_TOKEN_KEY, None);
        self.write(REFRESH_TOKEN_KEY, None);
    }

    // A broken storage backend degrades to "no credential stored" rather
    // than failing the calling request.
    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Token storage read failed");
                None
            }
        }
    }

    fn write(&self, key: &str, value: Option<&str>) {
        let result = match value {
            Some(value) => self.storage.set(key, value),
            None => self.storage.remove(key),
        };
        if let Err(e) = result {
            warn!(key, error = %e, "Token storage write failed");
        }
    }
}
