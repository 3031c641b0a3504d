//! Process-wide access token cache.
//!
//! Concurrency contract: [`InMemoryTokenCache`] guards its map with a
//! `parking_lot::RwLock`. Lookups take the read lock and run concurrently;
//! `set` and `clear` take the write lock. The lock is never held across an
//! `.await`. `clear` drops every entry, including tokens other in-flight
//! requests are about to use; those requests keep the clone they already hold.

use std::collections::HashMap;

use parking_lot::RwLock;
use time::{Duration, OffsetDateTime};
use tracing::debug;

use super::AccessToken;

/// Tokens are treated as expired this long before their real expiry.
pub const EXPIRY_MARGIN: Duration = Duration::minutes(5);

/// Cache entries are owned by the application identity, not by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub client_id: String,
    pub resource: String,
}

impl CacheKey {
    pub fn new(client_id: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            resource: resource.into(),
        }
    }
}

pub trait TokenCache: Send + Sync {
    /// Unexpired token for `key`, if any.
    fn get(&self, key: &CacheKey) -> Option<AccessToken>;
    fn set(&self, key: CacheKey, token: AccessToken);
    /// Drop every cached token.
    fn clear(&self);
    /// Number of entries, expired ones included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTokenCache {
    entries: RwLock<HashMap<CacheKey, AccessToken>>,
}

impl InMemoryTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_at(&self, key: &CacheKey, now: OffsetDateTime) -> Option<AccessToken> {
        self.entries
            .read()
            .get(key)
            .filter(|token| !token.is_expired_at(now, EXPIRY_MARGIN))
            .cloned()
    }
}

impl TokenCache for InMemoryTokenCache {
    fn get(&self, key: &CacheKey) -> Option<AccessToken> {
        self.get_at(key, OffsetDateTime::now_utc())
    }

    fn set(&self, key: CacheKey, token: AccessToken) {
        self.entries.write().insert(key, token);
    }

    fn clear(&self) {
        let mut entries = self.entries.write();
        debug!(dropped = entries.len(), "token cache cleared");
        entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
