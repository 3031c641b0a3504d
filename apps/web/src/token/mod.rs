//! Application-identity access tokens for the backend to-do API.
//!
//! Tokens are requested with the client-credential grant, held in a
//! process-wide [`TokenCache`] shared by every request, and acquired through
//! [`acquire_with_retry`] so the list and create paths share one retry policy.

use std::fmt;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};

pub mod authority;
pub mod cache;
pub mod error;
pub mod retry;

pub use authority::ClientCredentialAuthority;
pub use cache::{CacheKey, InMemoryTokenCache, TokenCache, EXPIRY_MARGIN};
pub use error::{TokenError, TEMPORARILY_UNAVAILABLE};
pub use retry::{acquire_with_retry, RetryPolicy};

/// Bearer credential for one resource.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub token_type: String,
    pub resource: String,
    pub expires_on: OffsetDateTime,
}

impl AccessToken {
    pub fn bearer(
        value: impl Into<String>,
        resource: impl Into<String>,
        expires_on: OffsetDateTime,
    ) -> Self {
        Self {
            value: value.into(),
            token_type: "Bearer".to_string(),
            resource: resource.into(),
            expires_on,
        }
    }

    /// True once `now` is within `margin` of the expiry instant.
    ///
    /// An expiry too close to the representable minimum counts as expired.
    pub fn is_expired_at(&self, now: OffsetDateTime, margin: Duration) -> bool {
        self.expires_on
            .checked_sub(margin)
            .map_or(true, |refresh_at| refresh_at <= now)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("resource", &self.resource)
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

/// Source of access tokens for a resource identifier.
///
/// Implementations may serve from a cache; callers must not assume a network
/// round trip happens on every call.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn acquire_token(&self, resource: &str) -> Result<AccessToken, TokenError>;
}
