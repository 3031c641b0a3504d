//! Client-credential grant against a directory authority.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use super::cache::{CacheKey, TokenCache};
use super::error::{TokenError, TEMPORARILY_UNAVAILABLE};
use super::{AccessToken, TokenProvider};
use crate::config::IdentityConfig;
use crate::error::AppError;
use crate::logging::pii::redact;

/// Lifetime assumed when the authority omits both `expires_in` and `expires_on`.
const DEFAULT_LIFETIME: Duration = Duration::hours(1);

/// Successful token response. The v1 endpoint sends the numeric fields as
/// strings, so both encodings are accepted.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub expires_in: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub expires_on: Option<i64>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Acquires tokens as the application itself and caches them in the shared
/// [`TokenCache`] under `(client_id, resource)`.
pub struct ClientCredentialAuthority {
    token_endpoint: String,
    client_id: String,
    client_secret: String,
    http: Client,
    cache: Arc<dyn TokenCache>,
}

impl ClientCredentialAuthority {
    pub fn new(
        config: &IdentityConfig,
        cache: Arc<dyn TokenCache>,
        timeout: StdDuration,
    ) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build token HTTP client: {e}")))?;
        Ok(Self::with_http_client(config, cache, http))
    }

    /// Create an authority with a caller-supplied `reqwest::Client`.
    pub fn with_http_client(
        config: &IdentityConfig,
        cache: Arc<dyn TokenCache>,
        http: Client,
    ) -> Self {
        Self {
            token_endpoint: config.token_endpoint(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            http,
            cache,
        }
    }

    pub fn token_endpoint(&self) -> &str {
        &self.token_endpoint
    }

    async fn request_token(&self, resource: &str) -> Result<AccessToken, TokenError> {
        debug!(url = %self.token_endpoint, resource, "requesting client-credential token");

        let response = self
            .http
            .post(&self.token_endpoint)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("resource", resource),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = error_from_response(status, &body);
            warn!(status = %status, error = %err, "token request rejected");
            return Err(err);
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| TokenError::MalformedResponse(e.to_string()))?;
        if parsed.access_token.is_empty() {
            return Err(TokenError::MalformedResponse(
                "access_token is empty".to_string(),
            ));
        }

        let now = OffsetDateTime::now_utc();
        let expires_on = match (parsed.expires_in, parsed.expires_on) {
            (Some(secs), _) => now.checked_add(Duration::seconds(secs)).ok_or_else(|| {
                TokenError::MalformedResponse(format!("expires_in out of range: {secs}"))
            })?,
            (None, Some(epoch)) => OffsetDateTime::from_unix_timestamp(epoch)
                .map_err(|e| TokenError::MalformedResponse(format!("expires_on: {e}")))?,
            (None, None) => now + DEFAULT_LIFETIME,
        };

        info!(resource, expires_on = %expires_on, "access token acquired");

        Ok(AccessToken {
            value: parsed.access_token,
            token_type: parsed.token_type,
            resource: resource.to_string(),
            expires_on,
        })
    }
}

/// Map a non-2xx authority response to a [`TokenError`].
///
/// An OAuth error body wins. Without one, 503/504 count as the authority
/// being temporarily unavailable.
fn error_from_response(status: StatusCode, body: &str) -> TokenError {
    if let Ok(oauth) = serde_json::from_str::<OAuthErrorResponse>(body) {
        return TokenError::provider(oauth.error, oauth.error_description);
    }

    match status {
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => TokenError::provider(
            TEMPORARILY_UNAVAILABLE,
            format!("authority returned {status}"),
        ),
        _ => TokenError::provider(
            format!("http_{}", status.as_u16()),
            redact(body.chars().take(256).collect::<String>().as_str()),
        ),
    }
}

#[async_trait]
impl TokenProvider for ClientCredentialAuthority {
    async fn acquire_token(&self, resource: &str) -> Result<AccessToken, TokenError> {
        let key = CacheKey::new(self.client_id.clone(), resource);
        if let Some(token) = self.cache.get(&key) {
            debug!(resource, "access token served from cache");
            return Ok(token);
        }

        let token = self.request_token(resource).await?;
        self.cache.set(key, token.clone());
        Ok(token)
    }
}
