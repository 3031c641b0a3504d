use thiserror::Error;

/// OAuth error code the authority uses for transient unavailability.
pub const TEMPORARILY_UNAVAILABLE: &str = "temporarily_unavailable";

#[derive(Debug, Clone, Error)]
pub enum TokenError {
    /// The authority answered with an OAuth error.
    #[error("token authority returned '{code}': {description}")]
    Provider { code: String, description: String },
    /// The authority could not be reached or the exchange was cut short.
    #[error("token request failed: {0}")]
    Transport(String),
    #[error("malformed token response: {0}")]
    MalformedResponse(String),
}

impl TokenError {
    pub fn provider(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Provider {
            code: code.into(),
            description: description.into(),
        }
    }

    /// Only `temporarily_unavailable` is worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Provider { code, .. } if code == TEMPORARILY_UNAVAILABLE)
    }
}

impl From<reqwest::Error> for TokenError {
    fn from(e: reqwest::Error) -> Self {
        TokenError::Transport(e.to_string())
    }
}
