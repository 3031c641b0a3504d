use jsonwebtoken::Algorithm;

use crate::config::env::must_var;
use crate::error::AppError;

/// Session token verification settings
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Shared secret of the sign-in front's session tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::new(must_var("SESSION_JWT_SECRET")?))
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
