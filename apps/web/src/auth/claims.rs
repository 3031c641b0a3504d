//! Claims of the session token issued by the sign-in front.

use serde::{Deserialize, Serialize};

/// Stored in request extensions by `JwtExtract`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject of the signed-in user
    pub sub: String,
    /// Object identifier of the user; partitions the to-do list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oid: Option<String>,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
