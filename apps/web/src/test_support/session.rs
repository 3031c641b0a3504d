use std::time::{Duration, SystemTime};

use crate::auth::jwt::mint_session_token;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// `Authorization` header value for a fresh session owned by `oid`.
pub fn session_bearer(security: &SecurityConfig, oid: Option<&str>) -> Result<String, AppError> {
    let token = mint_session_token(
        "test-subject",
        oid,
        SystemTime::now(),
        Duration::from_secs(15 * 60),
        security,
    )?;
    Ok(format!("Bearer {token}"))
}
