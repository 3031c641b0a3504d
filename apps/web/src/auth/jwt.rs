use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use super::claims::SessionClaims;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Mint a session token. The web app only verifies these; minting exists for
/// the sign-in front's contract and for tests.
pub fn mint_session_token(
    sub: &str,
    oid: Option<&str>,
    now: SystemTime,
    ttl: Duration,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let claims = SessionClaims {
        sub: sub.to_string(),
        oid: oid.map(str::to_string),
        iat,
        exp: iat + ttl.as_secs() as i64,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a session token and return its claims.
pub fn verify_session_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<SessionClaims, AppError> {
    // Default validation already checks exp; pin the configured algorithm.
    let validation = Validation::new(security.algorithm);

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}
