//! Error codes surfaced in Problem Details responses.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Missing or malformed Bearer session token
    UnauthorizedMissingBearer,
    /// Session token failed verification
    UnauthorizedInvalidJwt,
    /// Session token has expired
    UnauthorizedExpiredJwt,
    /// Session token carries no owner-identifier claim
    UnauthorizedMissingOwnerClaim,

    // Request Validation
    /// Submitted form failed required-field validation
    ValidationError,
    /// Request body could not be read or decoded
    BadRequest,

    // System Errors
    Internal,
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::UnauthorizedMissingOwnerClaim => "UNAUTHORIZED_MISSING_OWNER_CLAIM",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
