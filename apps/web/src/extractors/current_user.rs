use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::claims::SessionClaims;
use crate::error::AppError;

/// The signed-in caller, passed explicitly to the to-do list service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// Object identifier claim; the to-do list partition key
    pub owner_id: String,
}

impl CurrentUser {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
        }
    }
}

impl TryFrom<&SessionClaims> for CurrentUser {
    type Error = AppError;

    fn try_from(claims: &SessionClaims) -> Result<Self, Self::Error> {
        claims
            .oid
            .as_deref()
            .filter(|oid| !oid.trim().is_empty())
            .map(CurrentUser::new)
            .ok_or_else(AppError::unauthorized_missing_owner_claim)
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Claims are stored by the JwtExtract middleware.
        let result = req
            .extensions()
            .get::<SessionClaims>()
            .ok_or_else(AppError::unauthorized_missing_bearer)
            .and_then(CurrentUser::try_from);
        ready(result)
    }
}
