use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// URL-encoded form extractor whose decode failures render as Problem Details
/// (400 `BAD_REQUEST`) instead of actix's plain-text error.
#[derive(Debug)]
pub struct ValidatedForm<T>(pub T);

impl<T> ValidatedForm<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedForm<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedForm<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = web::Form::<T>::from_request(req, payload);

        Box::pin(async move {
            match fut.await {
                Ok(form) => Ok(ValidatedForm(form.into_inner())),
                Err(e) => {
                    warn!(error = %e, "failed to decode form body");
                    Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        "Request body must be a URL-encoded form",
                    ))
                }
            }
        })
    }
}
