//! Session token middleware for the to-do routes.
//!
//! Verifies the `Authorization: Bearer` session token and stores its
//! [`SessionClaims`] in request extensions. Requests without a valid token
//! are answered with a 401 Problem Details response and never reach the
//! handler.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::auth::claims::SessionClaims;
use crate::auth::jwt::verify_session_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match session_claims(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                debug!(error = %err, "session token rejected");
                let res = req.error_response(err).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}

fn session_claims(req: &ServiceRequest) -> Result<SessionClaims, AppError> {
    let token = extract_bearer_from_header(req.headers().get(header::AUTHORIZATION))?;

    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    verify_session_token(&token, &app_state.security)
}

fn extract_bearer_from_header(header_value: Option<&HeaderValue>) -> Result<String, AppError> {
    let auth_str = header_value
        .ok_or_else(AppError::unauthorized_missing_bearer)?
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let parts: Vec<&str> = auth_str.split_whitespace().collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(token.to_string()),
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}
