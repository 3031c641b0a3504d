//! Access log: one `request_completed` event per request.
//!
//! Runs inside `RequestTrace`, so the event carries the same trace id as the
//! `x-request-id` header and any Problem Details body. The route is logged as
//! its pattern (`/`, `/health`) rather than the raw path.

use std::future::{ready, Ready};
use std::time::{Duration, Instant};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{Method, StatusCode};
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::trace_ctx;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// Fields of one access log line.
struct Completion {
    method: Method,
    route: String,
    status: StatusCode,
    elapsed: Duration,
}

impl Completion {
    fn emit(&self) {
        let trace_id = trace_ctx::trace_id();
        let trace_id = trace_id.as_str();
        let status = self.status.as_u16();
        let elapsed = self.elapsed;

        // Rejected sessions and invalid forms are expected traffic; 5xx is not.
        if self.status.is_server_error() {
            error!(method = %self.method, route = %self.route, status, ?elapsed, trace_id, "request_completed");
        } else if self.status.is_client_error() {
            warn!(method = %self.method, route = %self.route, status, ?elapsed, trace_id, "request_completed");
        } else {
            info!(method = %self.method, route = %self.route, status, ?elapsed, trace_id, "request_completed");
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().clone();
        let route = req
            .match_pattern()
            .unwrap_or_else(|| "unmatched".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };

            Completion {
                method,
                route,
                status,
                elapsed: start.elapsed(),
            }
            .emit();

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test, web, App, HttpResponse};
    use parking_lot::Mutex;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    use super::*;
    use crate::middleware::RequestTrace;

    #[derive(Default, Debug, Clone)]
    struct Captured {
        message: String,
        route: String,
        trace_id: String,
        status: u64,
    }

    impl Visit for Captured {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            match field.name() {
                "message" => self.message = format!("{value:?}"),
                "route" => self.route = format!("{value:?}"),
                _ => {}
            }
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            match field.name() {
                "trace_id" => self.trace_id = value.to_string(),
                "message" => self.message = value.to_string(),
                _ => {}
            }
        }

        fn record_u64(&mut self, field: &Field, value: u64) {
            if field.name() == "status" {
                self.status = value;
            }
        }
    }

    struct CaptureLayer(Arc<Mutex<Vec<Captured>>>);

    impl<S: Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut captured = Captured::default();
            event.record(&mut captured);

            if captured.message == "request_completed" {
                self.0.lock().push(captured);
            }
        }
    }

    #[actix_web::test]
    async fn test_one_event_per_request_with_trace_id() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(CaptureLayer(events.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let app = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(RequestTrace)
                .route("/items/{id}", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let mut request_ids = Vec::new();
        for id in ["1", "2"] {
            let req = test::TestRequest::get()
                .uri(&format!("/items/{id}"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            let request_id = resp
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
                .unwrap_or_default();
            request_ids.push(request_id);
        }

        let events = events.lock().clone();
        assert_eq!(events.len(), 2);
        for (event, request_id) in events.iter().zip(&request_ids) {
            assert_eq!(&event.trace_id, request_id);
            assert_eq!(event.route, "/items/{id}");
            assert_eq!(event.status, 200);
        }
        assert_ne!(events[0].trace_id, events[1].trace_id);
    }

    #[actix_web::test]
    async fn test_unknown_route_is_logged_as_unmatched() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(CaptureLayer(events.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let app = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(RequestTrace)
                .route("/health", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get().uri("/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let events = events.lock().clone();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].route, "unmatched");
        assert_eq!(events[0].status, 404);
    }
}
