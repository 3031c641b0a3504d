//! Task-local trace id for the request being handled.
//!
//! `RequestTrace` scopes every request future with its trace id so that
//! error responses and log lines emitted deep inside a handler can pick it
//! up without threading it through every call.

use tokio::task_local;

const UNKNOWN: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current request, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

/// Run `future` with `trace_id` as the current trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

/// Run `f` synchronously with `trace_id` as the current trace id.
///
/// Middleware uses this for work done in `Service::call` before the request
/// future is first polled.
pub fn sync_with_trace_id<F, R>(trace_id: String, f: F) -> R
where
    F: FnOnce() -> R,
{
    TRACE_ID.sync_scope(trace_id, f)
}
