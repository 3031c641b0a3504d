#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod health;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod test_support;
pub mod todo_api;
pub mod token;
pub mod trace_ctx;
pub mod views;

#[cfg(test)]
pub mod test_bootstrap;

pub use auth::{mint_session_token, verify_session_token, SessionClaims};
pub use config::{IdentityConfig, TodoApiConfig};
pub use error::AppError;
pub use extractors::CurrentUser;
pub use infra::state::build_state;
pub use middleware::{JwtExtract, RequestTrace, StructuredLogger, TraceSpan};
pub use models::{NewItemForm, TodoItem};
pub use services::TodoListService;
pub use state::{AppState, SecurityConfig};
pub use views::{CreateOutcome, TodoListView};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
