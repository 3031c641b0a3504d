use actix_web::{web, App, HttpServer};
use todolist_web::config::env::{parse_var_or, var_or};
use todolist_web::config::{IdentityConfig, TodoApiConfig};
use todolist_web::infra::state::build_state;
use todolist_web::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use todolist_web::state::security_config::SecurityConfig;
use todolist_web::{routes, telemetry, AppError, AppState};
use tracing::{error, info};

fn load_state() -> Result<AppState, AppError> {
    build_state()
        .with_security(SecurityConfig::from_env()?)
        .with_identity(IdentityConfig::from_env()?)
        .with_todo_api(TodoApiConfig::from_env()?)
        .build()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let host = var_or("WEB_HOST", "0.0.0.0");
    let port = match parse_var_or::<u16>("WEB_PORT", 3000) {
        Ok(port) => port,
        Err(e) => {
            error!(error = %e, "invalid WEB_PORT");
            std::process::exit(1);
        }
    };

    let app_state = match load_state() {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(%host, port, "starting to-do list web app");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
