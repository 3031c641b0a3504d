use actix_web::http::header;
use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentUser, ValidatedForm};
use crate::middleware::JwtExtract;
use crate::models::NewItemForm;
use crate::state::app_state::AppState;
use crate::views::CreateOutcome;

/// GET / - the caller's list, or the error placeholder view.
async fn index(user: CurrentUser, app_state: web::Data<AppState>) -> HttpResponse {
    let view = app_state.todo_list.get_list(&user).await;
    HttpResponse::Ok().json(view)
}

/// POST / - add `item`, then send the browser back to the list.
async fn create(
    user: CurrentUser,
    form: ValidatedForm<NewItemForm>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    match app_state.todo_list.create_item(&user, &form).await {
        CreateOutcome::Created => Ok(HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/"))
            .finish()),
        CreateOutcome::Failed(view) => Ok(HttpResponse::Ok().json(view)),
        CreateOutcome::Invalid => Err(AppError::invalid(
            ErrorCode::ValidationError,
            "item is required",
        )),
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .wrap(JwtExtract)
            .route(web::get().to(index))
            .route(web::post().to(create)),
    );
}
