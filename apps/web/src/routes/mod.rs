use actix_web::web;

pub mod todo_list;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(crate::health::configure_routes)
        .configure(todo_list::configure_routes);
}
