//! Build an initialized Actix test service around an [`AppState`].

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::Error as ActixError;
use actix_web::{
    web::{self, ServiceConfig},
    App,
};

use crate::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use crate::state::app_state::AppState;

type RoutesFn = Box<dyn FnOnce(&mut ServiceConfig) + Send>;

pub fn create_test_app_builder(state: AppState) -> TestAppBuilder {
    TestAppBuilder {
        state,
        routes: None,
    }
}

pub struct TestAppBuilder {
    state: AppState,
    routes: Option<RoutesFn>,
}

impl TestAppBuilder {
    /// Use custom routes instead of the production ones.
    pub fn with_routes<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut ServiceConfig) + Send + 'static,
    {
        self.routes = Some(Box::new(f));
        self
    }

    /// Build the service with the production middleware stack.
    pub async fn build(
        self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError>
    {
        let app = App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(self.state));

        let app = match self.routes {
            Some(f) => app.configure(f),
            None => app.configure(crate::routes::configure),
        };

        actix_web::test::init_service(app).await
    }
}
