pub mod args;
pub mod error;
pub mod model;
pub mod controller {
    pub mod dashboard;
    pub mod history;
    pub mod proxy;
}
pub mod mvu {
    pub mod dashboard;
    pub mod runtime;
}
pub mod view {
    pub mod dashboard;
    pub mod index;
}

use actix_web::{HttpResponse, web};

const HTMX_PATH: &str = "https://unpkg.com/htmx.org@1.9.12";
const CHART_JS_PATH: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

/// Every route except `/static`. Expects `Data<UpstreamClient>` and
/// `Data<dyn HistorySource>` to be registered on the app.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(controller::dashboard::index))
        .route("/dashboard", web::get().to(controller::dashboard::dashboard))
        .route(
            "/dashboard/form",
            web::get().to(controller::dashboard::dashboard_form),
        )
        .route(
            "/api/users/{username}",
            web::get().to(controller::proxy::user_history),
        )
        .route("/health", web::get().to(HttpResponse::Ok));
}
