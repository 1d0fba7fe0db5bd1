// Route exports
pub mod matches;

pub use matches::AppState;

use actix_web::web;

/// Mount every versioned API route under `/api/v1`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure),
    );
}
