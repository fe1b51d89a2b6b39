use axum::{routing::get, Router};

pub mod invoices;
pub mod notifications;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/invoices", invoices::router())
        .route(
            "/notification/hook/:action/:reference",
            get(notifications::hook),
        )
}
