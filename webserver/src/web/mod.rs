//! Routing and request plumbing

pub mod handlers;
pub mod identity;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::state::AppState;
use handlers::api;

/// Build the axum router with all lead routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/buyers", post(api::create_lead).get(api::list_leads))
        .route("/api/buyers/import", post(api::import_leads))
        .route("/api/buyers/export", get(api::export_leads))
        .route("/api/buyers/:id", get(api::get_lead).put(api::update_lead))
        .route("/api/buyers/:id/history", get(api::get_history))
        .route("/health", get(api::health_check))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()).into_inner())
        .with_state(state)
}
