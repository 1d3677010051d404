use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::customer::{CustomerStore, RemovableCustomerStore};

pub mod customers;

/// Stores behind the two customer resources.
#[derive(Clone)]
pub struct ServerState {
    /// Served at `/`.
    pub memory_customers: Arc<dyn CustomerStore>,
    /// Served at `/customers`.
    pub db_customers: Arc<dyn RemovableCustomerStore>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, the in-memory resource at the
/// root and the database resource under `/customers`.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(customers::router(state.memory_customers))
        .nest("/customers", customers::removable_router(state.db_customers))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
