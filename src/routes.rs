// routes.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use http::{header::CONTENT_TYPE, Method};
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::state::AppState;

pub fn create_routes(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, http::header::AUTHORIZATION]);

    Router::new()
        .route("/api/polls", get(handlers::get_polls).post(handlers::create_poll))
        .route("/api/polls/{id}", get(handlers::get_poll))
        .route("/api/polls/{id}/vote", post(handlers::vote))
        .layer(cors)
        .with_state(state)
}
