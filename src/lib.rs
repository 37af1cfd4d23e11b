//! Poll creation and voting backend: an axum HTTP API over Postgres.
//!
//! Writes flow through the workflows in [`actions`], which validate
//! form input, resolve the acting user, and persist through the
//! [`store::PollStore`] seam. Reads serve polls with derived vote
//! counts.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod actions;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

use config::Config;
use state::AppState;
use store::PgStore;

pub async fn start() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    dotenvy::dotenv().ok();
    let config = Config::load();

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to the database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let state = AppState::new(Arc::new(PgStore::new(pool)));
    let app = routes::create_routes(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {addr}");

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .expect("Server failed");
}
