// config.rs
use std::env;

use tracing::info;

pub struct Config {
    pub port: u16,
    pub database_url: String,
}

impl Config {
    /// Reads configuration from the environment. `.env` is loaded by
    /// the caller before this runs.
    pub fn load() -> Self {
        let port = env::var("PORT")
            .unwrap_or_else(|_| {
                info!("PORT not set, using default: 3030");
                "3030".to_string()
            })
            .parse::<u16>()
            .expect("PORT must be a valid number");

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        Self { port, database_url }
    }
}
