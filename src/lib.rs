pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod notifications;
pub mod routes;
pub mod schema;
pub mod services;
pub mod validation;

use crate::config::Config;
use crate::db::DbPool;
use crate::notifications::Notifier;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(db: DbPool, config: Config, notifier: Notifier) -> Self {
        Self {
            db,
            config: Arc::new(config),
            notifier,
        }
    }
}

pub fn init_tracing(config: &Config) {
    let level_filter = match config.log_level.as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    };

    unsafe {
        std::env::set_var("RUST_LOG", level_filter);
    }

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .init();
        },
        _ => {
            tracing_subscriber::fmt()
                .init();
        }
    }
}
