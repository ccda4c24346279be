use axum::{Router, Server, middleware::from_fn};
use diesel::{PgConnection, r2d2::{self, ConnectionManager as DbConnectionManager}};
use mentorship_backend::{AppState, db::DbPool, notifications};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    let config = mentorship_backend::config::Config::from_env()
        .expect("Failed to load configuration");
    mentorship_backend::init_tracing(&config);

    // Initialize database
    let manager = DbConnectionManager::<PgConnection>::new(&config.database_url);
    let db: DbPool = r2d2::Pool::builder()
        .max_size(config.database_max_connections)
        .min_idle(Some(config.database_min_connections))
        .build(manager)
        .expect("Failed to create database connection pool");

    // Notification dispatch: the engine publishes, the worker delivers.
    let (notifier, events) = notifications::notification_channel();
    notifications::spawn_dispatch_worker(events, Arc::new(notifications::LogChannel));

    let state = AppState::new(db, config.clone(), notifier);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(mentorship_backend::routes::create_router(state))
        .layer(cors)
        .layer(from_fn(mentorship_backend::middleware::logger::logger));

    let addr = config
        .server_address()
        .parse()
        .expect("Invalid server address");
    tracing::info!("Server running at http://{}", addr);
    Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("Server failed");
}
