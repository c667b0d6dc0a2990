use anyhow::Context;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cineticket::{config::Config, controllers, database::Database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CineTicket API");

    // Connect to the database
    let db = Database::new(&config.database.url, &config.database.db_name)
        .await
        .context("failed to connect to MongoDB")?;
    info!("Database connected");

    // Startup tasks: indexes and the default admin account
    db.ensure_indexes()
        .await
        .context("failed to ensure indexes")?;
    db.seed_default_admin(&config.admin)
        .await
        .context("failed to seed default admin")?;

    let app_state = Arc::new(AppState {
        db,
        config: config.clone(),
    });

    // The dashboard and storefront are served from other origins
    let app = Router::new()
        .route("/", get(|| async { "CineTicket API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.app.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listener")?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("server error")?;
    Ok(())
}
