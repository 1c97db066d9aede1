mod app_state;
mod batch;
mod config;
mod db;
mod handlers;
mod pix;
mod validation;

use clap::Parser;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app_state::AppState;
use config::Config;
use db::{init_pool, repository::DatabaseChargeRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pix_charge_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse configuration
    let config = Arc::new(Config::parse());

    // Initialize database
    let pool = init_pool(&config.database_url).await?;

    // Create shared state
    let state = AppState {
        config: config.clone(),
        charges: Arc::new(DatabaseChargeRepository::new(pool)),
    };

    let app = handlers::router(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
        );

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.socket_addr()).await?;

    tracing::info!("Server running on {}", config.socket_addr());
    tracing::info!(
        "Default receiver: {} / {}",
        config.default_merchant_name,
        config.default_merchant_city
    );
    if config.require_key_type {
        tracing::info!("Pix key type inference disabled");
    }

    axum::serve(listener, app).await?;

    Ok(())
}
