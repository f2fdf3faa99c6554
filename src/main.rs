use anyhow::Context;
use health_risk::api::routes::create_routes;
use health_risk::auth::PgUserStore;
use health_risk::config::{run_migrations, AppConfig, DatabaseConfig};
use health_risk::services::ModelStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(&config.log_level);

    // Models are required at startup; only the cancer feature list is optional
    let models = ModelStore::load(&config.models_dir).with_context(|| {
        format!("failed to load models from {}", config.models_dir.display())
    })?;
    info!(dir = %config.models_dir.display(), "Models loaded");

    let db_config = DatabaseConfig::from_env()?;
    let pool = db_config.create_pool().await?;
    run_migrations(&pool).await?;
    info!("Database schema ready");

    let app = create_routes(Arc::new(models), Arc::new(PgUserStore::new(pool)));

    let listener = TcpListener::bind(config.server_address()).await?;
    info!(
        environment = %config.environment,
        "Health risk API listening on http://{}",
        config.server_address()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},tower_http=info,sqlx=warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
