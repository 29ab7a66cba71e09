//! Gateway server. Configuration comes from the environment (and `.env` if present).

use select_gateway::{connect_pool, gateway_routes, AppState, GatewayConfig, PgRowSource, TableRegistry};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("select_gateway=info,tower_http=info")),
        )
        .init();

    let config = GatewayConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        e
    })?;
    let tables = TableRegistry::resolve(&config.tables).map_err(|e| {
        tracing::error!(error = %e, "invalid table registry");
        e
    })?;
    tracing::info!(tables = ?tables.names().collect::<Vec<_>>(), "tables registered");

    let pool = connect_pool(&config.database);
    let state = AppState::new(PgRowSource::new(pool), tables);
    let app = gateway_routes(state, &config.server);

    let listener = TcpListener::bind(config.server.address()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
