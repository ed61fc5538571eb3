use std::net::SocketAddr;

use tracing::{error, info, warn};

use menu_api::{build_router, AppState};
use menu_infrastructure::Repositories;
use menu_shared::config::{AppConfig, DatabaseBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry
    menu_shared::telemetry::init_telemetry(&config.log)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    if config.is_production() && config.database.backend == DatabaseBackend::Memory {
        warn!("Running production with the in-memory store; data is lost on restart");
    }

    // Connect to storage
    info!("Connecting to {:?} store...", config.database.backend);
    let repos = match Repositories::connect(&config.database).await {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to connect to storage: {}", e);
            std::process::exit(1);
        }
    };
    info!("Storage ready.");

    // Build router
    let state = AppState::new(repos.menus, repos.items);
    let app = build_router(state, &config.cors);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
