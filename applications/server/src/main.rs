/// Anonbeats Server - password-gated personal music server
use anonbeats_media::HttpMediaStore;
use anonbeats_server::{config::ServerConfig, create_router, state::AppState};
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "anonbeats-server")]
#[command(about = "Anonbeats personal music server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Load and validate the configuration, then exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anonbeats_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => serve().await?,
        Commands::CheckConfig => check_config()?,
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Anonbeats server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let media = Arc::new(HttpMediaStore::new(config.media.clone())?);
    tracing::info!("Media host: {}", config.media.api_base);

    let app_state = AppState::new(media, config.media.clone(), config.gate.clone());
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn check_config() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    config.validate()?;
    println!("Configuration OK");
    println!("  server: {}:{}", config.server.host, config.server.port);
    println!("  media:  {} ({})", config.media.api_base, config.media.cloud_name);
    println!("  folder: {}", config.media.folder);
    Ok(())
}
