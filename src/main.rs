use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rift_dashboard::api::state::AppState;
use rift_dashboard::config::AppConfig;
use rift_dashboard::dashboard::{DashboardController, JsonDirRenderer};
use rift_dashboard::fetch::{ClientConfig, PlayerClient};
use rift_dashboard::storage;

#[derive(Parser)]
#[command(name = "rift-dashboard")]
#[command(about = "League of Legends pro player performance dashboard")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the stats API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Fetch player records and write all six chart configs as JSON
    Render {
        /// Endpoint to load players from (overrides config)
        #[arg(long)]
        endpoint: Option<String>,

        /// Position filter ("all" for no filter)
        #[arg(long, default_value = "all")]
        position: String,

        /// Directory to write chart configuration files into
        #[arg(long, default_value = "./charts")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        AppConfig::from_file(&cli.config)
            .with_context(|| format!("loading config from {:?}", cli.config))?
    } else {
        AppConfig::default()
    };

    // Initialize tracing
    let log_level = cli.log_level.clone().unwrap_or(config.log_level.clone());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting rift-dashboard v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            let players = storage::load_players(&config.data.players_file).with_context(|| {
                format!("loading dataset from {:?}", config.data.players_file)
            })?;

            let state = AppState::new(players);
            let mut app = rift_dashboard::api::build_router(state)
                .layer(cors_layer(&config.server.cors_origin)?)
                .layer(TraceLayer::new_for_http());

            if let Some(ref dir) = config.data.frontend_dir {
                app = app.fallback_service(ServeDir::new(dir));
            }

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard API: http://{}", addr);
            axum::serve(listener, app).await?;
        }

        Commands::Render {
            endpoint,
            position,
            out_dir,
        } => {
            let endpoint = endpoint.unwrap_or(config.fetch.endpoint);
            let client = PlayerClient::new(ClientConfig {
                endpoint: url::Url::parse(&endpoint)
                    .with_context(|| format!("invalid endpoint: {}", endpoint))?,
                timeout: Duration::from_secs(config.fetch.timeout_seconds),
                ..ClientConfig::default()
            })?;

            let renderer = JsonDirRenderer::new(out_dir.clone());
            let mut controller = DashboardController::new(renderer);
            controller.set_filter(position.clone());
            controller.initialize(&client).await?;

            println!("\n=== Render Results ===");
            println!("Players loaded:  {}", controller.players().len());
            println!("Position filter: {}", position);
            println!("Charts written:  6 ({:?})", out_dir);
        }
    }

    Ok(())
}

/// Build a CORS layer from the configured origin ("*" allows any).
fn cors_layer(origin: &str) -> Result<CorsLayer> {
    if origin == "*" {
        Ok(CorsLayer::new().allow_origin(Any).allow_methods(Any))
    } else {
        let origin: HeaderValue = origin
            .parse()
            .with_context(|| format!("invalid CORS origin: {}", origin))?;
        Ok(CorsLayer::new().allow_origin(origin))
    }
}
