//! Fleetdash Kernel
//!
//! Serves role-gated navigation for the fleet operations dashboard.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use clap::{Parser, Subcommand};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fleetdash_kernel::session::{
    create_memory_session_layer, create_session_layer, parse_same_site,
};
use fleetdash_kernel::{AppState, Config, app_router, cli};

/// Fleet operations dashboard kernel.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Inspect navigation registries.
    Nav {
        #[command(subcommand)]
        command: NavCommand,
    },
    /// List the role catalog.
    Roles,
}

#[derive(Subcommand, Debug)]
enum NavCommand {
    /// Validate a registry and print its version.
    Check {
        /// Navigation file; the built-in registry when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print the entries visible to a role.
    Show {
        /// Role to resolve for.
        #[arg(long)]
        role: String,
        /// Navigation file; the built-in registry when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_tracing();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Nav {
            command: NavCommand::Check { file },
        } => cli::cmd_nav_check(file.as_deref()),
        Command::Nav {
            command: NavCommand::Show { role, file },
        } => cli::cmd_nav_show(file.as_deref(), &role),
        Command::Roles => cli::cmd_roles(),
    }
}

async fn serve() -> Result<()> {
    info!("Starting Fleetdash kernel");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(port = config.port, "Configuration loaded");

    // Registry validation happens here; a bad registry never serves.
    let state = AppState::new(&config).context("failed to initialize application state")?;

    let cors = build_cors_layer(&config);
    let same_site = parse_same_site(&config.cookie_same_site);

    // Middleware order (last added = first executed in request flow):
    // TraceLayer → CORS → session → route guard → routes
    let app = match &config.redis_url {
        Some(redis_url) => {
            let session_layer = create_session_layer(redis_url, same_site)
                .await
                .context("failed to create session layer")?;
            info!("Sessions stored in Redis");
            app_router(state).layer(session_layer)
        }
        None => {
            warn!("REDIS_URL not set; sessions are kept in process memory");
            app_router(state).layer(create_memory_session_layer(same_site))
        }
    };

    let app: Router = app.layer(cors).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    let methods = [Method::GET, Method::OPTIONS];

    if config.cors_allowed_origins.len() == 1 && config.cors_allowed_origins[0] == "*" {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
            .allow_credentials(true)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
