//! tasktrack - multi-user task tracking API server

use anyhow::{Context, Result};
use axum::http::{HeaderName, HeaderValue, Method, header};
use clap::Parser;
use std::net::SocketAddr;
use sqlx::sqlite::SqliteConnectOptions;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;

use config::{Config, CorsConfig, LoggingConfig};
use tasktrack_api::{AppState, create_router};
use tasktrack_auth::TokenManager;
use tasktrack_db::Database;

/// tasktrack - multi-user task tracking API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "TASKTRACK_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "TASKTRACK_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Initialize logging
    init_logging(&config.logging);

    if Path::new(&args.config).exists() {
        info!("Loaded configuration from {}", args.config);
    } else {
        info!(
            "Config file not found at {}, using defaults and environment",
            args.config
        );
    }

    config.validate()?;

    info!("Starting tasktrack v{}", env!("CARGO_PKG_VERSION"));

    // Create the database directory for file-backed SQLite
    if let Some(parent) = sqlite_parent_dir(&config.database.url)? {
        tokio::fs::create_dir_all(&parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    // Initialize database
    let db = Database::with_max_connections(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to open database")?;

    // Initialize token manager
    let tokens = Arc::new(TokenManager::new(
        &config.auth.jwt_secret,
        config.auth.token_expiry_hours,
    ));

    // Create application state
    let state = AppState::new(db, tokens);

    // Create router
    let app = create_router(state)
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http());

    // Determine bind address
    let bind_addr = args.bind.unwrap_or(config.server.bind_address);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind_addr, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind_addr, port))?;

    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Initialize logging
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format.eq_ignore_ascii_case("json") {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Directory holding the database file, if the URL names one
fn sqlite_parent_dir(url: &str) -> Result<Option<PathBuf>> {
    let options = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("Invalid database URL {}", url))?;
    Ok(options
        .get_filename()
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf))
}

/// Build the CORS layer from the configured origin allow-list
fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let allow_origin = if cors.allowed_origins.iter().any(|o| o == "*") {
        warn!("CORS allows any origin");
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ])
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, run until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route("/health", get(|| async { "ok" })).layer(cors_layer(&CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }))
    }

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir("sqlite:./data/tasktrack.db?mode=rwc").unwrap(),
            Some(PathBuf::from("./data"))
        );
        assert_eq!(
            sqlite_parent_dir("sqlite:///var/lib/tasktrack/db.sqlite").unwrap(),
            Some(PathBuf::from("/var/lib/tasktrack"))
        );
        assert_eq!(sqlite_parent_dir("sqlite:tasktrack.db").unwrap(), None);
        assert_eq!(sqlite_parent_dir("sqlite::memory:").unwrap(), None);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn test_cors_ignores_other_origins() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "http://evil.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
