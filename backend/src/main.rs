//! Member Portal Backend
//!
//! A session-based registration and login portal.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Business logic
//! - Repositories: Data access
//! - Sessions: Redis-backed session store (process-memory fallback in development)
//! - Database: PostgreSQL with SQLx

use anyhow::Result;
use member_portal_backend::{
    config, db, routes,
    sessions::{SessionBackend, SessionManager},
    state::AppState,
};
use redis::aio::ConnectionManager;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Member Portal Backend"
    );

    // Create database pool
    info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database.url, config.database.max_connections).await?;

    // Run migrations (skip in production if using separate migration job)
    if !config::AppConfig::is_production() {
        db::run_migrations(&db_pool).await?;
    }

    // Connect the session store (Redis, with a process-local fallback)
    let backend = session_backend(&config.redis.url).await;

    // Validate production configuration
    if config::AppConfig::is_production() {
        validate_production_config(&config, &backend)?;
    }

    let sessions = SessionManager::new(backend, Duration::from_secs(config.session.ttl_secs));

    // Create application state
    let state = AppState::new(db_pool, sessions, config.clone());

    // Build application
    let app = routes::create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Connect the session store, falling back to process memory
///
/// Memory-held sessions do not survive a restart and are not shared between
/// instances; production refuses to start on the fallback (see
/// `validate_production_config`).
async fn session_backend(url: &str) -> SessionBackend {
    info!("Connecting to Redis...");

    match redis::Client::open(url) {
        Ok(client) => match ConnectionManager::new(client).await {
            Ok(conn) => {
                info!("Redis connection established");
                SessionBackend::Redis(conn)
            }
            Err(e) => {
                warn!(
                    "Failed to connect to Redis: {}. Sessions will be held in process memory.",
                    e
                );
                SessionBackend::memory()
            }
        },
        Err(e) => {
            warn!(
                "Invalid Redis URL: {}. Sessions will be held in process memory.",
                e
            );
            SessionBackend::memory()
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "member_portal_backend=info,tower_http=info".into()
        } else {
            "member_portal_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Validate configuration for production deployment
fn validate_production_config(
    config: &config::AppConfig,
    backend: &SessionBackend,
) -> Result<()> {
    if matches!(backend, SessionBackend::Memory(_)) {
        anyhow::bail!("Redis is required in production; refusing to run with in-memory sessions");
    }

    if !config.session.cookie_secure {
        warn!("session.cookie_secure is disabled - session cookies will be sent over plain HTTP");
    }

    if config.database.url.contains("localhost") || config.database.url.contains("127.0.0.1") {
        warn!("Database URL contains localhost - ensure this is intentional for production");
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
