/// SSO Service Main Entry Point
///
/// Starts gRPC server with:
/// - PostgreSQL connection pool and migrations
/// - Authentication service (Argon2id hashing, per-application JWT)
/// - gRPC health service and correlation-id interceptor
use anyhow::{Context, Result};
use clap::Parser;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sso_service::{
    config::Settings,
    db::PgCredentialStore,
    grpc::{correlation_interceptor, sso::auth::auth_server::AuthServer, SsoGrpcServer},
    security::{Argon2Hasher, JwtTokenIssuer},
    services::AuthService,
    telemetry,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tonic::transport::Server;
use tracing::{error, info};

/// SSO service - credential verification and session tokens over gRPC
#[derive(Parser, Debug)]
#[command(name = "sso-service")]
struct Args {
    /// Path to a YAML, TOML or JSON configuration file
    #[arg(long = "config", env = "SSO_CONFIG_PATH")]
    config_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let settings = Settings::load(args.config_path.as_deref())
        .context("Failed to load configuration")?;

    telemetry::init_tracing(settings.env)?;

    info!(env = ?settings.env, "Starting SSO Service");

    // Initialize database connection pool
    let db_pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .acquire_timeout(Duration::from_secs(settings.database.acquire_timeout_secs))
        .connect(settings.database.url.expose_secret())
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!(
        "Database pool initialized with {} max connections",
        settings.database.max_connections
    );

    // Run database migrations
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations completed");

    let hasher = Argon2Hasher::new(&settings.password)
        .context("Failed to initialize password hasher")?;

    let auth = AuthService::with_store(
        Arc::new(PgCredentialStore::new(db_pool)),
        Arc::new(hasher),
        Arc::new(JwtTokenIssuer::new()),
        settings.token_ttl(),
    );

    let addr: SocketAddr = format!("{}:{}", settings.grpc.host, settings.grpc.port)
        .parse()
        .context("Invalid server address")?;

    // gRPC health reporting
    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<AuthServer<SsoGrpcServer>>()
        .await;

    info!(
        timeout_secs = settings.grpc.timeout_secs,
        "Starting gRPC server on {}", addr
    );

    Server::builder()
        .timeout(settings.grpc.timeout())
        .add_service(health_service)
        .add_service(AuthServer::with_interceptor(
            SsoGrpcServer::new(Arc::new(auth)),
            correlation_interceptor,
        ))
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("gRPC server error")?;

    info!("SSO service shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutting down gracefully...");
}
