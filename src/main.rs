mod app;
mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::features::auth::{CredentialVerifier, DenyAllVerifier, StaticCredentialVerifier};
use crate::features::reports::{JsonFileReportStore, ReportService};
use axum::{extract::Request, ServiceExt};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Initialize report storage
    let report_store = Arc::new(JsonFileReportStore::new(&config.storage.reports_path));
    tracing::info!(
        "Report store initialized at {}",
        report_store.path().display()
    );
    let report_service = Arc::new(ReportService::new(report_store));

    // Initialize admin credentials
    let verifier: Arc<dyn CredentialVerifier> = match config.admin.credentials() {
        Some((username, password)) => {
            tracing::info!("Admin basic auth enabled");
            Arc::new(StaticCredentialVerifier::new(username, password))
        }
        None => {
            tracing::warn!(
                "ADMIN_USERNAME/ADMIN_PASSWORD not set; all admin requests will be rejected"
            );
            Arc::new(DenyAllVerifier)
        }
    };

    let router = app::router(
        report_service,
        config.app.max_request_body_size,
        config.app.cors_allowed_origins.clone(),
    );
    let app = app::with_admin_gate(router, verifier);

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
