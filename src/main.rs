use std::net::SocketAddr;
use std::process::ExitCode;

use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use toolbox::{AppState, Config, build_router, utils};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exitcode::OK as u8),
        Err(exit_code) => ExitCode::from(exit_code as u8),
    }
}

/// Initialize the tracing subscriber with the configured filter and format.
fn init_logging(log_level: &str, log_json: bool) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    }
}

/// Run the application, returning an exit code on error.
async fn run() -> Result<(), exitcode::ExitCode> {
    // Configuration comes first so the log format can be chosen from it
    let config = Config::from_env().map_err(|e| {
        init_logging("info", false);
        error!("Configuration error: {e}");
        exitcode::CONFIG
    })?;
    init_logging(&config.log_level, config.log_json);

    info!("Starting Toolbox v{}", config.app_version);
    info!(
        host = %config.host,
        port = %config.port,
        max_body_bytes = config.max_request_body_size,
        "Configuration loaded"
    );
    if config.uses_default_api_key() {
        warn!("APP_API_KEY is the development placeholder; set a real secret before deploying");
    }

    let addr: SocketAddr = config.server_addr().parse().map_err(|e| {
        error!("Invalid server address: {e}");
        exitcode::CONFIG
    })?;

    let app = build_router(AppState::new(config));

    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind to {addr}: {e}");
        exitcode::UNAVAILABLE
    })?;

    info!("Server listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET  /toolbox/api/health       - Health check (no key)");
    info!("  GET  /toolbox/api/ip           - Client IP and user agent");
    info!("  GET  /toolbox/api/time         - Server time");
    info!("  GET  /toolbox/api/uuid         - Generate UUIDs (?count=1..20)");
    info!("  POST /toolbox/api/json/format  - Pretty-print JSON");
    info!("  POST /toolbox/api/hash         - md5/sha256 digest");
    info!("  POST /toolbox/api/jwt/decode   - Decode JWT (no verification)");
    info!("  ANY  /toolbox/api/echo         - Echo the request");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(utils::shutdown_signal())
    .await
    .map_err(|e| {
        error!("Server error: {e}");
        exitcode::SOFTWARE
    })?;

    info!("Server shutdown complete");
    Ok(())
}
