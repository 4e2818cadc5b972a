//! Binary entrypoint for the playground HTTP server.
//!
//! Configuration comes from environment variables; see
//! [`playground_server::config`]. Log filtering honours `RUST_LOG`.

use std::net::SocketAddr;
use std::process;

use tracing_subscriber::EnvFilter;

use playground_server::config::ServerConfig;
use playground_server::router::build_router;
use playground_server::state::AppState;

const DEFAULT_LOG_FILTER: &str = "warn,playground_server=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("invalid configuration: {}", err);
            process::exit(1);
        }
    };

    let state = match AppState::new(&config) {
        Ok(state) => state,
        Err(err) => {
            tracing::error!("failed to open document store: {}", err);
            process::exit(1);
        }
    };
    if config.cookie_gate.is_some() {
        tracing::info!("saves require the configured cookie");
    }

    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind {}: {}", addr, err);
            process::exit(1);
        }
    };
    tracing::warn!("playground server listening on http://{}", addr);

    if let Err(err) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        tracing::error!("server error: {}", err);
        process::exit(1);
    }
}
