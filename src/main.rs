use deadlines::api::{router, AppState};
use deadlines::config::AppConfig;
use deadlines::runtime::fetcher::HttpFetcher;
use deadlines::runtime::logging::init_logging;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    init_logging();

    let config = match AppConfig::load_default() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("[Server] Failed to load configuration: {}", err);
            std::process::exit(1);
        }
    };

    let fetcher = match HttpFetcher::from_config(&config) {
        Ok(fetcher) => fetcher,
        Err(err) => {
            tracing::error!("[Server] {}", err);
            std::process::exit(1);
        }
    };

    let bind_addr = config.bind_addr.clone();
    let app = router(AppState::new(config, Arc::new(fetcher)));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {bind_addr}: {e}"));

    tracing::info!("[Server] Listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("[Server] Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("[Server] Shutting down");
}
