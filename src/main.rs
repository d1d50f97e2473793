// rewrite-relay - Streaming Gemini rewrite relay and Baidu translation backend

use anyhow::Result;
use clap::Parser;
use rewrite_relay::baidu::BaiduClient;
use rewrite_relay::cli::Args;
use rewrite_relay::config::AppConfig;
use rewrite_relay::gemini::GeminiClient;
use rewrite_relay::server::create_router;
use rewrite_relay::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Phase 0: .env, before anything reads the environment
    let dotenv = dotenvy::dotenv();

    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting rewrite-relay v{}", env!("CARGO_PKG_VERSION"));
    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }

    // Phase 3: Build upstream clients
    let gemini_client = GeminiClient::new(&config.gemini, &config.performance)?;
    info!("Gemini model: {}", gemini_client.model());
    let baidu_client = BaiduClient::new(&config.baidu, &config.performance)?;
    info!(
        "Baidu credentials file: {}",
        baidu_client.credentials().file().display()
    );

    // Phase 4: Build and start HTTP server
    let app = create_router(config.clone(), gemini_client, baidu_client)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
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
}
