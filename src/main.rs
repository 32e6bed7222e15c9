//! CheckMate HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use checkmate::config::Config;
use checkmate::gateway::{GatewayState, create_router_with_state};
use checkmate::prediction::HeadlinePredictor;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate().context("Invalid model artifact configuration")?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        embedder_dir = %config.embedder_dir.display(),
        classifier = %config.classifier_path.display(),
        "CheckMate starting"
    );

    // Blocking load: the server does not accept traffic until both models are ready.
    let predictor = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || HeadlinePredictor::load(&config))
            .await
            .context("Model loading task panicked")?
            .context("Failed to load models")?
    };

    let state = GatewayState::from_shared(Arc::new(predictor));
    let app = create_router_with_state(state, &config.allowed_origins);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, origins = ?config.allowed_origins, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("CheckMate shutdown complete");
    Ok(())
}

async fn run_health_check() -> i32 {
    // A configuration the server would refuse to start with is never healthy.
    let Ok(config) = Config::from_env() else {
        return 1;
    };
    let url = format!("http://{}/", config.local_connect_addr());

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    {
        Ok(client) => client,
        Err(_) => return 1,
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
