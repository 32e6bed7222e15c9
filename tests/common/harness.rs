//! In-process server for integration tests.

use std::net::SocketAddr;

use checkmate::config::parse_origins;
use checkmate::constants::DEFAULT_ALLOWED_ORIGINS;
use checkmate::gateway::{GatewayState, create_router_with_state};
use checkmate::prediction::HeadlinePredictor;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub const TEST_EMBEDDING_DIM: usize = 32;

pub struct TestServerConfig {
    pub allowed_origins: Vec<String>,
    /// Defaults to a stub predictor of width [`TEST_EMBEDDING_DIM`].
    pub predictor: Option<HeadlinePredictor>,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
            predictor: None,
        }
    }
}

/// Running server; shuts down when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Serves the real router on `127.0.0.1:0` with a stub-embedder predictor.
///
/// The listener is bound before this returns, so connections made afterwards
/// are queued even if the serve task has not been polled yet.
pub async fn spawn_test_server(config: TestServerConfig) -> std::io::Result<TestServer> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;

    let predictor = config
        .predictor
        .unwrap_or_else(|| HeadlinePredictor::stub(TEST_EMBEDDING_DIM));
    let app = create_router_with_state(GatewayState::new(predictor), &config.allowed_origins);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    Ok(TestServer {
        addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
