//! HTTP gateway (Axum) in front of the headline predictor.
//!
//! Used by the `checkmate` server binary and the integration tests.

#![allow(missing_docs)]

pub mod cors;
pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use cors::{cors_layer, origin_allowed};
pub use error::{ErrorResponse, GatewayError};
pub use handler::{PredictRequest, RootResponse, predict_handler, root_handler};
pub use state::GatewayState;

pub fn create_router_with_state(state: GatewayState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/predict", post(predict_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}
