use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::state::GatewayState;
use crate::prediction::Prediction;

/// Note returned by the liveness endpoint.
pub const ROOT_NOTE: &str = "CheckMate API running";

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub status: String,
    pub note: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictRequest {
    pub headline: String,
}

/// `GET /`. Answers as soon as the process serves requests.
#[instrument]
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        status: "ok".to_string(),
        note: ROOT_NOTE.to_string(),
    })
}

/// `POST /predict`.
///
/// Inference is CPU-bound, so it runs on the blocking pool.
#[instrument(skip(state, payload), fields(headline_len = tracing::field::Empty))]
pub async fn predict_handler(
    State(state): State<GatewayState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Prediction>, GatewayError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(status = %rejection.status(), "Rejected request body");
        GatewayError::UnprocessableBody(rejection.body_text())
    })?;
    tracing::Span::current().record("headline_len", request.headline.len());

    let predictor = state.predictor.clone();
    let prediction = tokio::task::spawn_blocking(move || predictor.predict(&request.headline))
        .await
        .map_err(|e| GatewayError::InternalError(format!("inference task failed: {}", e)))??;

    Ok(Json(prediction))
}
