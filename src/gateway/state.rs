use std::sync::Arc;

use crate::prediction::HeadlinePredictor;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct GatewayState {
    pub predictor: Arc<HeadlinePredictor>,
}

impl GatewayState {
    pub fn new(predictor: HeadlinePredictor) -> Self {
        Self {
            predictor: Arc::new(predictor),
        }
    }

    pub fn from_shared(predictor: Arc<HeadlinePredictor>) -> Self {
        Self { predictor }
    }
}
