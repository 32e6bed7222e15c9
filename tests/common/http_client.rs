//! HTTP client helpers for tests.

use std::time::Duration;

use checkmate::gateway::{ErrorResponse, RootResponse};
use checkmate::prediction::Prediction;
use serde_json::json;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error {status}: {}", .body.detail)]
    Api { status: u16, body: ErrorResponse },
    #[error("unexpected status {0}: {1}")]
    UnexpectedStatus(u16, String),
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    pub fn raw(&self) -> &reqwest::Client {
        &self.client
    }

    pub async fn root(&self) -> Result<RootResponse, TestClientError> {
        let resp = self.client.get(self.url("/")).send().await?;
        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            Err(TestClientError::UnexpectedStatus(
                status,
                resp.text().await.unwrap_or_default(),
            ))
        }
    }

    pub async fn predict(&self, headline: &str) -> Result<Prediction, TestClientError> {
        let resp = self
            .client
            .post(self.url("/predict"))
            .json(&json!({ "headline": headline }))
            .send()
            .await?;

        let status = resp.status().as_u16();
        match status {
            200 => Ok(resp.json().await?),
            400 | 422 | 500 => Err(TestClientError::Api {
                status,
                body: resp.json().await?,
            }),
            _ => Err(TestClientError::UnexpectedStatus(
                status,
                resp.text().await.unwrap_or_default(),
            )),
        }
    }
}
