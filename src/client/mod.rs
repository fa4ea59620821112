//! Backend client.
//!
//! [`StrokeBackend`] is the seam between the interaction components and the
//! network: the components only see typed requests and typed results, and
//! [`HttpBackend`] is the JSON-over-HTTP implementation used in production.

pub mod error;
pub mod form;
pub mod types;

pub use error::{ClientError, ErrorKind};
pub use form::{FormError, PatientForm};
pub use types::{
    AlertRequest, ChatReply, ChatRequest, ErrorBody, PlanResponse, PlannerKind, PlannerRequest,
    PredictionRequest, PredictionResponse, ELEVATED_RISK_LABEL,
};

use crate::config::BackendConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const PREDICT_PATH: &str = "/predict_stroke";
pub const ALERT_PATH: &str = "/alert_system";
pub const CHAT_PATH: &str = "/chatbot";
pub const PLANNER_PATH: &str = "/planner";

/// Typed access to the backend's endpoints.
///
/// Object-safe; components hold it as `Arc<dyn StrokeBackend>`. No method
/// retries: every failure is returned to the caller as-is.
#[async_trait]
pub trait StrokeBackend: Send + Sync + 'static {
    /// `POST /predict_stroke`
    async fn predict(&self, request: &PredictionRequest)
        -> Result<PredictionResponse, ClientError>;

    /// `POST /alert_system`. The response body is ignored.
    async fn send_alert(&self, alert: &AlertRequest) -> Result<(), ClientError>;

    /// `POST /chatbot`
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError>;

    /// `POST /planner/{kind}`
    async fn plan(
        &self,
        kind: &PlannerKind,
        request: &PlannerRequest,
    ) -> Result<PlanResponse, ClientError>;
}

/// JSON-over-HTTP backend built on a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// Base URL without trailing slash
    base_url: String,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
    timeout: Duration,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Create a backend around an existing client (for testing).
    pub fn with_client(config: &BackendConfig, client: Arc<Client>) -> Self {
        Self {
            base_url: config.normalized_base_url().to_string(),
            client,
            timeout: config.timeout(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    /// POST `body` as JSON and return the raw response once the status is known
    /// to be successful.
    async fn post(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<reqwest::Response, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let start = Instant::now();

        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(&url)
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                let err = ClientError::from_reqwest(&e, self.timeout_ms());
                tracing::debug!(url = %url, error = %err, "Request did not complete");
                err
            })?;

        let status = response.status();
        tracing::debug!(
            url = %url,
            status = status.as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Backend responded"
        );

        if !status.is_success() {
            // Non-JSON error pages still count as an application error, just
            // without a server-supplied message.
            let message = match response.text().await {
                Ok(text) => serde_json::from_str::<ErrorBody>(&text)
                    .ok()
                    .and_then(|body| body.error),
                Err(_) => None,
            };
            return Err(ClientError::Application {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn post_json<R: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<R, ClientError> {
        let response = self.post(path, body).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(&e, self.timeout_ms()))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::InvalidResponse(format!("failed to parse {} response: {}", path, e))
        })
    }
}

#[async_trait]
impl StrokeBackend for HttpBackend {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, ClientError> {
        self.post_json(PREDICT_PATH, request).await
    }

    async fn send_alert(&self, alert: &AlertRequest) -> Result<(), ClientError> {
        self.post(ALERT_PATH, alert).await.map(|_| ())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        self.post_json(CHAT_PATH, request).await
    }

    async fn plan(
        &self,
        kind: &PlannerKind,
        request: &PlannerRequest,
    ) -> Result<PlanResponse, ClientError> {
        let path = format!("{}/{}", PLANNER_PATH, kind);
        self.post_json(&path, request).await
    }
}
