use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::Gene,
    error::PredictionError,
    protocol::{Prediction, PREDICT_PATH},
};
use tracing::{debug, info, warn};

pub mod config;
pub mod controller;
pub mod input;
pub mod presenter;
pub mod session;
pub mod transport;

pub use config::{load_settings, load_settings_from, ClientSettings, SettingsError};
pub use controller::{AttemptId, Settlement, SubmissionController, SubmissionOutcome};
pub use input::{CandidateFile, FileSource, InputCollector};
pub use presenter::{ErrorNotice, Presentation, ResultView, SubmitButton};
pub use session::{PendingSubmission, PredictorSession};

/// `Ok(None)` is a success response that carried neither known field.
pub type PredictionResult = Result<Option<Prediction>, PredictionError>;

/// Validated inputs for one call to the prediction service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    pub gene: Gene,
    pub file: CandidateFile,
}

/// The only way the client reaches the prediction service.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, request: PredictionRequest) -> PredictionResult;
}

pub struct HttpPredictionClient {
    http: Client,
    endpoint: String,
}

impl HttpPredictionClient {
    /// `endpoint` is the service root, e.g. `http://localhost:8000`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(settings.endpoint.clone())
    }

    pub fn predict_url(&self) -> String {
        format!("{}{PREDICT_PATH}", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(&self, request: PredictionRequest) -> PredictionResult {
        let url = self.predict_url();
        let form = transport::build_form(&request).await?;
        debug!(url = url.as_str(), gene = %request.gene, file = request.file.name(), "posting prediction form");

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                warn!(url = url.as_str(), "prediction request failed: {err}");
                PredictionError::transport(err.to_string())
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| {
            warn!(url = url.as_str(), %status, "failed to read prediction response: {err}");
            PredictionError::transport(err.to_string())
        })?;
        info!(url = url.as_str(), %status, body_len = body.len(), "prediction response received");

        transport::interpret_response(status, &body)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
