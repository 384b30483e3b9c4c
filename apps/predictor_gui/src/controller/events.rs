//! Events delivered from the backend worker to the UI thread.

use client_core::{AttemptId, PredictionResult};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    /// The worker could not start; every later command will be refused.
    BackendUnavailable(String),
    PredictionSettled {
        attempt: AttemptId,
        result: PredictionResult,
    },
}
