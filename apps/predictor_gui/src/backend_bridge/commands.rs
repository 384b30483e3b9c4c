//! Backend commands queued from UI to backend worker.

use client_core::{AttemptId, PredictionRequest};

#[derive(Debug)]
pub enum BackendCommand {
    Predict {
        attempt: AttemptId,
        request: PredictionRequest,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Predict { .. } => "predict",
        }
    }
}
