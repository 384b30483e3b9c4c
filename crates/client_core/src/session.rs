//! The session context owned by the top-level view.

use shared::{domain::Gene, error::ValidationError};
use tracing::{info, warn};

use crate::{
    controller::{AttemptId, Settlement, SubmissionController, SubmissionOutcome},
    input::{CandidateFile, InputCollector},
    presenter::{present, ErrorNotice, Presentation},
    PredictionRequest, PredictionResult, PredictionService,
};

/// A submission that passed validation and is waiting for its network call.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub attempt: AttemptId,
    pub request: PredictionRequest,
}

#[derive(Debug, Default)]
pub struct PredictorSession {
    input: InputCollector,
    controller: SubmissionController,
    error: Option<ErrorNotice>,
}

impl PredictorSession {
    pub fn new(gene: Option<Gene>) -> Self {
        Self {
            input: InputCollector::new(gene),
            controller: SubmissionController::default(),
            error: None,
        }
    }

    pub fn gene(&self) -> Option<Gene> {
        self.input.gene()
    }

    pub fn file(&self) -> Option<&CandidateFile> {
        self.input.file()
    }

    pub fn describe_file(&self) -> Option<(&str, String)> {
        self.input.describe_file()
    }

    pub fn outcome(&self) -> &SubmissionOutcome {
        self.controller.outcome()
    }

    pub fn is_pending(&self) -> bool {
        self.controller.is_pending()
    }

    pub fn error(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    pub fn validation_error(&self) -> Option<ValidationError> {
        match self.error {
            Some(ErrorNotice::Validation(err)) => Some(err),
            _ => None,
        }
    }

    pub fn select_gene(&mut self, gene: Gene) {
        self.input.select_gene(gene);
    }

    /// Single entry point for picker, drag-and-drop and command-line files.
    pub fn select_file(&mut self, file: CandidateFile) -> Result<(), ValidationError> {
        self.error = None;
        let name = file.name().to_string();
        match self.input.select_file(file) {
            Ok(()) => {
                self.controller.clear();
                info!(file = name.as_str(), "candidate file selected");
                Ok(())
            }
            Err(err) => {
                self.error = Some(ErrorNotice::Validation(err));
                Err(err)
            }
        }
    }

    /// Shows a file that could not be opened in the error region. The current
    /// candidate file, if any, is kept.
    pub fn report_unreadable_file(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(reason = reason.as_str(), "chosen file could not be read");
        self.error = Some(ErrorNotice::UnreadableFile(reason));
    }

    /// Clears the file and the outcome. A pending validation message stays.
    pub fn remove_file(&mut self) {
        if let Some(file) = self.input.remove_file() {
            info!(file = file.name(), "candidate file removed");
        }
        self.controller.clear();
        if matches!(self.error, Some(ErrorNotice::Prediction(_))) {
            self.error = None;
        }
    }

    /// Checks the preconditions and, when they hold, moves the session to pending
    /// and hands back the request to send.
    pub fn begin_submission(&mut self) -> Result<PendingSubmission, ValidationError> {
        let Some(gene) = self.input.gene() else {
            return Err(self.reject(ValidationError::MissingGene));
        };
        let Some(file) = self.input.file().cloned() else {
            return Err(self.reject(ValidationError::MissingFile));
        };

        self.error = None;
        let attempt = self.controller.begin();
        info!(
            %attempt,
            %gene,
            file = file.name(),
            size_bytes = file.size_bytes(),
            "submitting prediction request"
        );
        Ok(PendingSubmission {
            attempt,
            request: PredictionRequest { gene, file },
        })
    }

    pub fn settle(&mut self, attempt: AttemptId, result: PredictionResult) -> Settlement {
        let settlement = self.controller.settle(attempt, result);
        if settlement == Settlement::Applied {
            let outcome = self.controller.outcome();
            info!(%attempt, outcome = outcome_label(outcome), "prediction settled");
            if let SubmissionOutcome::Failed(message) = outcome {
                self.error = Some(ErrorNotice::Prediction(message.clone()));
            }
        }
        settlement
    }

    /// Runs one full submission against `service` and returns the settled outcome.
    pub async fn submit(
        &mut self,
        service: &dyn PredictionService,
    ) -> Result<&SubmissionOutcome, ValidationError> {
        let pending = self.begin_submission()?;
        let result = service.predict(pending.request).await;
        self.settle(pending.attempt, result);
        Ok(self.controller.outcome())
    }

    pub fn presentation(&self) -> Presentation<'_> {
        present(
            self.controller.outcome(),
            self.controller.is_pending(),
            self.error.as_ref(),
        )
    }

    fn reject(&mut self, err: ValidationError) -> ValidationError {
        info!(%err, "submission blocked by local validation");
        self.error = Some(ErrorNotice::Validation(err));
        err
    }
}

fn outcome_label(outcome: &SubmissionOutcome) -> &'static str {
    match outcome {
        SubmissionOutcome::Idle => "unset",
        SubmissionOutcome::Pending => "pending",
        SubmissionOutcome::Succeeded(_) => "succeeded",
        SubmissionOutcome::Failed(_) => "failed",
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
