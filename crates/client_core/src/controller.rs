//! Submission lifecycle: one outcome per session, settled by the latest attempt only.

use std::fmt;

use shared::{error::PredictionError, protocol::Prediction};
use tracing::{debug, warn};

use crate::PredictionResult;

/// Monotonically increasing tag for each submission attempt within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(pub u64);

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionOutcome {
    #[default]
    Idle,
    Pending,
    Succeeded(Prediction),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    /// The resolution belonged to an attempt that is no longer in flight.
    Stale,
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    outcome: SubmissionOutcome,
    in_flight: Option<AttemptId>,
    issued: u64,
}

impl SubmissionController {
    pub fn outcome(&self) -> &SubmissionOutcome {
        &self.outcome
    }

    /// True from [`begin`](Self::begin) until the matching [`settle`](Self::settle),
    /// even if the outcome was cleared in between.
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<AttemptId> {
        self.in_flight
    }

    /// Drops the current outcome. An in-flight attempt stays in flight.
    pub fn clear(&mut self) {
        self.outcome = SubmissionOutcome::Idle;
    }

    pub fn begin(&mut self) -> AttemptId {
        self.issued += 1;
        let attempt = AttemptId(self.issued);
        if let Some(previous) = self.in_flight.replace(attempt) {
            debug!(%previous, %attempt, "superseding in-flight prediction attempt");
        }
        self.outcome = SubmissionOutcome::Pending;
        attempt
    }

    pub fn settle(&mut self, attempt: AttemptId, result: PredictionResult) -> Settlement {
        if self.in_flight != Some(attempt) {
            debug!(%attempt, latest = self.issued, "discarding stale prediction resolution");
            return Settlement::Stale;
        }
        self.in_flight = None;

        self.outcome = match result {
            Ok(Some(prediction)) => SubmissionOutcome::Succeeded(prediction),
            Ok(None) => {
                warn!(
                    %attempt,
                    "prediction succeeded without predicted_diseases or message; leaving outcome unset"
                );
                SubmissionOutcome::Idle
            }
            Err(err) => {
                if let PredictionError::Transport { cause } = &err {
                    warn!(%attempt, cause = cause.as_str(), "prediction transport failure");
                } else {
                    warn!(%attempt, error = %err, "prediction service reported failure");
                }
                SubmissionOutcome::Failed(err.to_string())
            }
        };
        Settlement::Applied
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
