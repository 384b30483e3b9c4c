//! Stateless projection of a session into what the front ends draw.

use std::fmt;

use shared::{error::ValidationError, protocol::Prediction};

use crate::controller::SubmissionOutcome;

pub const RESULT_HEADER: &str = "Predicted Diseases:";
pub const SUBMIT_LABEL: &str = "Predict Diseases";
pub const SUBMIT_PENDING_LABEL: &str = "Predicting...";

/// Content of the single error region. Whatever was set last replaces the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorNotice {
    Validation(ValidationError),
    /// Message of a failed prediction attempt.
    Prediction(String),
    /// A chosen file that could not be opened or described.
    UnreadableFile(String),
}

impl fmt::Display for ErrorNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorNotice::Validation(err) => write!(f, "{err}"),
            ErrorNotice::Prediction(message) => f.write_str(message),
            ErrorNotice::UnreadableFile(reason) => write!(f, "Could not read file: {reason}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultView<'a> {
    Hidden,
    DiseaseList {
        header: &'static str,
        items: &'a [String],
    },
    Message(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation<'a> {
    pub submit: SubmitButton,
    pub error: Option<String>,
    pub result: ResultView<'a>,
}

pub fn present<'a>(
    outcome: &'a SubmissionOutcome,
    pending: bool,
    error: Option<&ErrorNotice>,
) -> Presentation<'a> {
    let submit = SubmitButton {
        label: if pending {
            SUBMIT_PENDING_LABEL
        } else {
            SUBMIT_LABEL
        },
        enabled: !pending,
    };

    let result = match outcome {
        SubmissionOutcome::Succeeded(Prediction::Diseases(items)) => ResultView::DiseaseList {
            header: RESULT_HEADER,
            items,
        },
        SubmissionOutcome::Succeeded(Prediction::Message(message)) => ResultView::Message(message),
        SubmissionOutcome::Idle | SubmissionOutcome::Pending | SubmissionOutcome::Failed(_) => {
            ResultView::Hidden
        }
    };

    Presentation {
        submit,
        error: error.map(ToString::to_string),
        result,
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
