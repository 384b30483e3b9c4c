//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{AttemptId, PendingSubmission, PredictorSession, Settlement};
use crossbeam_channel::{Sender, TrySendError};
use shared::error::{PredictionError, ValidationError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Queues `cmd` without blocking the UI. On failure the reason is written to
/// `status` and returned.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> Result<(), &'static str> {
    let cmd_name = cmd.name();
    let reason = match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            return Ok(());
        }
        Err(TrySendError::Full(_)) => "UI command queue is full; please retry",
        Err(TrySendError::Disconnected(_)) => {
            "Backend command processor disconnected (possible startup/runtime failure)"
        }
    };
    tracing::warn!(command = cmd_name, "{reason}");
    *status = reason.to_string();
    Err(reason)
}

/// Starts a submission and hands it to the backend. A command that cannot be
/// queued settles the attempt as a connection failure so the trigger re-enables.
pub fn submit_prediction(
    session: &mut PredictorSession,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) -> Result<AttemptId, ValidationError> {
    let PendingSubmission { attempt, request } = session.begin_submission()?;
    if let Err(reason) =
        dispatch_backend_command(cmd_tx, BackendCommand::Predict { attempt, request }, status)
    {
        session.settle(attempt, Err(PredictionError::transport(reason)));
    }
    Ok(attempt)
}

pub fn apply_ui_event(session: &mut PredictorSession, status: &mut String, event: UiEvent) {
    match event {
        UiEvent::Info(message) => *status = message,
        UiEvent::BackendUnavailable(message) => {
            tracing::error!("{message}");
            *status = message;
        }
        UiEvent::PredictionSettled { attempt, result } => {
            if session.settle(attempt, result) == Settlement::Stale {
                tracing::debug!(%attempt, "ignored stale prediction result");
            }
        }
    }
}
