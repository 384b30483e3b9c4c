//! Backend worker: owns the tokio runtime and runs predictions off the UI thread.

use std::{sync::Arc, thread};

use client_core::PredictionService;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(
    service: Arc<dyn PredictionService>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Ready".to_string()));

            let mut tasks = Vec::new();
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend received command");
                match cmd {
                    BackendCommand::Predict { attempt, request } => {
                        let service = Arc::clone(&service);
                        let ui_tx = ui_tx.clone();
                        tasks.push(tokio::spawn(async move {
                            let result = service.predict(request).await;
                            if ui_tx
                                .send(UiEvent::PredictionSettled { attempt, result })
                                .is_err()
                            {
                                tracing::debug!(%attempt, "ui closed before prediction settled");
                            }
                        }));
                    }
                }
                tasks.retain(|task| !task.is_finished());
            }

            // Let in-flight predictions report before the runtime is dropped.
            for task in tasks {
                let _ = task.await;
            }
            tracing::info!("backend command channel closed; worker exiting");
        });
    })
}

#[cfg(test)]
mod tests {
    use super::launch;

    use std::{sync::Arc, time::Duration};

    use async_trait::async_trait;
    use client_core::{
        AttemptId, CandidateFile, PredictionRequest, PredictionResult, PredictionService,
    };
    use crossbeam_channel::bounded;
    use shared::{domain::Gene, protocol::Prediction};

    use crate::backend_bridge::commands::BackendCommand;
    use crate::controller::events::UiEvent;

    struct EchoGene;

    #[async_trait]
    impl PredictionService for EchoGene {
        async fn predict(&self, request: PredictionRequest) -> PredictionResult {
            Ok(Some(Prediction::Message(format!(
                "{} via {}",
                request.gene,
                request.file.name()
            ))))
        }
    }

    #[test]
    fn predict_command_settles_with_matching_attempt() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let worker = launch(Arc::new(EchoGene), cmd_rx, ui_tx);

        cmd_tx
            .send(BackendCommand::Predict {
                attempt: AttemptId(7),
                request: PredictionRequest {
                    gene: Gene::Tp53,
                    file: CandidateFile::from_bytes("p.fa", b">p\nACGT\n".to_vec()),
                },
            })
            .expect("queue command");

        let mut settled = None;
        while settled.is_none() {
            match ui_rx.recv_timeout(Duration::from_secs(5)).expect("ui event") {
                UiEvent::PredictionSettled { attempt, result } => settled = Some((attempt, result)),
                UiEvent::Info(_) => {}
                UiEvent::BackendUnavailable(reason) => panic!("backend failed: {reason}"),
            }
        }
        assert_eq!(
            settled,
            Some((
                AttemptId(7),
                Ok(Some(Prediction::Message("TP53 via p.fa".into())))
            ))
        );

        drop(cmd_tx);
        worker.join().expect("worker exits once commands close");
    }
}
