use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{
    config::{load_settings_from, normalize_endpoint, SETTINGS_FILE},
    ClientSettings, HttpPredictionClient, PredictorSession,
};
use crossbeam_channel::bounded;
use eframe::egui;
use shared::domain::Gene;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::PredictorApp;

#[derive(Parser, Debug)]
#[command(author, version, about = "Disease Predictor desktop client")]
struct Args {
    /// Prediction service root URL, overrides settings and environment
    #[arg(long)]
    endpoint: Option<String>,
    /// Gene selected when the window opens
    #[arg(long)]
    gene: Option<Gene>,
    #[arg(long, default_value = SETTINGS_FILE)]
    config: PathBuf,
}

fn resolve_settings(args: &Args) -> anyhow::Result<ClientSettings> {
    let mut settings = load_settings_from(&args.config, |name| std::env::var(name).ok())
        .with_context(|| format!("failed to load settings from '{}'", args.config.display()))?;
    if let Some(endpoint) = &args.endpoint {
        settings.endpoint = normalize_endpoint(endpoint)?;
    }
    if let Some(gene) = args.gene {
        settings.default_gene = gene;
    }
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();
    let settings = resolve_settings(&args)?;
    tracing::info!(
        endpoint = settings.endpoint.as_str(),
        gene = %settings.default_gene,
        "starting predictor window"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let service = Arc::new(HttpPredictionClient::from_settings(&settings));
    backend_bridge::runtime::launch(service, cmd_rx, ui_tx);

    let session = PredictorSession::new(Some(settings.default_gene));
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Disease Predictor")
            .with_inner_size([560.0, 640.0])
            .with_min_inner_size([420.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Disease Predictor",
        options,
        Box::new(|_cc| Ok(Box::new(PredictorApp::new(session, cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow!("predictor window failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::{resolve_settings, Args};
    use clap::Parser;
    use shared::domain::Gene;

    #[test]
    fn flags_override_settings_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("predictor.toml");
        std::fs::write(&path, "endpoint = \"http://file-host:8000\"\n").expect("write");

        let args = Args::try_parse_from([
            "predictor_gui",
            "--config",
            path.to_str().expect("utf-8 path"),
            "--endpoint",
            "http://flag-host:9000/",
            "--gene",
            "TP53",
        ])
        .expect("parse");
        let settings = resolve_settings(&args).expect("settings");
        assert_eq!(settings.endpoint, "http://flag-host:9000");
        assert_eq!(settings.default_gene, Gene::Tp53);
    }

    #[test]
    fn invalid_endpoint_flag_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = Args::try_parse_from([
            "predictor_gui",
            "--config",
            dir.path().join("absent.toml").to_str().expect("utf-8 path"),
            "--endpoint",
            "ftp://nowhere",
        ])
        .expect("parse");
        assert!(resolve_settings(&args).is_err());
    }
}
