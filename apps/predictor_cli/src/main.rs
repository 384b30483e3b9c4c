use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    config::{load_settings_from, normalize_endpoint, SETTINGS_FILE},
    CandidateFile, HttpPredictionClient, Presentation, PredictionService, PredictorSession,
    ResultView, SubmissionOutcome,
};
use serde_json::{json, Value};
use shared::{domain::Gene, protocol::Prediction};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Predict possible diseases from a patient FASTA file")]
struct Args {
    /// Patient sequence file (.fasta or .fa, at most 200MB)
    fasta_file: PathBuf,
    /// Gene to predict against: PTEN, BRCA1 or TP53 (defaults to the configured gene)
    #[arg(long)]
    gene: Option<Gene>,
    /// Prediction service root URL, overrides settings and environment
    #[arg(long)]
    endpoint: Option<String>,
    /// Settings file with `endpoint` and `default_gene` keys
    #[arg(long, default_value = SETTINGS_FILE)]
    config: PathBuf,
    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

/// What one run prints, and the error that makes the process exit non-zero.
#[derive(Debug)]
struct Report {
    output: Vec<String>,
    failure: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings_from(&args.config, |name| std::env::var(name).ok())
        .with_context(|| format!("failed to load settings from '{}'", args.config.display()))?;
    if let Some(endpoint) = &args.endpoint {
        settings.endpoint = normalize_endpoint(endpoint)?;
    }
    let gene = args.gene.unwrap_or(settings.default_gene);
    tracing::info!(endpoint = settings.endpoint.as_str(), %gene, "using prediction service");

    let client = HttpPredictionClient::from_settings(&settings);
    let report = predict_file(&args.fasta_file, gene, args.json, &client).await?;
    for line in &report.output {
        println!("{line}");
    }
    if let Some(failure) = report.failure {
        bail!(failure);
    }
    Ok(())
}

/// Runs one submission for `path`. Only an unreadable path is an `Err`;
/// rejected files and failed predictions end up in [`Report::failure`].
async fn predict_file(
    path: &Path,
    gene: Gene,
    json_output: bool,
    service: &dyn PredictionService,
) -> Result<Report> {
    let mut session = PredictorSession::new(Some(gene));
    let file = CandidateFile::from_path(path)
        .with_context(|| format!("cannot open '{}'", path.display()))?;

    if session.select_file(file).is_ok() {
        if let Some((name, size)) = session.describe_file() {
            tracing::info!(file = name, size = size.as_str(), "uploading");
        }
        // The session records a validation failure itself.
        let _ = session.submit(service).await;
    }

    let presentation = session.presentation();
    let failure = presentation.error.clone();
    let output = if json_output {
        vec![serde_json::to_string_pretty(&outcome_json(
            gene,
            session.outcome(),
            failure.as_deref(),
        ))?]
    } else {
        render_lines(&presentation)
    };
    Ok(Report { output, failure })
}

fn render_lines(presentation: &Presentation<'_>) -> Vec<String> {
    match presentation.result {
        ResultView::DiseaseList { header, items } => std::iter::once(header.to_string())
            .chain(items.iter().map(|disease| format!("  - {disease}")))
            .collect(),
        ResultView::Message(message) => vec![message.to_string()],
        ResultView::Hidden => Vec::new(),
    }
}

fn outcome_json(gene: Gene, outcome: &SubmissionOutcome, error: Option<&str>) -> Value {
    if let Some(error) = error {
        return json!({ "gene": gene, "error": error });
    }
    match outcome {
        SubmissionOutcome::Succeeded(Prediction::Diseases(diseases)) => {
            json!({ "gene": gene, "predicted_diseases": diseases })
        }
        SubmissionOutcome::Succeeded(Prediction::Message(message)) => {
            json!({ "gene": gene, "message": message })
        }
        _ => json!({ "gene": gene }),
    }
}
