use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use contract_cli::{AppConfig, FieldLoader, SubmitContractError, app};
use contract_submit::WebhookSubmitter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Dealership contract pricing calculator.
///
/// Replays captured form values, prints the financial summary, and
/// optionally submits the contract to the document webhook.
#[derive(Debug, Parser)]
struct Cli {
    /// CSV file of captured form values with a `field,value` header.
    #[arg(long)]
    fields: PathBuf,

    /// TOML config file with webhook, finance and form default settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Validate and submit the contract after calculating.
    #[arg(long)]
    submit: bool,

    /// Print the full submission record as JSON instead of the summary.
    #[arg(long)]
    json: bool,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    debug!("loading fields from {}", cli.fields.display());
    let file = File::open(&cli.fields)
        .with_context(|| format!("cannot open fields file '{}'", cli.fields.display()))?;
    let records = FieldLoader::parse(file)
        .with_context(|| format!("cannot parse fields file '{}'", cli.fields.display()))?;

    let calculator = app::build_calculator(&config, &records);

    if cli.json {
        println!("{}", calculator.export_for_submission().to_json_pretty()?);
    } else {
        print!("{}", app::render_totals(&calculator.formatted_totals()));
    }

    if !cli.submit {
        return Ok(ExitCode::SUCCESS);
    }

    let submitter = WebhookSubmitter::new(&config.webhook.url, config.webhook_timeout())
        .context("cannot build webhook client")?;

    match app::submit_contract(&calculator, &submitter).await {
        Ok(receipt) => {
            info!("submitted to {}: HTTP {}", submitter.url(), receipt.status);
            Ok(ExitCode::SUCCESS)
        }
        Err(SubmitContractError::Invalid(report)) => {
            for error in &report.errors {
                eprintln!("{error}");
            }
            Ok(ExitCode::FAILURE)
        }
        Err(SubmitContractError::Submit(err)) => Err(err).context("submission failed"),
    }
}
