//! trial-agents: CLI for the legal multi-agent courtroom simulator.
//!
//! # Usage
//!
//! ```bash
//! # Upload a case document and note the printed case id
//! trial-agents upload judgment.pdf
//!
//! # Extract facts, issues, and holding
//! trial-agents process <case-id>
//!
//! # Baseline prediction, debate simulation, bias audit
//! trial-agents predict <case-id>
//! trial-agents simulate <case-id> --rounds 2
//! trial-agents audit <case-id>
//!
//! # Inspect the stored record
//! trial-agents show <case-id>
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use courtroom::FsCaseStore;
use trial_agents::{CasePipeline, TrialConfig};

/// Legal multi-agent courtroom simulator.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding one JSON file per case (overrides CASES_DIR)
    #[arg(long)]
    cases_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a PDF or text document and create a case
    Upload {
        /// Path to the document
        file: PathBuf,
    },
    /// Extract facts, issues, and holding for a case
    Process { case_id: String },
    /// Run the keyword baseline classifier
    Predict { case_id: String },
    /// Run the courtroom debate and deliver a verdict
    Simulate {
        case_id: String,
        /// Argument rounds (overrides DEBATE_ROUNDS)
        #[arg(long)]
        rounds: Option<u32>,
    },
    /// Audit the delivered verdict for bias
    Audit { case_id: String },
    /// Print the full case record
    Show { case_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = TrialConfig::from_env();
    let cases_dir = cli.cases_dir.unwrap_or_else(|| config.cases_dir.clone());

    let store = FsCaseStore::new(&cases_dir)?;
    let pipeline = CasePipeline::new(store, Arc::new(config.client()));
    info!(model = %config.model, cases_dir = %cases_dir.display(), "courtroom simulator starting");

    match cli.command {
        Command::Upload { file } => {
            let filename = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let bytes = std::fs::read(&file)?;
            let record = pipeline.upload(&filename, &bytes)?;
            println!("{}", record.case_id);
        }
        Command::Process { case_id } => {
            let record = pipeline.process(&case_id).await?;
            print_json(&record.details)?;
        }
        Command::Predict { case_id } => {
            let record = pipeline.predict(&case_id)?;
            print_json(&record.baseline_prediction)?;
        }
        Command::Simulate { case_id, rounds } => {
            let rounds = rounds.unwrap_or(config.rounds);
            let record = pipeline.simulate(&case_id, rounds).await?;
            if let Some(simulation) = &record.simulation {
                info!("{}", simulation.summary_line());
            }
            print_json(&record.simulation)?;
        }
        Command::Audit { case_id } => {
            let record = pipeline.audit(&case_id).await?;
            print_json(&record.audit)?;
        }
        Command::Show { case_id } => {
            let record = pipeline.show(&case_id)?;
            print_json(&record)?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
