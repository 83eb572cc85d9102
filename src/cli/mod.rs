//! Command-line interface for termflow.
//!
//! Provides the one-shot ingestion run plus an extraction-only diagnostic
//! command.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::extract;
use crate::handlers::default_mediator;
use crate::ingest::{run_cycle, CycleOutcome, ShutdownFlag};

/// termflow - instrument term-sheet ingestion pipeline
#[derive(Parser, Debug)]
#[command(name = "termflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one ingestion cycle: extract, validate, fan out
    Run {
        /// Term-sheet XML file to ingest
        #[arg(short, long, env = "TERMFLOW_INPUT")]
        input: Option<PathBuf>,

        /// Where to write the partner B notification file
        #[arg(short, long, env = "TERMFLOW_OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Extract and print the term-sheet record as JSON (no fan-out)
    Extract {
        /// Term-sheet XML file to parse
        #[arg(short, long, env = "TERMFLOW_INPUT")]
        input: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Run { input, output } => {
                let config = Config::load()?.with_overrides(input, output);
                let mediator = default_mediator(config.output_path.clone());
                let shutdown = ShutdownFlag::new();

                match run_cycle(&config, &mediator, &shutdown).await {
                    CycleOutcome::Published { correlation_id } => {
                        println!("cycle published, correlation id {correlation_id}");
                        Ok(())
                    }
                    CycleOutcome::ExtractionFailed(e) => {
                        Err(anyhow!(e).context("ingestion cycle produced no event"))
                    }
                    CycleOutcome::Cancelled => {
                        println!("cycle cancelled before publish");
                        Ok(())
                    }
                }
            }

            Commands::Extract { input } => {
                let config = Config::load()?.with_overrides(input, None);
                let record = extract::extract_from_file(&config.input_path)?;
                println!("{}", serde_json::to_string_pretty(&record)?);
                Ok(())
            }
        }
    }
}
