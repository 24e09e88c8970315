// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// `clap` and delegates to Layer 2 (application).
//
// Two commands are supported:
//   1. `encode` — encodes one partition into fixed-length records
//   2. `senses` — summarises the records of a previous run per sense
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EncodeArgs, SensesArgs};

#[derive(Parser, Debug)]
#[command(
    name = "supersense-encoder",
    version,
    about = "Encode annotated noun senses into target-aware records and batches for supersense classification."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Routes to the matching use case; never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Encode(args) => run_encode(args),
            Commands::Senses(args) => run_senses(args),
        }
    }
}

fn run_encode(args: EncodeArgs) -> Result<()> {
    use crate::application::encode_use_case::EncodeUseCase;

    tracing::info!("Encoding partition '{}' from '{}'", args.partition, args.data_dir);

    let output_dir = args.output_dir.clone();
    let stats      = EncodeUseCase::new(args.into()).execute()?;

    println!(
        "Encoded {} records ({} senses) into {} batches of the {} policy. Output in '{}'.",
        stats.records, stats.senses, stats.batches, stats.policy, output_dir
    );
    Ok(())
}

fn run_senses(args: SensesArgs) -> Result<()> {
    use crate::application::senses_use_case::{SensesUseCase, SENSES_FILE};

    let summaries = SensesUseCase::new(args.output_dir.clone()).execute()?;
    let without_definition = summaries.iter().filter(|s| !s.has_definition).count();

    println!(
        "{} senses ({} without a definition). Written to '{}/{}'.",
        summaries.len(),
        without_definition,
        args.output_dir,
        SENSES_FILE
    );
    Ok(())
}
