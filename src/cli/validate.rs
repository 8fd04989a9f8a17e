use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::modules::inspect::Inspect;

use super::{report, Cli, CliRes};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct ValidateCli {
    #[command(subcommand)]
    command: Commands,
    /// Debug logging
    #[arg(short, long, global = true)]
    #[allow(dead_code)] // read by `cli::cli` before parsing
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Checks every offset, count and cross reference in a pack blob
    Validate {
        /// Path to the blob
        blob: PathBuf,
    },
}

pub struct ValidateCmd;

impl Cli for ValidateCmd {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn cli(&self) -> CliRes {
        let cli = ValidateCli::parse();

        let Commands::Validate { blob } = cli.command;

        let mut inspect = Inspect::new();
        inspect.pack_file(blob);

        report(inspect.check())
    }
}
