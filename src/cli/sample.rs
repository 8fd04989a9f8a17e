use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::modules::sample::write_sample;

use super::{report, Cli, CliRes};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct SampleCli {
    #[command(subcommand)]
    command: Commands,
    /// Debug logging
    #[arg(short, long, global = true)]
    #[allow(dead_code)] // read by `cli::cli` before parsing
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Writes a small pack using every element kind plus one particle config
    Sample {
        /// Output path
        out: PathBuf,
    },
}

pub struct SampleCmd;

impl Cli for SampleCmd {
    fn name(&self) -> &'static str {
        "sample"
    }

    fn cli(&self) -> CliRes {
        let cli = SampleCli::parse();

        let Commands::Sample { out } = cli.command;

        report(write_sample(out.as_path()))
    }
}
