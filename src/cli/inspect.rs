use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{config::load_config, modules::inspect::Inspect, utils::parse_offset};

use super::{report, Cli, CliRes};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct InspectCli {
    // already in the command, clap still wants it spelled out
    #[command(subcommand)]
    command: Commands,
    /// Debug logging
    #[arg(short, long, global = true)]
    #[allow(dead_code)] // read by `cli::cli` before parsing
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Prints every element of a pack blob
    Inspect {
        /// Path to the blob
        blob: PathBuf,
        /// Also decodes a particle config at this offset, decimal or 0x hex
        #[arg(long, value_parser = parse_offset)]
        particle_config: Vec<u32>,
        /// Skips validation even if the config asks for it
        #[arg(long)]
        no_validate: bool,
        /// Config file, instead of the one next to the binary
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub struct InspectCmd;

impl Cli for InspectCmd {
    fn name(&self) -> &'static str {
        "inspect"
    }

    fn cli(&self) -> CliRes {
        let cli = InspectCli::parse();

        let Commands::Inspect {
            blob,
            particle_config,
            no_validate,
            config,
        } = cli.command;

        let res = load_config(config.as_deref()).and_then(|config| {
            let mut inspect = Inspect::new();

            inspect
                .pack_file(blob)
                .validate(config.validate_on_inspect && !no_validate);

            particle_config.into_iter().for_each(|offset| {
                inspect.particle_config(offset);
            });

            let text = inspect.run()?;
            print!("{text}");

            Ok(())
        });

        report(res)
    }
}
