use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    config::load_config,
    err,
    modules::layout::{capture, compare},
};

use super::{report, Cli, CliRes};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct LayoutCli {
    #[command(subcommand)]
    command: Commands,
    /// Debug logging
    #[arg(short, long, global = true)]
    #[allow(dead_code)] // read by `cli::cli` before parsing
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Native aggregate layout images
    Layout {
        #[command(subcommand)]
        action: Action,
        /// Config file, instead of the one next to the binary
        #[arg(long, global = true)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Writes the images and a manifest as the new reference
    Capture {
        /// Defaults to `reference_dir` from the config
        dir: Option<PathBuf>,
    },
    /// Compares the images against a captured reference
    Compare {
        /// Defaults to `reference_dir` from the config
        dir: Option<PathBuf>,
    },
}

pub struct LayoutCmd;

impl Cli for LayoutCmd {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn cli(&self) -> CliRes {
        let cli = LayoutCli::parse();

        let Commands::Layout { action, config } = cli.command;

        let res = load_config(config.as_deref()).and_then(|config| {
            let (dir, is_capture) = match action {
                Action::Capture { dir } => (dir, true),
                Action::Compare { dir } => (dir, false),
            };

            let Some(dir) = dir.or(config.reference_dir) else {
                return err!("no directory given and no `reference_dir` in config");
            };

            if is_capture {
                capture(&dir)
            } else {
                compare(&dir)
            }
        });

        report(res)
    }
}
