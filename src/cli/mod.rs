use env_logger::Env;

use self::{inspect::InspectCmd, layout::LayoutCmd, sample::SampleCmd, validate::ValidateCmd};

mod inspect;
mod layout;
mod sample;
mod validate;

pub enum CliRes {
    Ok,
    Err,
}

pub trait Cli {
    fn name(&self) -> &'static str;
    /// `args[1]` is the name of the command. Each command parses the rest itself.
    fn cli(&self) -> CliRes;
}

pub fn cli() -> CliRes {
    let modules: &[&dyn Cli] = &[&InspectCmd, &ValidateCmd, &SampleCmd, &LayoutCmd];

    let args: Vec<String> = std::env::args().collect();

    // logging starts before clap sees the command, RUST_LOG still overrides
    let verbose = args.iter().any(|arg| arg == "-v" || arg == "--verbose");
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let help = || {
        println!(
            "\
packtool

Available commands:"
        );
        for module in modules {
            println!("{}", module.name());
        }
    };

    if args.len() < 2 {
        help();
        return CliRes::Err;
    }

    for module in modules {
        if args[1] == module.name() {
            return module.cli();
        }
    }

    help();

    CliRes::Err
}

/// Prints the error chain and turns it into the exit status.
fn report<T>(res: eyre::Result<T>) -> CliRes {
    match res {
        Ok(_) => CliRes::Ok,
        Err(err) => {
            log::error!("{err:#}");
            CliRes::Err
        }
    }
}
