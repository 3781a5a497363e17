use std::process::ExitCode;

use clap::Parser;
use csv_slice::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli::run(&cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("failed: {e:?}");
            eprintln!("Error: {e:#}");
            ExitCode::from(cli::EXIT_FAILURE)
        }
    }
}
