mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use pagewise::{Config, RealEnv};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

const LOG_VAR: &str = "PAGEWISE_LOG";

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var(LOG_VAR) {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = Config::from_env(&RealEnv)?;
    let client = commands::connect(config, cli.fixture.as_deref())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(cli.command, &client, &mut out)
}
