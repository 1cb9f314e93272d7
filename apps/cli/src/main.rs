use anyhow::Context;
use chairside::kernel::config::load_client_config;
use chairside_cli::{Cli, init_logger, run};
use clap::Parser;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = load_client_config(cli.config.as_deref()).context("Loading configuration")?;
    let _logger = init_logger(cli.log_level.as_deref(), &config).context("Starting logger")?;

    run(&cli.command, &mut std::io::stdout().lock())
}
