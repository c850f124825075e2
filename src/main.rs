// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, load configuration, hand the
//   command to the UI layer.
// - Returns `anyhow::Result` so any error is printed and the exit code is 1.

use anyhow::Context;
use clap::Parser;
use pixela_cli::{cli::Cli, config, config::Config, ui};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise warnings only, or debug with --verbose.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    config::load_env_files(cli.env_file.as_deref())?;
    let cfg = Config::from_env()?;
    tracing::debug!(?cfg, "configuration loaded");

    let terms_accepted = cli.command.terms_accepted();
    let cmd = cli.command.into_command()?;
    ui::run(&cmd, &cfg, terms_accepted).with_context(|| format!("{} failed", cmd.name()))?;
    Ok(())
}
