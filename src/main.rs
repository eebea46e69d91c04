#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::needless_pass_by_value
)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::FmtSubscriber;

mod app;
mod cli;

use cli::commands::Cli;
use twin::config::TwinConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = TwinConfig::load_or_init()?;

    // Logs go to stderr so command output stays pipeable.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    app::dispatch::dispatch(cli, &config)
}
