//! plaudit - render and preview embeddable review widgets.
//!
//! `plaudit render` runs the widget runtime against an in-memory page and
//! writes the result as HTML. `plaudit preview` shows a widget as a
//! carousel in the terminal.

mod cli;
mod commands;
mod document;

use clap::Parser;
use plaudit_config::RuntimeConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, ConfigCommands, LOG_ENV};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the page on stdout or the
    // preview's alternate screen.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => RuntimeConfig::load_from(path)?,
        None => RuntimeConfig::load()?,
    };

    match cli.command {
        Commands::Render {
            widget,
            width,
            output,
            open,
        } => commands::render(&config, &widget, width, output.as_deref(), open).await,
        Commands::Preview { widget } => commands::preview(&config, &widget).await,
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::show_config(&config),
            ConfigCommands::Init { force } => commands::init_config(force),
        },
    }
}
