//! Loomic CLI
//!
//! Inspect palettes, derive token sets, and drive theme selection against a
//! file-backed store.

mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{resolve_mode, App};
use crate::config::LoomicConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(cli.log_level().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = LoomicConfig::load(cli.config.as_deref())?;
    let app = App::new(config)?;
    tracing::debug!(
        "storage at {}",
        app.config().storage.path.display()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Themes => app.themes(&mut out)?,
        Commands::Config => write!(out, "{}", app.config().to_toml()?)?,
        Commands::Tokens {
            theme,
            mode,
            variant,
            format,
            legacy,
        } => app.tokens(
            &mut out,
            theme.as_deref(),
            resolve_mode(mode),
            variant.into(),
            format,
            legacy,
        )?,
        Commands::Select { theme, mode } => app.select(&mut out, &theme, resolve_mode(mode))?,
        Commands::Current { mode } => app.current(&mut out, resolve_mode(mode))?,
        Commands::Watch { mode } => app.watch(&mut out, resolve_mode(mode))?,
        Commands::PreviewUrl {
            component,
            theme,
            mode,
        } => writeln!(
            out,
            "{}",
            app.preview_url(component.as_deref(), theme.as_deref(), mode)
        )?,
    }

    out.flush()?;
    Ok(())
}
