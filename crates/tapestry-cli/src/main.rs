//! Tapestry command-line front end.
//!
//! # Usage
//!
//! ```bash
//! # Generate an Expo project from a saved document
//! tapestry generate screen.json --out ./app
//!
//! # Flutter, styles inlined into the screen file
//! tapestry generate screen.json --out ./app --target flutter --inline-styles
//!
//! # Build a document from a list of kinds
//! tapestry new screen.json --kinds header,text,button
//! ```

mod commands;
mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{CatalogArgs, GenerateArgs, NewArgs, TemplateArgs};
use crate::config::Config;

/// Tapestry - build mobile screens from component documents
#[derive(Parser, Debug)]
#[command(name = "tapestry", author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./tapestry.toml, then the user config dir)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a project from a document
    Generate(GenerateArgs),
    /// List available component kinds
    Catalog(CatalogArgs),
    /// Save, load and list document templates
    Template(TemplateArgs),
    /// Create a document from a list of component kinds
    New(NewArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (config, source) = Config::resolve(cli.config.as_deref()).context("Failed to load configuration")?;
    match &source {
        Some(path) => debug!(path = %path.display(), "Loaded configuration"),
        None => debug!("No configuration file found, using defaults"),
    }

    match cli.command {
        Command::Generate(args) => commands::generate::run(&args, &config),
        Command::Catalog(args) => commands::catalog::run(&args),
        Command::Template(args) => commands::template::run(&args, &config),
        Command::New(args) => commands::new::run(&args, &config),
    }
}
