//! tola-content - inspect the resources of a static content site.

mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use tola_content::config::{SiteConfig, find_config_file};
use tola_content::site::Site;
use tola_content::{debug, logger};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = load_config(&cli)?;
    debug!("config"; "loaded {}", config.config_path.display());
    let site = Site::load(config).context("failed to load site")?;

    match &cli.command {
        Commands::Query { args } => cli::query::run_query(args, &site),
    }
}

fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let start = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let path: PathBuf = find_config_file(&start, &cli.config).ok_or_else(|| {
        anyhow!(
            "{} not found in {} or any parent directory",
            cli.config.display(),
            start.display()
        )
    })?;
    SiteConfig::from_path(&path).with_context(|| format!("failed to load {}", path.display()))
}
