//! Vitrine - a server-rendered portfolio and blog engine.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use vitrine::{
    check::check_content,
    cli::{Cli, Commands},
    config::SiteConfig,
    serve::serve_site,
};

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Serve { .. } => serve_site(config),
        Commands::Check => check_content(config),
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file is not an error: every field has a default, so
/// the site runs out of the box from a bare content directory.
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}
