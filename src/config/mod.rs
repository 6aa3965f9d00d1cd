//! Site configuration management for `vitrine.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                         |
//! |-------------|-------------------------------------------------|
//! | `[base]`    | Site metadata (title, description, author, url) |
//! | `[content]` | Content, asset, and build-output locations      |
//! | `[serve]`   | HTTP server (port, interface)                   |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Portfolio"
//! description = "A personal portfolio and blog"
//! url = "https://example.dev"
//!
//! [content]
//! dir = "content/blog"
//!
//! [serve]
//! port = 3000
//! ```

mod base;
mod content;
pub mod defaults;
mod error;
mod serve;

use base::BaseConfig;
use content::ContentConfig;
use error::ConfigError;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing vitrine.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Content and asset locations
    #[serde(default)]
    pub content: ContentConfig,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.content.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.content.root = Some(path.to_path_buf())
    }

    /// Directory of markdown posts (absolute after normalization)
    pub fn content_dir(&self) -> &Path {
        &self.content.dir
    }

    /// Public static assets directory
    pub fn public_dir(&self) -> &Path {
        &self.content.public
    }

    /// Client build output directory, mounted at `/dist`
    pub fn dist_dir(&self) -> &Path {
        &self.content.dist
    }

    /// Resume file served at `/resume.pdf`
    pub fn resume_path(&self) -> &Path {
        &self.content.resume
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        self.set_root(&root);
        self.update_path_with_root(&root);

        if let Commands::Serve { interface, port } = &cli.command {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());

            // Canonical links point at the local server when no public
            // url is configured
            if self.base.url.is_none() {
                self.base.url = Some(format!(
                    "http://{}:{}",
                    self.serve.interface, self.serve.port
                ));
            }
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let cli = self.cli.expect("update_with_cli sets cli first");

        // Apply CLI overrides first
        Self::update_option(&mut self.content.dir, cli.content.as_ref());

        // Normalize root to absolute path
        let root = Self::normalize_path(root);
        self.set_root(&root);

        // Normalize config path
        self.config_path = Self::normalize_path(&root.join(&cli.config));

        // Normalize all content paths
        self.content.dir = Self::normalize_path(&root.join(&self.content.dir));
        self.content.public = Self::normalize_path(&root.join(&self.content.public));
        self.content.dist = Self::normalize_path(&root.join(&self.content.dist));
        self.content.resume = Self::normalize_path(&root.join(&self.content.resume));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if self.serve.interface.parse::<std::net::IpAddr>().is_err() {
            bail!(ConfigError::Validation(
                "[serve.interface] must be a valid IP address".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
