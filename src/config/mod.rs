//! Blog configuration management for `quire.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[blog]`    | Blog metadata, page size, comment window       |
//! | `[store]`   | Public root, posts directory, storage backend  |
//! | `[assets]`  | Upload directory and name collision policy     |
//! | `[slug]`    | Slug generation                                |
//!
//! # Example
//!
//! ```toml
//! [blog]
//! title = "My Blog"
//! author = "Alice"
//!
//! [store]
//! public = "wwwroot"
//! posts = "posts"
//! format = "xml"
//!
//! [assets]
//! dir = "posts/files"
//! naming = "reject"
//!
//! [slug]
//! max_length = 50
//! ```

mod assets;
pub mod defaults;
mod error;
mod meta;
mod slug;
mod store;

pub use assets::{AssetsConfig, NamingPolicy};
pub use error::ConfigError;
pub use meta::MetaConfig;
pub use slug::SlugConfig;
pub use store::{StorageFormat, StoreConfig};

use crate::cli::Cli;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing quire.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BlogConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root every relative path resolves against
    #[serde(skip)]
    #[educe(Default = PathBuf::from("./"))]
    pub root: PathBuf,

    #[serde(default)]
    pub blog: MetaConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub slug: SlugConfig,
}

impl BlogConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: BlogConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load `cli.config` under `cli.root`, or defaults when the file is absent
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli.root.clone().unwrap_or_else(|| self.root.clone());
        let root = Self::normalize_path(&root);

        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.store.public = Self::normalize_path(&root.join(expand_tilde(&self.store.public)));
        self.root = root;
    }

    /// Directory holding the post documents
    pub fn posts_dir(&self) -> PathBuf {
        self.public_dir().join(&self.store.posts)
    }

    /// Directory uploads are written to
    pub fn assets_dir(&self) -> PathBuf {
        self.public_dir().join(&self.assets.dir)
    }

    fn public_dir(&self) -> PathBuf {
        self.root.join(&self.store.public)
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

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.blog.posts_per_page == 0 {
            bail!(ConfigError::Validation(
                "[blog.posts_per_page] must be greater than 0".into()
            ));
        }

        if self.slug.max_length == 0 {
            bail!(ConfigError::Validation(
                "[slug.max_length] must be greater than 0".into()
            ));
        }

        Self::check_nested_path("[store.posts]", &self.store.posts)?;
        Self::check_nested_path("[assets.dir]", &self.assets.dir)?;

        Ok(())
    }

    /// A path under the public root: relative and never climbing out of it
    fn check_nested_path(field: &str, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            bail!(ConfigError::Validation(format!("{field} must not be empty")));
        }
        if path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            bail!(ConfigError::Validation(format!(
                "{field} must be a relative path without `..`"
            )));
        }
        Ok(())
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}

// ============================================================================
// Tests
// ============================================================================
