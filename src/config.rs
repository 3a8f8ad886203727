//! Site configuration module.
//!
//! Handles loading and validating `config.toml`. Configuration is a single
//! static file read once at build start; the resulting [`SiteConfig`] is
//! immutable and passed explicitly to each pipeline stage — there is no
//! global mutable state.
//!
//! ## Config File Location
//!
//! Place `config.toml` next to the content directory, in the directory you
//! run the build from:
//!
//! ```text
//! my-blog/
//! ├── config.toml
//! └── content/
//!     ├── blog/
//!     │   └── hello-world/index.md
//!     └── about.md
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "content"            # Path to content directory (root-level only)
//! site_title = "A simple blog"        # Used in <title> and the site header
//! site_url = "https://example.com"    # Canonical base URL for the published site
//! excerpt_length = 140                # Max excerpt length in characters
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only override the title
//! site_title = "Field Notes"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Path to the content root directory (only meaningful when the config
    /// is discovered from the working directory).
    pub content_root: String,
    /// Site title, shown in the header and every page `<title>`.
    pub site_title: String,
    /// Canonical base URL of the published site, without a trailing slash.
    pub site_url: String,
    /// Maximum excerpt length in characters. Excerpts never split mid-word,
    /// so actual excerpts may be shorter.
    pub excerpt_length: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_root: "content".to_string(),
            site_title: "A simple blog".to_string(),
            site_url: "https://example.com".to_string(),
            excerpt_length: 140,
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.excerpt_length == 0 {
            return Err(ConfigError::Validation(
                "excerpt_length must be at least 1".into(),
            ));
        }
        if self.site_title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_title must not be empty".into(),
            ));
        }
        if self.site_url.trim().is_empty() {
            return Err(ConfigError::Validation("site_url must not be empty".into()));
        }
        Ok(())
    }
}

/// Load the site config from `config.toml` in the given directory.
///
/// Returns defaults if the file doesn't exist. The loaded config is
/// validated before being returned.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Stock `config.toml` with every option documented, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r#"# simple-blog configuration
# All options are optional - the values below are the defaults.

# Path to the content directory. Only read when config.toml sits in the
# working directory rather than inside the content root.
content_root = "content"

# Site title, shown in the header and every page <title>.
site_title = "A simple blog"

# Canonical base URL of the published site, without a trailing slash.
site_url = "https://example.com"

# Maximum excerpt length in characters. Excerpts are cut at a word
# boundary, so they may come out shorter.
excerpt_length = 140
"#
}
