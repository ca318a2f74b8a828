//! Configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    entry::DEFAULT_CATEGORY,
    error::{CoreError, Result},
};

/// Main configuration structure for folio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Content source settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// API server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Related entry settings.
    #[serde(default)]
    pub related: RelatedConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    #[serde(default = "default_site_title")]
    pub title: String,

    /// Public base URL (e.g., "https://example.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Content source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Root directory holding one subdirectory per content kind.
    ///
    /// A relative path is resolved against the config file's directory.
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,

    /// Put featured entries first in default listings.
    #[serde(default)]
    pub featured_first: bool,

    /// Keep loaded entries in memory until invalidated.
    #[serde(default = "default_true")]
    pub cache: bool,

    /// Category for entries that do not set one.
    #[serde(default = "default_category")]
    pub default_category: String,
}

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Related entry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedConfig {
    /// Maximum related entries on a detail response.
    #[serde(default = "default_related_limit")]
    pub limit: usize,
}

fn default_site_title() -> String {
    "Portfolio".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_true() -> bool {
    true
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_related_limit() -> usize {
    3
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_site_title(),
            base_url: default_base_url(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            featured_first: false,
            cache: true,
            default_category: default_category(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            limit: default_related_limit(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        config.resolve_paths(path);
        Ok(config)
    }

    /// Load configuration, using defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with `FOLIO__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let mut builder = config::Config::builder();
        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix("FOLIO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        config.validate()?;
        if path.exists() {
            config.resolve_paths(path);
        }
        Ok(config)
    }

    /// Anchor a relative content directory at the config file's directory.
    fn resolve_paths(&mut self, config_path: &Path) {
        if self.content.dir.is_absolute() {
            return;
        }
        if let Some(base) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.content.dir = base.join(&self.content.dir);
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.content.dir.as_os_str().is_empty() {
            return Err(CoreError::config("content.dir cannot be empty"));
        }

        if self.related.limit == 0 {
            return Err(CoreError::config("related.limit must be at least 1"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Directory holding documents of one kind.
    pub fn kind_dir(&self, kind: crate::entry::ContentKind) -> PathBuf {
        self.content.dir.join(kind.dir_name())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
