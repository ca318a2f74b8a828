//! Error types for the folio core library.

use std::path::PathBuf;

use thiserror::Error;

use crate::entry::ContentKind;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for folio.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Frontmatter could not be deserialized.
    #[error("Frontmatter error in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    /// Frontmatter parsed but a required field is missing or empty.
    #[error("Invalid entry {path}: {message}")]
    InvalidEntry { path: PathBuf, message: String },

    /// No entry of the given kind has this slug.
    #[error("No {} entry with slug \"{slug}\"", .kind.singular())]
    NotFound { kind: ContentKind, slug: String },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new frontmatter error.
    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid entry error.
    pub fn invalid_entry(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidEntry {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new not-found error.
    pub fn not_found(kind: ContentKind, slug: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            slug: slug.into(),
        }
    }

    /// Whether this error means the requested entry does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
