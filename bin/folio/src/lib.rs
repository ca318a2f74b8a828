//! folio CLI library
//!
//! Command implementations and the JSON API server behind the `folio`
//! binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (list, show, facets, check, new, serve)
//! - [`server`] - JSON API over the content store with reload events
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use folio::cmd;
//!
//! // Print the facet values of all projects
//! cmd::facets::run(Path::new("folio.toml"), folio::ContentKind::Projects, false).unwrap();
//! ```

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

pub mod cmd;
pub mod server;

pub use folio_catalog::{ContentStore, EntryQuery};
pub use folio_core::{Config, ContentKind, Entry};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// Load configuration with environment overrides.
///
/// A missing file is not an error; every setting has a default.
pub fn load_config(path: &Path) -> Result<Config> {
    Config::load_with_env(path)
        .wrap_err_with(|| format!("Failed to load configuration from {}", path.display()))
}
