//! folio core library
//!
//! Entry model, frontmatter parsing, sort keys, configuration, and error
//! handling shared by the folio crates.

pub mod config;
pub mod entry;
pub mod error;
pub mod frontmatter;
pub mod sort;

pub use config::Config;
pub use entry::{
    ContentKind, DocumentType, Entry, GalleryImage, GallerySection, NormalizeOptions,
    SocialMediaSection, WorkType,
};
pub use error::{CoreError, Result};
pub use frontmatter::RawFrontmatter;
pub use sort::SortKey;
