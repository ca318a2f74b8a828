//! folio parser library
//!
//! Renders the narrative body of an entry document to HTML.

pub mod markdown;

pub use markdown::{MarkdownParser, RenderedBody, TocEntry, slugify, strip_mdx_esm};
