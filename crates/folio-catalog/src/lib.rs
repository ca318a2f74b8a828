//! folio catalog
//!
//! Loads portfolio entries from a content directory and answers listing
//! queries over them: filtering, ordering, facets, statistics and related
//! entries.

pub mod facets;
pub mod filter;
pub mod loader;
pub mod query;
pub mod related;
pub mod store;

pub use facets::{CatalogStats, FilterOptions, SocialMediaSummary, group_by_work_type};
pub use filter::FilterCriteria;
pub use loader::{ContentLoader, EntryDocument, Rejected, ScanReport};
pub use query::EntryQuery;
pub use related::related_entries;
pub use store::ContentStore;
