//! CLI command implementations.

pub mod check;
pub mod facets;
pub mod list;
pub mod new;
pub mod serve;
pub mod show;
