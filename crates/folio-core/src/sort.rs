//! Sort orders for entry listings.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Year descending.
    #[default]
    Newest,
    /// Year ascending.
    Oldest,
    /// Title ascending, ignoring case.
    Title,
    /// Featured entries first, then year descending.
    Featured,
}

impl SortKey {
    /// All sort keys.
    pub const ALL: [Self; 4] = [Self::Newest, Self::Oldest, Self::Title, Self::Featured];

    /// Compare two entries under this order.
    ///
    /// Ties compare equal so a stable sort keeps input order.
    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        match self {
            Self::Newest => b.year.cmp(&a.year),
            Self::Oldest => a.year.cmp(&b.year),
            Self::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            Self::Featured => b
                .featured
                .cmp(&a.featured)
                .then_with(|| b.year.cmp(&a.year)),
        }
    }

    /// Stable-sort entries in place.
    pub fn sort(&self, entries: &mut [Entry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }

    /// Parse a query value, falling back to [`SortKey::Newest`].
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Title => "title",
            Self::Featured => "featured",
        };
        f.write_str(name)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "title" => Ok(Self::Title),
            "featured" => Ok(Self::Featured),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}
