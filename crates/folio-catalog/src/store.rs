//! Cached access to loaded entries.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use folio_core::{Config, ContentKind, Entry, Result, SortKey};
use tracing::debug;

use crate::loader::{ContentLoader, EntryDocument};

/// Per-kind entry cache over a [`ContentLoader`].
///
/// Entries stay cached until [`ContentStore::invalidate`] or
/// [`ContentStore::invalidate_all`] is called. With caching disabled every
/// call reads from disk.
#[derive(Debug)]
pub struct ContentStore {
    loader: ContentLoader,
    cache_enabled: bool,
    featured_first: bool,
    cache: RwLock<Slots>,
}

/// Cached entries plus an invalidation counter per kind.
///
/// A scan only fills its slot if the counter did not move while it ran.
#[derive(Debug, Default)]
struct Slots {
    entries: HashMap<ContentKind, Arc<[Entry]>>,
    generations: HashMap<ContentKind, u64>,
}

impl Slots {
    fn generation(&self, kind: ContentKind) -> u64 {
        self.generations.get(&kind).copied().unwrap_or(0)
    }

    fn bump(&mut self, kind: ContentKind) {
        *self.generations.entry(kind).or_default() += 1;
    }
}

impl ContentStore {
    /// Create a caching store.
    #[must_use]
    pub fn new(loader: ContentLoader) -> Self {
        Self {
            loader,
            cache_enabled: true,
            featured_first: false,
            cache: RwLock::new(Slots::default()),
        }
    }

    /// Create a store from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(ContentLoader::from_config(config))
            .with_cache(config.content.cache)
            .with_featured_first(config.content.featured_first)
    }

    /// Enable or disable caching.
    #[must_use]
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Put featured entries first in the default order.
    #[must_use]
    pub fn with_featured_first(mut self, featured_first: bool) -> Self {
        self.featured_first = featured_first;
        self
    }

    /// The underlying loader.
    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    /// Order used when a listing does not ask for one.
    pub fn default_order(&self) -> SortKey {
        if self.featured_first {
            SortKey::Featured
        } else {
            SortKey::Newest
        }
    }

    /// All valid entries of `kind` in file-name order.
    pub fn entries(&self, kind: ContentKind) -> Result<Arc<[Entry]>> {
        if !self.cache_enabled {
            return Ok(self.loader.scan(kind)?.entries.into());
        }

        let generation = {
            let slots = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entries) = slots.entries.get(&kind) {
                debug!(kind = %kind, "cache hit");
                return Ok(Arc::clone(entries));
            }
            slots.generation(kind)
        };

        let entries: Arc<[Entry]> = self.loader.scan(kind)?.entries.into();
        self.fill(kind, generation, &entries);
        Ok(entries)
    }

    /// Cache a scan started at `generation`, unless it was invalidated since.
    fn fill(&self, kind: ContentKind, generation: u64, entries: &Arc<[Entry]>) -> bool {
        let mut slots = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        if slots.generation(kind) != generation {
            debug!(kind = %kind, "content changed during scan, not caching");
            return false;
        }
        slots.entries.insert(kind, Arc::clone(entries));
        true
    }

    /// Entries of `kind` ordered by `order`.
    pub fn list(&self, kind: ContentKind, order: SortKey) -> Result<Vec<Entry>> {
        let mut entries = self.entries(kind)?.to_vec();
        order.sort(&mut entries);
        Ok(entries)
    }

    /// One entry with its body. Bodies are read from disk on every call.
    pub fn get(&self, kind: ContentKind, slug: &str) -> Result<EntryDocument> {
        self.loader.get_entry_by_slug(kind, slug)
    }

    /// Drop cached entries of one kind.
    pub fn invalidate(&self, kind: ContentKind) {
        let mut slots = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        slots.bump(kind);
        let removed = slots.entries.remove(&kind).is_some();
        debug!(kind = %kind, removed, "cache invalidated");
    }

    /// Drop all cached entries.
    pub fn invalidate_all(&self) {
        let mut slots = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        for kind in ContentKind::ALL {
            slots.bump(kind);
        }
        slots.entries.clear();
        debug!("cache cleared");
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use super::*;

    fn write(root: &Path, name: &str, title: &str, year: i32) {
        let dir = root.join("projects");
        fs::create_dir_all(&dir).expect("create dir");
        fs::write(
            dir.join(name),
            format!("---\ntitle: {title}\nsummary: S\nyear: {year}\n---\n"),
        )
        .expect("write");
    }

    fn store(root: &Path) -> ContentStore {
        ContentStore::new(ContentLoader::new(root).with_current_year(2025))
    }

    #[test]
    fn test_cache_serves_stale_until_invalidated() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "a.mdx", "A", 2023);

        let store = store(dir.path());
        assert_eq!(store.entries(ContentKind::Projects).expect("entries").len(), 1);

        write(dir.path(), "b.mdx", "B", 2024);
        assert_eq!(store.entries(ContentKind::Projects).expect("entries").len(), 1);

        store.invalidate(ContentKind::Projects);
        let titles: Vec<_> = store
            .list(ContentKind::Projects, SortKey::Newest)
            .expect("list")
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_disabled_cache_reads_every_time() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "a.mdx", "A", 2023);

        let store = store(dir.path()).with_cache(false);
        assert_eq!(store.entries(ContentKind::Projects).expect("entries").len(), 1);

        write(dir.path(), "b.mdx", "B", 2024);
        assert_eq!(store.entries(ContentKind::Projects).expect("entries").len(), 2);
    }

    #[test]
    fn test_invalidate_all() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store(dir.path());
        assert!(store.entries(ContentKind::Projects).expect("entries").is_empty());

        write(dir.path(), "a.mdx", "A", 2023);
        store.invalidate_all();
        assert_eq!(store.entries(ContentKind::Projects).expect("entries").len(), 1);
    }

    #[test]
    fn test_scan_overtaken_by_invalidation_is_not_cached() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "a.mdx", "A", 2023);
        let store = store(dir.path());

        // A request reads the directory, then a change lands before it caches
        let generation = store
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation(ContentKind::Projects);
        let before: Arc<[Entry]> = store
            .loader()
            .scan(ContentKind::Projects)
            .expect("scan")
            .entries
            .into();
        write(dir.path(), "b.mdx", "B", 2024);
        store.invalidate(ContentKind::Projects);

        assert!(!store.fill(ContentKind::Projects, generation, &before));
        assert_eq!(store.entries(ContentKind::Projects).expect("entries").len(), 2);
    }

    #[test]
    fn test_invalidate_all_also_blocks_pending_fills() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store(dir.path());
        let empty: Arc<[Entry]> = Vec::new().into();

        store.invalidate_all();
        assert!(!store.fill(ContentKind::Shots, 0, &empty));
        assert!(store.fill(ContentKind::Shots, 1, &empty));
    }

    #[test]
    fn test_default_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(store(dir.path()).default_order(), SortKey::Newest);
        assert_eq!(
            store(dir.path()).with_featured_first(true).default_order(),
            SortKey::Featured
        );
    }
}
