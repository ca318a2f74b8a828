//! Content loading.
//!
//! Reads the documents of one content kind, normalizes their frontmatter into
//! [`Entry`] values and skips anything malformed.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use chrono::Datelike;
use folio_core::{
    Config, ContentKind, CoreError, DocumentType, Entry, NormalizeOptions, Result, SortKey,
    entry::{DEFAULT_CATEGORY, is_plain_slug},
    frontmatter::parse_document,
};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// An entry together with its narrative body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDocument {
    pub entry: Entry,
    /// Document text after the frontmatter block.
    pub body: String,
}

/// A document that did not make it into the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of reading every document of one kind.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Valid entries in file-name order.
    pub entries: Vec<Entry>,
    /// Invalid or duplicate documents.
    pub rejected: Vec<Rejected>,
}

impl ScanReport {
    /// Whether every document loaded.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Loads entries from `<root>/<kind>/*.{mdx,md}`.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    root: PathBuf,
    default_category: String,
    current_year: Option<i32>,
}

impl ContentLoader {
    /// Create a loader for a content root.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_category: DEFAULT_CATEGORY.to_string(),
            current_year: None,
        }
    }

    /// Create a loader from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.content.dir).with_default_category(&config.content.default_category)
    }

    /// Category for entries that do not name one.
    #[must_use]
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    /// Pin the fallback year instead of reading the clock.
    #[must_use]
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    /// Content root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding documents of `kind`.
    pub fn kind_dir(&self, kind: ContentKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Year used for relative scoring and missing years.
    pub fn current_year(&self) -> i32 {
        self.current_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }

    /// All valid entries of `kind`, ordered by `order`.
    ///
    /// A missing directory yields an empty list.
    pub fn list_entries(&self, kind: ContentKind, order: SortKey) -> Result<Vec<Entry>> {
        let mut entries = self.scan(kind)?.entries;
        order.sort(&mut entries);
        Ok(entries)
    }

    /// Slugs of all valid entries of `kind`, in file-name order.
    pub fn slugs(&self, kind: ContentKind) -> Result<Vec<String>> {
        Ok(self
            .scan(kind)?
            .entries
            .into_iter()
            .map(|e| e.slug)
            .collect())
    }

    /// Look up one entry by slug.
    ///
    /// Resolves exactly as [`ContentLoader::list_entries`] does, so when two
    /// documents claim a slug the first in file-name order wins here too.
    pub fn get_entry_by_slug(&self, kind: ContentKind, slug: &str) -> Result<EntryDocument> {
        if !is_plain_slug(slug) {
            return Err(CoreError::not_found(kind, slug));
        }

        let (documents, _) = self.load_all(kind)?;
        documents
            .into_iter()
            .find(|doc| doc.entry.slug == slug)
            .ok_or_else(|| CoreError::not_found(kind, slug))
    }

    /// Read every document of `kind`, keeping rejects with their reasons.
    pub fn scan(&self, kind: ContentKind) -> Result<ScanReport> {
        let (documents, rejected) = self.load_all(kind)?;
        Ok(ScanReport {
            entries: documents.into_iter().map(|doc| doc.entry).collect(),
            rejected,
        })
    }

    /// Read and normalize a single document.
    pub fn load_document(&self, kind: ContentKind, path: &Path) -> Result<EntryDocument> {
        let content = fs::read_to_string(path)?;
        let (frontmatter, body) = parse_document(&content, path)?;
        let options = NormalizeOptions {
            default_category: self.default_category.clone(),
            default_year: self.current_year(),
        };
        let entry = Entry::from_frontmatter(kind, frontmatter, path, &options)?;
        Ok(EntryDocument { entry, body })
    }

    fn load_all(&self, kind: ContentKind) -> Result<(Vec<EntryDocument>, Vec<Rejected>)> {
        let files = self.document_files(kind)?;
        debug!(kind = %kind, count = files.len(), "found documents");

        let results: Vec<_> = files
            .par_iter()
            .map(|path| (path, self.load_document(kind, path)))
            .collect();

        let mut seen = HashSet::new();
        let mut documents = Vec::with_capacity(results.len());
        let mut rejected = Vec::new();

        for (path, result) in results {
            match result {
                Ok(doc) if !seen.insert(doc.entry.slug.clone()) => {
                    warn!(path = %path.display(), slug = %doc.entry.slug, "duplicate slug, skipping");
                    rejected.push(Rejected {
                        path: path.clone(),
                        reason: format!("duplicate slug \"{}\"", doc.entry.slug),
                    });
                }
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping invalid document");
                    rejected.push(Rejected {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            kind = %kind,
            loaded = documents.len(),
            rejected = rejected.len(),
            "content scan complete"
        );

        Ok((documents, rejected))
    }

    /// Content files of `kind`, sorted by file name.
    fn document_files(&self, kind: ContentKind) -> Result<Vec<PathBuf>> {
        let dir = self.kind_dir(kind);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "content directory missing");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            let hidden = path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'));
            if !hidden && path.is_file() && DocumentType::from_path(&path).is_some() {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}
