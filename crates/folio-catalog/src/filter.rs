//! Entry filtering.

use std::collections::BTreeSet;

use folio_core::{Entry, WorkType};
use serde::{Deserialize, Serialize};

/// Filter selection.
///
/// Values inside one dimension are alternatives (OR); dimensions combine
/// with AND. An empty dimension imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    pub tags: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub skills: BTreeSet<String>,
    pub years: BTreeSet<i32>,
    pub work_types: BTreeSet<WorkType>,
    /// Inclusive lower year bound.
    pub from_year: Option<i32>,
    /// Inclusive upper year bound.
    pub to_year: Option<i32>,
    /// Case-insensitive free-text term.
    pub search: Option<String>,
}

impl FilterCriteria {
    /// Criteria that match everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require one of these tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Require one of these categories.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories
            .extend(categories.into_iter().map(Into::into));
        self
    }

    /// Require one of these skills.
    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }

    /// Require one of these years.
    #[must_use]
    pub fn with_years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.years.extend(years);
        self
    }

    /// Require one of these work types.
    #[must_use]
    pub fn with_work_types(mut self, work_types: impl IntoIterator<Item = WorkType>) -> Self {
        self.work_types.extend(work_types);
        self
    }

    /// Require a free-text match.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Whether these criteria accept every entry.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
            && self.categories.is_empty()
            && self.skills.is_empty()
            && self.years.is_empty()
            && self.work_types.is_empty()
            && self.from_year.is_none()
            && self.to_year.is_none()
            && self.search_term().is_none()
    }

    /// Whether `entry` satisfies every dimension.
    pub fn matches(&self, entry: &Entry) -> bool {
        if !self.tags.is_empty() && !self.tags.iter().any(|t| entry.has_tag(t)) {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&entry.category) {
            return false;
        }
        if !self.skills.is_empty() && !self.skills.iter().any(|s| entry.has_skill(s)) {
            return false;
        }
        if !self.years.is_empty() && !self.years.contains(&entry.year) {
            return false;
        }
        if !self.work_types.is_empty() && !self.work_types.contains(&entry.work_type) {
            return false;
        }
        if self.from_year.is_some_and(|from| entry.year < from)
            || self.to_year.is_some_and(|to| entry.year > to)
        {
            return false;
        }
        match self.search_term() {
            Some(term) => matches_search(entry, &term),
            None => true,
        }
    }

    /// Entries accepted by these criteria, in input order.
    pub fn apply<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }
}

/// Case-insensitive substring search over the descriptive fields.
///
/// `term` must already be lowercase.
pub fn matches_search(entry: &Entry, term: &str) -> bool {
    let scalars = [
        &entry.title,
        &entry.summary,
        &entry.category,
        &entry.client,
        &entry.organization.name,
        &entry.competition.name,
        &entry.competition.category,
        &entry.event.name,
        &entry.event.kind,
        &entry.event.location,
    ];
    let social = entry
        .media
        .social_media_sections
        .iter()
        .flat_map(|s| [&s.title, &s.description].into_iter().chain(&s.captions));

    scalars
        .into_iter()
        .chain(&entry.tags)
        .chain(&entry.skills)
        .chain(&entry.tools)
        .chain(social)
        .any(|field| field.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use folio_core::{ContentKind, NormalizeOptions, frontmatter::parse_document};

    use super::*;

    fn entry(frontmatter: &str) -> Entry {
        let doc = format!("---\nsummary: S\n{frontmatter}\n---\n");
        let path = Path::new("x.mdx");
        let (fm, _) = parse_document(&doc, path).expect("parse");
        Entry::from_frontmatter(
            ContentKind::Projects,
            fm,
            path,
            &NormalizeOptions::with_year(2025),
        )
        .expect("entry")
    }

    #[test]
    fn test_empty_criteria_match_all() {
        let criteria = FilterCriteria::new();
        assert!(criteria.is_empty());
        assert!(criteria.matches(&entry("title: A")));
        assert!(FilterCriteria::new().with_search("   ").is_empty());
    }

    #[test]
    fn test_tags_are_or() {
        let design = entry("title: A\ntags: [design]");
        let featured = entry("title: B\ntags: [featured]");
        let other = entry("title: C\ntags: [other]");

        let criteria = FilterCriteria::new().with_tags(["design", "featured"]);
        assert!(criteria.matches(&design));
        assert!(criteria.matches(&featured));
        assert!(!criteria.matches(&other));
    }

    #[test]
    fn test_dimensions_are_and() {
        let both = entry("title: A\ntags: [x]\ncategory: Y");
        let tag_only = entry("title: B\ntags: [x]\ncategory: Z");

        let criteria = FilterCriteria::new()
            .with_tags(["x"])
            .with_categories(["Y"]);
        assert!(criteria.matches(&both));
        assert!(!criteria.matches(&tag_only));
    }

    #[test]
    fn test_tag_match_is_exact() {
        let criteria = FilterCriteria::new().with_tags(["design"]);
        assert!(!criteria.matches(&entry("title: A\ntags: [Design]")));
        assert!(!criteria.matches(&entry("title: A\ntags: [design-system]")));
    }

    #[test]
    fn test_year_range_and_work_type() {
        let event = entry("title: A\nyear: 2022\neventWork: true");
        let project = entry("title: B\nyear: 2019");

        let criteria = FilterCriteria {
            from_year: Some(2020),
            to_year: Some(2023),
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&event));
        assert!(!criteria.matches(&project));

        let criteria = FilterCriteria::new().with_work_types([WorkType::Event]);
        assert!(criteria.matches(&event));
        assert!(!criteria.matches(&project));

        let criteria = FilterCriteria::new().with_years([2019, 2021]);
        assert!(!criteria.matches(&event));
        assert!(criteria.matches(&project));
    }

    #[test]
    fn test_skill_filter() {
        let criteria = FilterCriteria::new().with_skills(["Branding"]);
        assert!(criteria.matches(&entry("title: A\nskills: [Branding, Motion]")));
        assert!(!criteria.matches(&entry("title: A\nskills: [Motion]")));
    }

    #[test]
    fn test_search_fields() {
        let e = entry(
            "title: Festival Identity\nclient: Acme\neventName: Jazz Nights\ntools: [Figma]\nsocialMediaSections:\n  - title: Feed\n    images: [/a.png]\n    captions: [Opening night teaser]",
        );

        for term in ["festival", "ACME", "jazz", "figma", "teaser", "feed"] {
            let criteria = FilterCriteria::new().with_search(term);
            assert!(criteria.matches(&e), "{term}");
        }
        assert!(!FilterCriteria::new().with_search("poster").matches(&e));
    }

    #[test]
    fn test_apply_keeps_order() {
        let entries = vec![
            entry("title: A\ntags: [x]"),
            entry("title: B\ntags: [y]"),
            entry("title: C\ntags: [x]"),
        ];
        let matched = FilterCriteria::new().with_tags(["x"]).apply(&entries);
        let titles: Vec<_> = matched.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }
}
