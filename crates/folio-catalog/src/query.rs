//! Listing queries parsed from URL parameters.

use folio_core::{Entry, SortKey, WorkType};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::FilterCriteria;

/// Filter, order and limit for one listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryQuery {
    pub criteria: FilterCriteria,
    /// Requested order; `None` leaves the choice to the caller.
    pub sort: Option<SortKey>,
    pub limit: Option<usize>,
}

impl EntryQuery {
    /// Build a query from `key=value` pairs.
    ///
    /// List parameters (`tags`, `categories`, `skills`, `years`) accept
    /// comma-separated values and may repeat; the singular `tag`,
    /// `category`, `skill` and `year` each add one literal value. Unparseable years,
    /// work types and limits are dropped. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            query.push_param(key.as_ref(), value.as_ref());
        }
        query
    }

    fn push_param(&mut self, key: &str, value: &str) {
        let criteria = &mut self.criteria;
        match key {
            "tags" => criteria.tags.extend(split_values(value).map(str::to_string)),
            "categories" => criteria
                .categories
                .extend(split_values(value).map(str::to_string)),
            "skills" => criteria
                .skills
                .extend(split_values(value).map(str::to_string)),
            "tag" => criteria.tags.extend(single_value(value).map(str::to_string)),
            "category" => criteria
                .categories
                .extend(single_value(value).map(str::to_string)),
            "skill" => criteria
                .skills
                .extend(single_value(value).map(str::to_string)),
            "years" | "year" => {
                let raw_years: Vec<&str> = if key == "years" {
                    split_values(value).collect()
                } else {
                    single_value(value).into_iter().collect()
                };
                for raw in raw_years {
                    match raw.parse::<i32>() {
                        Ok(year) => {
                            criteria.years.insert(year);
                        }
                        Err(_) => debug!(key, value = raw, "dropping unparseable year"),
                    }
                }
            }
            "work" | "workType" => {
                for raw in split_values(value) {
                    match raw.parse::<WorkType>() {
                        Ok(work_type) => {
                            criteria.work_types.insert(work_type);
                        }
                        Err(e) => debug!(key, error = %e, "dropping work type"),
                    }
                }
            }
            "from" => criteria.from_year = parse_year(key, value).or(criteria.from_year),
            "to" => criteria.to_year = parse_year(key, value).or(criteria.to_year),
            "q" | "search" => {
                let term = value.trim();
                criteria.search = (!term.is_empty()).then(|| term.to_string());
            }
            "sort" => {
                if !value.trim().is_empty() {
                    self.sort = Some(SortKey::parse_or_default(value));
                }
            }
            "limit" => match value.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => self.limit = Some(limit),
                _ => debug!(value, "dropping limit"),
            },
            _ => {}
        }
    }

    /// Use `order` when no sort was requested.
    #[must_use]
    pub fn or_sort(mut self, order: SortKey) -> Self {
        self.sort.get_or_insert(order);
        self
    }

    /// Effective sort order.
    pub fn sort_key(&self) -> SortKey {
        self.sort.unwrap_or_default()
    }

    /// Filter, sort and truncate `entries`.
    ///
    /// Does not mutate its input; applying a query to its own output
    /// returns the same list.
    pub fn apply(&self, entries: &[Entry]) -> Vec<Entry> {
        let mut matched: Vec<Entry> = self
            .criteria
            .apply(entries)
            .into_iter()
            .cloned()
            .collect();
        self.sort_key().sort(&mut matched);
        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}

fn split_values(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|v| !v.is_empty())
}

/// Legacy singular parameters carry one literal value.
fn single_value(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

fn parse_year(key: &str, value: &str) -> Option<i32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value
        .parse::<i32>()
        .inspect_err(|_| debug!(key, value, "dropping unparseable year"))
        .ok()
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

    fn titles(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_from_pairs_lists() {
        let query = EntryQuery::from_pairs([
            ("tags", "design, web"),
            ("tags", "print"),
            ("tag", "motion"),
            ("categories", "Branding"),
            ("years", "2023,abc,2024"),
            ("year", "2021"),
            ("skill", "Figma"),
        ]);

        let c = &query.criteria;
        assert_eq!(
            c.tags.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["design", "motion", "print", "web"]
        );
        assert!(c.categories.contains("Branding"));
        assert!(c.skills.contains("Figma"));
        assert_eq!(c.years.iter().copied().collect::<Vec<_>>(), vec![2021, 2023, 2024]);
    }

    #[test]
    fn test_singular_params_are_not_split() {
        let query = EntryQuery::from_pairs([
            ("tag", "print, web"),
            ("tags", "motion"),
            ("category", "Art, Design"),
            ("year", "2021,2022"),
        ]);

        let c = &query.criteria;
        assert_eq!(
            c.tags.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["motion", "print, web"]
        );
        assert!(c.categories.contains("Art, Design"));
        assert!(c.years.is_empty());
    }

    #[test]
    fn test_from_pairs_scalars() {
        let query = EntryQuery::from_pairs([
            ("sort", "title"),
            ("limit", "5"),
            ("work", "event,unknown"),
            ("from", "2020"),
            ("to", "soon"),
            ("q", "  poster "),
            ("page", "2"),
        ]);

        assert_eq!(query.sort, Some(SortKey::Title));
        assert_eq!(query.limit, Some(5));
        assert!(query.criteria.work_types.contains(&WorkType::Event));
        assert_eq!(query.criteria.work_types.len(), 1);
        assert_eq!(query.criteria.from_year, Some(2020));
        assert_eq!(query.criteria.to_year, None);
        assert_eq!(query.criteria.search.as_deref(), Some("poster"));
    }

    #[test]
    fn test_unknown_sort_falls_back_to_newest() {
        let query = EntryQuery::from_pairs([("sort", "random")]);
        assert_eq!(query.sort_key(), SortKey::Newest);

        let query = EntryQuery::from_pairs([("limit", "0")]);
        assert_eq!(query.limit, None);
    }

    #[test]
    fn test_or_sort_keeps_explicit_choice() {
        let query = EntryQuery::default().or_sort(SortKey::Featured);
        assert_eq!(query.sort_key(), SortKey::Featured);

        let query = EntryQuery::from_pairs([("sort", "oldest")]).or_sort(SortKey::Featured);
        assert_eq!(query.sort_key(), SortKey::Oldest);
    }

    #[test]
    fn test_apply_filters_sorts_and_limits() {
        let entries = vec![
            entry("title: Banana\nyear: 2021\ntags: [x]"),
            entry("title: apple\nyear: 2023\ntags: [x]"),
            entry("title: Cherry\nyear: 2022\ntags: [y]"),
        ];

        let query = EntryQuery::from_pairs([("tags", "x"), ("sort", "title")]);
        assert_eq!(titles(&query.apply(&entries)), vec!["apple", "Banana"]);

        let query = EntryQuery::from_pairs([("limit", "2")]);
        assert_eq!(titles(&query.apply(&entries)), vec!["apple", "Cherry"]);

        let query = EntryQuery::from_pairs([("tags", "z")]);
        assert!(query.apply(&entries).is_empty());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let entries = vec![
            entry("title: A\nyear: 2021\ntags: [x]"),
            entry("title: B\nyear: 2023\ntags: [x]\nfeatured: true"),
            entry("title: C\nyear: 2022\ntags: [x]"),
        ];
        let query = EntryQuery::from_pairs([("tags", "x"), ("sort", "featured")]);

        let once = query.apply(&entries);
        let twice = query.apply(&once);
        assert_eq!(once, twice);
        assert_eq!(titles(&once), vec!["B", "C", "A"]);
    }
}
