//! Related entry scoring.

use folio_core::{Entry, WorkType};

const SAME_WORK_TYPE: u32 = 15;
const SAME_CATEGORY: u32 = 10;
const PER_SHARED_TAG: u32 = 3;
const SAME_COMPETITION: u32 = 8;
const SAME_EVENT: u32 = 8;
const SAME_EVENT_TYPE: u32 = 5;
const SAME_ORGANIZATION_TYPE: u32 = 5;
const RECENT: u32 = 2;

/// How closely `candidate` relates to `current`.
pub fn relatedness(current: &Entry, candidate: &Entry, current_year: i32) -> u32 {
    let mut score = 0;

    if candidate.work_type == current.work_type {
        score += SAME_WORK_TYPE;

        match current.work_type {
            WorkType::Competition => {
                if same_non_empty(&current.competition.name, &candidate.competition.name) {
                    score += SAME_COMPETITION;
                }
            }
            WorkType::Event => {
                if same_non_empty(&current.event.name, &candidate.event.name) {
                    score += SAME_EVENT;
                }
                if same_non_empty(&current.event.kind, &candidate.event.kind) {
                    score += SAME_EVENT_TYPE;
                }
            }
            WorkType::Organization => {
                if same_non_empty(&current.organization.kind, &candidate.organization.kind) {
                    score += SAME_ORGANIZATION_TYPE;
                }
            }
            WorkType::Project => {}
        }
    }

    if same_non_empty(&current.category, &candidate.category) {
        score += SAME_CATEGORY;
    }

    let shared = current
        .tags
        .iter()
        .filter(|tag| candidate.tags.contains(tag))
        .count();
    score += PER_SHARED_TAG * shared as u32;

    if (current_year - candidate.year).abs() <= 1 {
        score += RECENT;
    }

    score
}

/// Up to `limit` entries most related to `current`, best first.
///
/// `current` itself is never included. Equal scores keep input order.
pub fn related_entries<'a>(
    entries: &'a [Entry],
    current: &Entry,
    limit: usize,
    current_year: i32,
) -> Vec<&'a Entry> {
    let mut scored: Vec<(u32, &Entry)> = entries
        .iter()
        .filter(|e| e.slug != current.slug)
        .map(|e| (relatedness(current, e, current_year), e))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, e)| e).collect()
}

fn same_non_empty(a: &str, b: &str) -> bool {
    !a.is_empty() && a == b
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use folio_core::{ContentKind, NormalizeOptions, frontmatter::parse_document};

    use super::*;

    fn entry(slug: &str, frontmatter: &str) -> Entry {
        let doc = format!("---\ntitle: {slug}\nsummary: S\nslug: {slug}\n{frontmatter}\n---\n");
        let path = Path::new("x.mdx");
        let (fm, _) = parse_document(&doc, path).expect("parse");
        Entry::from_frontmatter(
            ContentKind::Projects,
            fm,
            path,
            &NormalizeOptions::with_year(2010),
        )
        .expect("entry")
    }

    #[test]
    fn test_relatedness_components() {
        let current = entry(
            "a",
            "eventWork: true\neventName: Expo\neventType: Fair\ncategory: Print\ntags: [x, y]\nyear: 2024",
        );
        let twin = entry(
            "b",
            "eventWork: true\neventName: Expo\neventType: Fair\ncategory: Print\ntags: [y, x, z]\nyear: 2024",
        );
        // 15 + 8 + 5 + 10 + 2 * 3 + 2
        assert_eq!(relatedness(&current, &twin, 2025), 46);

        let stranger = entry("c", "competitionWork: true\ncompetitionName: Expo\nyear: 2015");
        assert_eq!(relatedness(&current, &stranger, 2025), 0);
    }

    #[test]
    fn test_empty_detail_fields_do_not_match() {
        let current = entry("a", "organizationWork: true\nyear: 2000");
        let other = entry("b", "organizationWork: true\nyear: 2000");
        assert_eq!(relatedness(&current, &other, 2025), SAME_WORK_TYPE + SAME_CATEGORY);
    }

    #[test]
    fn test_related_entries_order_and_limit() {
        let entries = vec![
            entry("current", "category: Web\ntags: [ui]\nyear: 2000"),
            entry("weak", "competitionWork: true\nyear: 2000"),
            entry("tie-first", "category: Web\nyear: 2000"),
            entry("strong", "category: Web\ntags: [ui]\nyear: 2000"),
            entry("tie-second", "category: Web\nyear: 2000"),
        ];
        let current = &entries[0];

        let related = related_entries(&entries, current, 3, 2025);
        let slugs: Vec<_> = related.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["strong", "tie-first", "tie-second"]);

        assert!(related_entries(&entries, current, 10, 2025)
            .iter()
            .all(|e| e.slug != "current"));
    }
}
