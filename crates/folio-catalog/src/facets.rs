//! Facet values and statistics for filter interfaces.

use std::collections::{BTreeMap, BTreeSet};

use folio_core::{Entry, SocialMediaSection, WorkType};
use serde::{Deserialize, Serialize};

/// A selectable work type with its entry count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkTypeOption {
    pub value: WorkType,
    pub label: String,
    pub count: usize,
}

/// Distinct filterable values across a collection.
///
/// String lists are sorted ascending; years descending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub skills: Vec<String>,
    pub tags: Vec<String>,
    pub tools: Vec<String>,
    pub years: Vec<i32>,
    pub organizations: Vec<String>,
    pub organization_types: Vec<String>,
    pub clients: Vec<String>,
    pub competition_names: Vec<String>,
    pub competition_categories: Vec<String>,
    pub event_names: Vec<String>,
    pub event_types: Vec<String>,
    pub event_locations: Vec<String>,
    pub work_types: Vec<WorkTypeOption>,
}

impl FilterOptions {
    /// Collect facet values from `entries`.
    pub fn from_entries(entries: &[Entry]) -> Self {
        let of = |work_type: WorkType| entries.iter().filter(move |e| e.work_type == work_type);

        let years: BTreeSet<i32> = entries.iter().map(|e| e.year).collect();

        Self {
            categories: distinct(entries.iter().map(|e| e.category.as_str())),
            skills: distinct(entries.iter().flat_map(|e| e.skills.iter().map(String::as_str))),
            tags: distinct(entries.iter().flat_map(|e| e.tags.iter().map(String::as_str))),
            tools: distinct(entries.iter().flat_map(|e| e.tools.iter().map(String::as_str))),
            years: years.into_iter().rev().collect(),
            organizations: distinct(
                of(WorkType::Organization).map(|e| e.organization.name.as_str()),
            ),
            organization_types: distinct(
                of(WorkType::Organization).map(|e| e.organization.kind.as_str()),
            ),
            clients: distinct(
                entries
                    .iter()
                    .filter(|e| matches!(e.work_type, WorkType::Project | WorkType::Competition))
                    .map(|e| e.client.as_str()),
            ),
            competition_names: distinct(
                of(WorkType::Competition).map(|e| e.competition.name.as_str()),
            ),
            competition_categories: distinct(
                of(WorkType::Competition).map(|e| e.competition.category.as_str()),
            ),
            event_names: distinct(of(WorkType::Event).map(|e| e.event.name.as_str())),
            event_types: distinct(of(WorkType::Event).map(|e| e.event.kind.as_str())),
            event_locations: distinct(of(WorkType::Event).map(|e| e.event.location.as_str())),
            work_types: WorkType::ALL
                .into_iter()
                .map(|value| WorkTypeOption {
                    value,
                    label: value.label().to_string(),
                    count: of(value).count(),
                })
                .collect(),
        }
    }
}

/// Sorted, de-duplicated, non-empty values.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Social media sections across a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaSummary {
    pub total_sections: usize,
    pub total_images: usize,
    /// Non-empty captions only.
    pub total_captions: usize,
    /// Sections of every entry that has any, keyed by slug.
    pub sections_by_entry: BTreeMap<String, Vec<SocialMediaSection>>,
}

impl SocialMediaSummary {
    /// Collect social media sections from `entries`.
    pub fn from_entries(entries: &[Entry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            let sections = &entry.media.social_media_sections;
            if sections.is_empty() {
                continue;
            }
            summary.total_sections += sections.len();
            for section in sections {
                summary.total_images += section.images.len();
                summary.total_captions += section.captions.iter().filter(|c| !c.is_empty()).count();
            }
            summary
                .sections_by_entry
                .insert(entry.slug.clone(), sections.clone());
        }
        summary
    }
}

/// Counts over a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total: usize,
    pub featured: usize,
    pub by_work_type: BTreeMap<WorkType, usize>,
    pub categories: BTreeMap<String, usize>,
    pub tags: BTreeMap<String, usize>,
    pub skills: BTreeMap<String, usize>,
    /// Distinct years, newest first.
    pub years: Vec<i32>,
    pub earliest_year: Option<i32>,
    pub latest_year: Option<i32>,
    pub social_sections: usize,
    pub social_images: usize,
    pub social_captions: usize,
}

impl CatalogStats {
    /// Compute statistics for `entries`.
    pub fn from_entries(entries: &[Entry]) -> Self {
        let mut stats = Self {
            total: entries.len(),
            by_work_type: WorkType::ALL.into_iter().map(|w| (w, 0)).collect(),
            ..Self::default()
        };

        let mut years = BTreeSet::new();
        for entry in entries {
            if entry.featured {
                stats.featured += 1;
            }
            *stats.by_work_type.entry(entry.work_type).or_default() += 1;
            *stats.categories.entry(entry.category.clone()).or_default() += 1;
            for tag in &entry.tags {
                *stats.tags.entry(tag.clone()).or_default() += 1;
            }
            for skill in &entry.skills {
                *stats.skills.entry(skill.clone()).or_default() += 1;
            }
            years.insert(entry.year);
        }

        stats.earliest_year = years.first().copied();
        stats.latest_year = years.last().copied();
        stats.years = years.into_iter().rev().collect();

        let social = SocialMediaSummary::from_entries(entries);
        stats.social_sections = social.total_sections;
        stats.social_images = social.total_images;
        stats.social_captions = social.total_captions;

        stats
    }
}

/// Entries grouped by work type, each group in input order.
pub fn group_by_work_type(entries: &[Entry]) -> BTreeMap<WorkType, Vec<&Entry>> {
    let mut groups: BTreeMap<WorkType, Vec<&Entry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.work_type).or_default().push(entry);
    }
    groups
}
