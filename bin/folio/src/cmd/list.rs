//! List command - filter and print entries

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use folio_catalog::{ContentStore, EntryQuery};
use folio_core::{ContentKind, Entry};

use crate::server::ListResponse;

/// Run the list command.
pub fn run(config_path: &Path, kind: ContentKind, query: EntryQuery, json: bool) -> Result<()> {
    tracing::info!(?config_path, %kind, "Listing entries");

    let config = crate::load_config(config_path)?;
    let store = ContentStore::from_config(&config);

    let query = query.or_sort(store.default_order());
    let entries = query.apply(
        &store
            .entries(kind)
            .wrap_err_with(|| format!("Failed to load {kind}"))?,
    );

    if json {
        let response = ListResponse {
            count: entries.len(),
            entries,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No {kind} match.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", format_row(entry));
    }
    println!();
    println!("  {} {kind} (sorted by {})", entries.len(), query.sort_key());

    Ok(())
}

/// One line per entry: year, featured marker, title, category, work type.
fn format_row(entry: &Entry) -> String {
    let marker = if entry.featured { "★" } else { " " };
    format!(
        "  {year}  {marker} {title:<36}  {category:<20}  {work:<12}  {slug}",
        year = entry.year,
        title = truncate(&entry.title, 36),
        category = truncate(&entry.category, 20),
        work = entry.work_type.to_string(),
        slug = entry.slug,
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long title", 6), "a ver…");
        assert_eq!(truncate("exact", 5), "exact");
    }
}
