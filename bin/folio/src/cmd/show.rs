//! Show command - print one entry with its rendered body

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use folio_core::ContentKind;

use crate::server::{AppState, DetailResponse};

/// Run the show command.
pub fn run(config_path: &Path, kind: ContentKind, slug: &str, json: bool) -> Result<()> {
    tracing::info!(?config_path, %kind, slug, "Showing entry");

    let config = crate::load_config(config_path)?;
    let state = AppState::new(config);

    let detail = match state.detail(kind, slug) {
        Ok(detail) => detail,
        Err(e) if e.is_not_found() => {
            eprintln!("  ✗ {e}");
            eprintln!("    Run `folio list {kind}` to see available slugs.");
            bail!("{} not found", kind.singular());
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        print_detail(&detail);
    }

    Ok(())
}

fn print_detail(detail: &DetailResponse) {
    let entry = &detail.entry;

    println!();
    println!("  {}{}", entry.title, if entry.featured { "  ★" } else { "" });
    println!("  {}", entry.summary);
    println!("  ─────────────────────────────────");
    field("Year", &entry.year.to_string());
    field("Category", &entry.category);
    field("Work type", entry.work_type.label());
    field("Role", &entry.role);
    field("Client", &entry.client);
    field("Organization", &entry.organization.name);
    field("Competition", &entry.competition.name);
    field("Event", &entry.event.name);
    field("Location", &entry.event.location);
    field("Tags", &entry.tags.join(", "));
    field("Skills", &entry.skills.join(", "));
    field("Tools", &entry.tools.join(", "));
    field("Live", &entry.links.live_url);
    field("Images", &detail.gallery.len().to_string());
    if detail.reading_time > 0 {
        field("Reading", &format!("{} min", detail.reading_time));
    }

    if !detail.toc.is_empty() {
        println!();
        println!("  Contents:");
        for item in &detail.toc {
            let indent = "  ".repeat(usize::from(item.level.saturating_sub(1)));
            println!("    {indent}{}", item.text);
        }
    }

    if !detail.related.is_empty() {
        println!();
        println!("  Related:");
        for related in &detail.related {
            println!("    {} ({})", related.title, related.slug);
        }
    }
    println!();
}

/// Print a labelled value, skipping empty ones.
fn field(label: &str, value: &str) {
    if !value.is_empty() {
        println!("  {label:<13} {value}");
    }
}
