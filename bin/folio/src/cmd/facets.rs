//! Facets command - print filter values and statistics

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use folio_core::ContentKind;

use crate::server::{AppState, FacetsResponse};

/// Run the facets command.
pub fn run(config_path: &Path, kind: ContentKind, json: bool) -> Result<()> {
    tracing::info!(?config_path, %kind, "Collecting facets");

    let config = crate::load_config(config_path)?;
    let facets = AppState::new(config)
        .facets(kind)
        .wrap_err_with(|| format!("Failed to load {kind}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&facets)?);
    } else {
        print_facets(kind, &facets);
    }

    Ok(())
}

fn print_facets(kind: ContentKind, facets: &FacetsResponse) {
    let FacetsResponse { options, stats } = facets;

    println!();
    println!("  {kind}: {} entries, {} featured", stats.total, stats.featured);
    println!("  ─────────────────────────────────");
    for option in &options.work_types {
        println!("  {:<20} {:>6}", option.label, option.count);
    }
    if let (Some(earliest), Some(latest)) = (stats.earliest_year, stats.latest_year) {
        println!("  {:<20} {earliest}-{latest}", "Years");
    }
    if stats.social_sections > 0 {
        println!(
            "  {:<20} {} sections, {} images, {} captions",
            "Social media", stats.social_sections, stats.social_images, stats.social_captions
        );
    }
    println!();

    let lists = [
        ("Categories", &options.categories),
        ("Tags", &options.tags),
        ("Skills", &options.skills),
        ("Tools", &options.tools),
        ("Clients", &options.clients),
        ("Organizations", &options.organizations),
        ("Organization types", &options.organization_types),
        ("Competitions", &options.competition_names),
        ("Competition categories", &options.competition_categories),
        ("Events", &options.event_names),
        ("Event types", &options.event_types),
        ("Event locations", &options.event_locations),
    ];
    for (label, values) in lists {
        if !values.is_empty() {
            println!("  {label}: {}", values.join(", "));
        }
    }
    println!();
}
