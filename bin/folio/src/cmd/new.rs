//! New command - create a content document from a template

use std::{fs, path::Path};

use chrono::{Datelike, Local};
use color_eyre::eyre::{Result, WrapErr, bail};
use folio_core::ContentKind;
use folio_parser::slugify;

/// Run the new command.
///
/// Creates `<content>/<kind>/<slug>.mdx` with boilerplate frontmatter.
pub fn run(config_path: &Path, kind: ContentKind, slug: &str, title: Option<&str>) -> Result<()> {
    tracing::info!(?config_path, %kind, slug, "Creating new content");

    let normalized = slugify(slug);
    if normalized.is_empty() {
        bail!("Slug \"{slug}\" has no usable characters");
    }
    if normalized != slug {
        bail!("Slug \"{slug}\" is not URL-safe, try \"{normalized}\"");
    }

    let config = crate::load_config(config_path)?;
    let dir = config.kind_dir(kind);
    let file_path = dir.join(format!("{slug}.mdx"));

    if file_path.exists() || dir.join(format!("{slug}.md")).exists() {
        bail!("{} \"{slug}\" already exists", kind.singular());
    }

    let title = title
        .map_or_else(|| title_from_slug(slug), str::to_string)
        .replace('\\', "\\\\")
        .replace('"', "\\\"");
    let year = Local::now().year();
    let template = match kind {
        ContentKind::Projects => project_template(&title, year, &config.content.default_category),
        ContentKind::Shots => shot_template(&title, year),
    };

    fs::create_dir_all(&dir).wrap_err("Failed to create directories")?;
    fs::write(&file_path, template).wrap_err("Failed to write file")?;

    tracing::info!(?file_path, "Created new content file");
    println!("Created: {}", file_path.display());

    Ok(())
}

/// `brand-refresh` becomes `Brand Refresh`.
fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn project_template(title: &str, year: i32, category: &str) -> String {
    format!(
        r#"---
title: "{title}"
summary: "One sentence about this project."
year: {year}
category: "{category}"
role: ""
tags: []
skills: []
tools: []
cover: ""
final: []
featured: false
---

## The brief

## Process

## Outcome
"#
    )
}

fn shot_template(title: &str, year: i32) -> String {
    format!(
        r#"---
title: "{title}"
caption: "What this shot shows."
year: {year}
tags: []
images: []
---
"#
    )
}
