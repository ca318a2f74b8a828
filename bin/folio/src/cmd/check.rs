//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use folio_catalog::ContentLoader;
use folio_core::{ContentKind, DocumentType, Entry};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration and every content document.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    if !config_path.exists() {
        result.add_warning(format!(
            "{} not found, using defaults",
            config_path.display()
        ));
    }
    let config = match crate::load_config(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            println!("  ✗ Configuration invalid: {e}");
            bail!("Configuration error: {e}");
        }
    };

    let content_dir = config.content.dir.clone();
    if content_dir.is_dir() {
        let loader = ContentLoader::from_config(&config);
        for kind in ContentKind::ALL {
            println!("\nChecking {kind}...");
            validate_kind(&loader, kind, &mut result)?;
        }

        println!("\nChecking for ignored files...");
        check_ignored_files(&content_dir, &mut result);
    } else {
        result.add_error(format!(
            "Content directory does not exist: {}",
            content_dir.display()
        ));
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Load every document of one kind and lint the valid entries.
fn validate_kind(
    loader: &ContentLoader,
    kind: ContentKind,
    result: &mut ValidationResult,
) -> Result<()> {
    let report = loader.scan(kind)?;

    for rejected in &report.rejected {
        result.add_error(format!("{}: {}", rejected.path.display(), rejected.reason));
    }

    let current_year = loader.current_year();
    for entry in &report.entries {
        for warning in lint_entry(entry, current_year) {
            result.add_warning(format!("{kind}/{}: {warning}", entry.file));
        }
    }

    let checked = report.entries.len() + report.rejected.len();
    if report.is_clean() {
        println!("  ✓ All {checked} documents valid");
    } else {
        println!(
            "  ✗ {}/{checked} documents rejected",
            report.rejected.len()
        );
    }

    Ok(())
}

/// Non-fatal issues in a valid entry.
fn lint_entry(entry: &Entry, current_year: i32) -> Vec<String> {
    let mut warnings = Vec::new();

    if entry.kind == ContentKind::Projects && entry.media.cover.is_empty() {
        warnings.push("no cover image".to_string());
    }
    if entry.kind == ContentKind::Shots && entry.gallery().is_empty() {
        warnings.push("no images".to_string());
    }
    if entry.year > current_year {
        warnings.push(format!("year {} is in the future", entry.year));
    }
    for section in &entry.media.social_media_sections {
        if section.captions.len() > section.images.len() {
            warnings.push(format!(
                "social media section \"{}\" has {} captions for {} images",
                section.title,
                section.captions.len(),
                section.images.len()
            ));
        }
    }

    warnings
}

/// Warn about files the loader will never read.
fn check_ignored_files(content_dir: &Path, result: &mut ValidationResult) {
    let kind_dirs: Vec<_> = ContentKind::ALL
        .iter()
        .map(|kind| content_dir.join(kind.dir_name()))
        .collect();
    let mut ignored = 0;

    for entry in walkdir::WalkDir::new(content_dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        let in_kind_dir = path
            .parent()
            .is_some_and(|parent| kind_dirs.iter().any(|d| d == parent));

        if hidden {
            continue;
        }
        if !in_kind_dir || DocumentType::from_path(path).is_none() {
            result.add_warning(format!("{}: not loaded", path.display()));
            ignored += 1;
        }
    }

    if ignored == 0 {
        println!("  ✓ No ignored files");
    } else {
        println!("  ⚠ {ignored} file(s) will not be loaded");
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_config(dir: &Path) -> std::path::PathBuf {
        let config_path = dir.join("folio.toml");
        fs::write(
            &config_path,
            format!(
                "[content]\ndir = \"{}\"\n",
                dir.join("content").display().to_string().replace('\\', "/")
            ),
        )
        .expect("write config");
        config_path
    }

    #[test]
    fn test_check_passes_on_clean_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let projects = dir.path().join("content/projects");
        fs::create_dir_all(&projects).expect("create dir");
        fs::write(
            projects.join("a.mdx"),
            "---\ntitle: A\nsummary: S\nyear: 2020\ncover: /a.png\n---\n",
        )
        .expect("write");

        let config_path = write_config(dir.path());
        assert!(run(&config_path, true).is_ok());
    }

    #[test]
    fn test_check_fails_on_rejected_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let projects = dir.path().join("content/projects");
        fs::create_dir_all(&projects).expect("create dir");
        fs::write(projects.join("bad.mdx"), "---\ntitle: No summary\n---\n").expect("write");

        let config_path = write_config(dir.path());
        let err = run(&config_path, false).unwrap_err();
        assert!(err.to_string().contains("1 error"));
    }

    #[test]
    fn test_strict_fails_on_warnings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let projects = dir.path().join("content/projects");
        fs::create_dir_all(&projects).expect("create dir");
        fs::write(projects.join("a.mdx"), "---\ntitle: A\nsummary: S\nyear: 2020\n---\n")
            .expect("write");
        fs::write(projects.join("notes.txt"), "scratch").expect("write");

        let config_path = write_config(dir.path());
        assert!(run(&config_path, false).is_ok());
        let err = run(&config_path, true).unwrap_err();
        assert!(err.to_string().contains("strict mode"));
    }

    #[test]
    fn test_lint_entry() {
        let dir = tempfile::tempdir().expect("tempdir");
        let projects = dir.path().join("projects");
        fs::create_dir_all(&projects).expect("create dir");
        fs::write(
            projects.join("a.mdx"),
            "---\ntitle: A\nsummary: S\nyear: 2099\nsocialMediaSections:\n  - title: Feed\n    images: [/a.png]\n    captions: [one, two]\n---\n",
        )
        .expect("write");

        let loader = ContentLoader::new(dir.path()).with_current_year(2025);
        let entries = loader
            .list_entries(ContentKind::Projects, folio_core::SortKey::Newest)
            .expect("list");
        let warnings = lint_entry(&entries[0], 2025);

        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.contains("future")));
        assert!(warnings.iter().any(|w| w.contains("2 captions for 1 images")));
    }
}
