//! Frontmatter parsing for content documents.
//!
//! Portfolio documents are hand-authored, so the raw frontmatter types here
//! accept loose shapes (`"yes"` for a boolean, `"2024"` for a year, a single
//! string where a list is expected). Coercion into strict values happens once,
//! in [`crate::entry::Entry::from_frontmatter`].

use std::path::Path;

use serde::Deserialize;

use crate::error::{CoreError, Result};

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
///
/// The closing delimiter must sit on its own line, so `---` used as a
/// horizontal rule inside the header text does not end it early.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();
    let rest = &content[delimiter.len()..];
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    let after_first = rest.strip_prefix('\n')?;

    let mut offset = 0;
    for line in after_first.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let frontmatter = after_first[..offset].trim();
            let body = after_first[offset + line.len()..].trim_start();
            return Some((format, frontmatter, body));
        }
        offset += line.len();
    }

    None
}

/// A boolean that may be written as `true`, `"yes"`, `1`, or similar.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Flag {
    /// Coerce to a boolean. Unrecognized text is `false`.
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "y" | "on" | "1"
            ),
        }
    }
}

/// A year written as a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl YearValue {
    /// Coerce to a year. Zero, negatives and non-numeric text yield `None`.
    pub fn as_year(&self) -> Option<i32> {
        let year = match self {
            Self::Int(n) => i32::try_from(*n).ok()?,
            Self::Float(f) if f.fract() == 0.0 => *f as i32,
            Self::Float(_) => return None,
            Self::Text(s) => s.trim().parse::<i32>().ok()?,
        };
        (year > 0).then_some(year)
    }
}

/// A scalar that should end up as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl TextValue {
    /// Render the scalar as trimmed text.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// A list that may be written as a single string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextList {
    Many(Vec<TextValue>),
    One(TextValue),
}

impl TextList {
    /// Flatten into non-empty trimmed strings, keeping authored order.
    pub fn into_vec(self) -> Vec<String> {
        let items = match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        };
        items
            .into_iter()
            .map(TextValue::into_text)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Flatten keeping empty items, for lists indexed in parallel with another.
    pub fn into_parallel_vec(self) -> Vec<String> {
        match self {
            Self::Many(items) => items.into_iter().map(TextValue::into_text).collect(),
            Self::One(item) => vec![item.into_text()],
        }
    }
}

/// Raw social media section as authored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSocialSection {
    pub title: Option<TextValue>,
    pub description: Option<TextValue>,
    pub images: Option<TextList>,
    pub captions: Option<TextList>,
}

/// Raw testimonial as authored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTestimonial {
    #[serde(alias = "text")]
    pub quote: Option<TextValue>,
    pub author: Option<TextValue>,
    pub role: Option<TextValue>,
    pub company: Option<TextValue>,
}

/// Frontmatter metadata exactly as authored, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawFrontmatter {
    pub title: Option<TextValue>,
    pub slug: Option<TextValue>,
    pub summary: Option<TextValue>,
    /// Shot spelling of `summary`, used when `summary` is absent.
    pub caption: Option<TextValue>,
    pub year: Option<YearValue>,
    pub category: Option<TextValue>,
    pub role: Option<TextValue>,
    pub duration: Option<TextValue>,
    pub team: Option<TextValue>,
    pub client: Option<TextValue>,

    pub tags: Option<TextList>,
    pub skills: Option<TextList>,
    pub tools: Option<TextList>,

    pub work_type: Option<TextValue>,
    pub organization_work: Option<Flag>,
    pub competition_work: Option<Flag>,
    pub event_work: Option<Flag>,

    pub organization: Option<TextValue>,
    pub organization_type: Option<TextValue>,
    pub competition_name: Option<TextValue>,
    pub competition_category: Option<TextValue>,
    pub event_name: Option<TextValue>,
    pub event_type: Option<TextValue>,
    pub event_role: Option<TextValue>,
    pub event_duration: Option<TextValue>,
    pub event_location: Option<TextValue>,

    pub cover: Option<TextValue>,
    #[serde(rename = "final")]
    pub final_images: Option<TextList>,
    /// Shot spelling of `final`, used when `final` is absent.
    pub images: Option<TextList>,
    pub applications: Option<TextList>,
    pub explorations: Option<TextList>,
    pub social_posts: Option<TextList>,
    pub social_media_sections: Option<Vec<RawSocialSection>>,
    pub campaigns: Option<TextList>,
    pub brand_materials: Option<TextList>,
    pub event_materials: Option<TextList>,
    pub event_documentation: Option<TextList>,
    pub event_promotion: Option<TextList>,

    pub metrics: Option<TextList>,
    pub credits: Option<TextList>,
    pub challenges: Option<TextValue>,
    pub solutions: Option<TextValue>,
    pub impact: Option<TextValue>,
    pub testimonial: Option<RawTestimonial>,

    pub live_url: Option<TextValue>,
    pub github_url: Option<TextValue>,
    pub behance_url: Option<TextValue>,
    pub dribbble_url: Option<TextValue>,
    pub instagram_url: Option<TextValue>,
    pub linkedin_url: Option<TextValue>,

    pub featured: Option<Flag>,
}

/// Parse a document into raw frontmatter and body.
///
/// A document without a frontmatter header yields an empty header and the
/// whole text as body; it will then fail entry validation.
pub fn parse_document(content: &str, path: &Path) -> Result<(RawFrontmatter, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((RawFrontmatter::default(), content.to_string()));
    };

    if fm_str.is_empty() {
        return Ok((RawFrontmatter::default(), body.to_string()));
    }

    let frontmatter: RawFrontmatter = match format {
        FrontmatterFormat::Yaml => {
            serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
        FrontmatterFormat::Toml => {
            toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
    };

    Ok((frontmatter, body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Option<TextValue> {
        Some(TextValue::Text(s.to_string()))
    }

    #[test]
    fn test_split_yaml_frontmatter() {
        let content = r#"---
title: "Hello World"
year: 2024
---

This is the body content."#;

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Yaml);
        assert!(fm.contains("title:"));
        assert!(body.starts_with("This is the body"));
    }

    #[test]
    fn test_split_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\n+++\n\nBody.";

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Toml);
        assert_eq!(fm, "title = \"Hello\"");
        assert_eq!(body, "Body.");
    }

    #[test]
    fn test_split_ignores_inline_dashes() {
        let content = "---\ntitle: a---b\n---\nBody --- with dashes";

        let (_, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(fm, "title: a---b");
        assert_eq!(body, "Body --- with dashes");
    }

    #[test]
    fn test_split_crlf() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody";

        let (_, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(fm, "title: Windows");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_no_frontmatter() {
        assert!(split_frontmatter("Just some content.").is_none());
        assert!(split_frontmatter("---\ntitle: never closed").is_none());
    }

    #[test]
    fn test_parse_camel_case_fields() {
        let content = r#"---
title: Brand Refresh
summary: A new identity
year: 2023
organizationWork: true
organizationType: Student Club
socialMediaSections:
  - title: Launch week
    images: [/a.png, /b.png]
    captions: [First]
testimonial:
  quote: Great work
  author: Dana
---

Body"#;

        let (fm, body) = parse_document(content, Path::new("a.mdx")).expect("parse");
        assert_eq!(fm.title, text("Brand Refresh"));
        assert_eq!(fm.year, Some(YearValue::Int(2023)));
        assert_eq!(fm.organization_work, Some(Flag::Bool(true)));
        assert_eq!(fm.organization_type, text("Student Club"));
        let sections = fm.social_media_sections.expect("sections");
        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections[0].clone().images.map(TextList::into_vec),
            Some(vec!["/a.png".to_string(), "/b.png".to_string()])
        );
        assert_eq!(fm.testimonial.and_then(|t| t.author), text("Dana"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_toml_document() {
        let content = r#"+++
title = "Poster"
summary = "Event poster"
year = "2022"
tags = ["print", "event"]
eventWork = "yes"
+++

Body"#;

        let (fm, _) = parse_document(content, Path::new("poster.md")).expect("parse");
        assert_eq!(fm.year.and_then(|y| y.as_year()), Some(2022));
        assert!(fm.event_work.expect("flag").as_bool());
        assert_eq!(
            fm.tags.map(TextList::into_vec),
            Some(vec!["print".to_string(), "event".to_string()])
        );
    }

    #[test]
    fn test_shot_aliases() {
        let content = r#"---
title: Shot
caption: Quick study
images:
  - /shots/one.png
---
"#;

        let (fm, _) = parse_document(content, Path::new("shot.mdx")).expect("parse");
        assert_eq!(fm.summary, None);
        assert_eq!(fm.caption, text("Quick study"));
        assert_eq!(
            fm.images.map(TextList::into_vec),
            Some(vec!["/shots/one.png".to_string()])
        );
    }

    #[test]
    fn test_field_and_shot_spelling_together() {
        let content = r#"---
title: Shot
summary: Long description
caption: Short
final: [/a.png]
images: [/b.png]
---
"#;

        let (fm, _) = parse_document(content, Path::new("shot.mdx")).expect("parse");
        assert_eq!(fm.summary, text("Long description"));
        assert_eq!(fm.caption, text("Short"));
        assert!(fm.final_images.is_some());
        assert!(fm.images.is_some());
    }

    #[test]
    fn test_loose_shapes() {
        let content = r#"---
title: 404
tags: solo
featured: "Yes"
testimonial:
  text: Lovely
  author: Sam
---
"#;

        let (fm, _) = parse_document(content, Path::new("x.mdx")).expect("parse");
        assert_eq!(fm.title.map(TextValue::into_text), Some("404".to_string()));
        assert_eq!(fm.tags.map(TextList::into_vec), Some(vec!["solo".to_string()]));
        assert!(fm.featured.expect("featured").as_bool());
        assert_eq!(fm.testimonial.and_then(|t| t.quote), text("Lovely"));
    }

    #[test]
    fn test_invalid_yaml_is_frontmatter_error() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let err = parse_document(content, Path::new("broken.mdx")).unwrap_err();
        assert!(matches!(err, CoreError::Frontmatter { .. }));
        assert!(err.to_string().contains("broken.mdx"));
    }

    #[test]
    fn test_document_without_header() {
        let (fm, body) = parse_document("# Only body", Path::new("x.md")).expect("parse");
        assert_eq!(fm, RawFrontmatter::default());
        assert_eq!(body, "# Only body");
    }

    #[test]
    fn test_year_value_coercion() {
        assert_eq!(YearValue::Int(2024).as_year(), Some(2024));
        assert_eq!(YearValue::Float(2021.0).as_year(), Some(2021));
        assert_eq!(YearValue::Text(" 2020 ".into()).as_year(), Some(2020));
        assert_eq!(YearValue::Text("soon".into()).as_year(), None);
        assert_eq!(YearValue::Int(0).as_year(), None);
    }

    #[test]
    fn test_flag_coercion() {
        assert!(Flag::Bool(true).as_bool());
        assert!(Flag::Int(1).as_bool());
        assert!(Flag::Text("on".into()).as_bool());
        assert!(!Flag::Text("nope".into()).as_bool());
        assert!(!Flag::Int(0).as_bool());
    }
}
