//! Markdown and MDX body renderer using pulldown-cmark.

use std::{borrow::Cow, collections::HashSet};

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use serde::{Deserialize, Serialize};

/// Words read per minute when estimating reading time.
const WORDS_PER_MINUTE: usize = 200;

/// Table of contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub text: String,
    /// Anchor id.
    pub id: String,
}

/// Rendered narrative body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedBody {
    pub html: String,
    pub toc: Vec<TocEntry>,
    pub word_count: usize,
    /// Estimated minutes, at least 1 for a non-empty body.
    pub reading_time: usize,
}

/// Markdown renderer for entry bodies.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    options: Options,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Create a new markdown parser with default options.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Render a document body to HTML with TOC extraction.
    ///
    /// MDX `import`/`export` statements are dropped first.
    pub fn render(&self, body: &str) -> RenderedBody {
        let source = strip_mdx_esm(body);
        let mut events: Vec<Event<'_>> = Parser::new_ext(&source, self.options).collect();

        let toc = assign_heading_ids(&mut events);
        let word_count = count_words(&events);

        let mut html_out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut html_out, events.into_iter());

        RenderedBody {
            html: html_out,
            toc,
            word_count,
            reading_time: reading_time(word_count),
        }
    }
}

/// Give every heading an id and collect the TOC.
///
/// Explicit `{#id}` attributes are kept; generated ids get a numeric suffix
/// when a slug repeats.
fn assign_heading_ids(events: &mut [Event<'_>]) -> Vec<TocEntry> {
    let mut toc = Vec::new();
    let mut used: HashSet<String> = HashSet::new();

    let mut i = 0;
    while i < events.len() {
        let Event::Start(Tag::Heading { level, .. }) = &events[i] else {
            i += 1;
            continue;
        };
        let level = *level as u8;

        let mut text = String::new();
        let mut end = i + 1;
        while end < events.len() && !matches!(events[end], Event::End(TagEnd::Heading(_))) {
            if let Event::Text(t) | Event::Code(t) = &events[end] {
                text.push_str(t);
            }
            end += 1;
        }

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            let anchor = id
                .get_or_insert_with(|| CowStr::from(unique_id(slugify(&text), &used)))
                .to_string();
            used.insert(anchor.clone());
            toc.push(TocEntry {
                level,
                text,
                id: anchor,
            });
        }

        i = end + 1;
    }

    toc
}

fn unique_id(base: String, used: &HashSet<String>) -> String {
    let base = if base.is_empty() {
        "section".to_string()
    } else {
        base
    };
    let mut candidate = base.clone();
    let mut suffix = 1;
    while used.contains(&candidate) {
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }
    candidate
}

fn count_words(events: &[Event<'_>]) -> usize {
    let mut in_code = false;
    let mut words = 0;
    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code = true,
            Event::End(TagEnd::CodeBlock) => in_code = false,
            Event::Text(text) | Event::Code(text) if !in_code => {
                words += text.split_whitespace().count();
            }
            _ => {}
        }
    }
    words
}

fn reading_time(words: usize) -> usize {
    if words == 0 {
        0
    } else {
        words.div_ceil(WORDS_PER_MINUTE)
    }
}

/// Remove top-level MDX `import`/`export` statements.
///
/// Lines inside fenced code blocks are left alone. A statement that opens a
/// brace list continues until the closing brace.
pub fn strip_mdx_esm(body: &str) -> Cow<'_, str> {
    let mut out = String::with_capacity(body.len());
    let mut fence: Option<&str> = None;
    let mut in_statement = false;
    let mut stripped = false;

    for line in body.split_inclusive('\n') {
        let trimmed = line.trim_start();

        if let Some(marker) = fence {
            if trimmed.starts_with(marker) {
                fence = None;
            }
            out.push_str(line);
            continue;
        }

        if in_statement {
            stripped = true;
            if line.contains('}') {
                in_statement = false;
            }
            continue;
        }

        if line.starts_with("import ") || line.starts_with("export ") {
            stripped = true;
            in_statement = line.contains('{') && !line.contains('}');
            continue;
        }

        if trimmed.starts_with("```") {
            fence = Some("```");
        } else if trimmed.starts_with("~~~") {
            fence = Some("~~~");
        }
        out.push_str(line);
    }

    if stripped {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(body)
    }
}

/// Convert text to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple_markdown() {
        let parser = MarkdownParser::new();
        let rendered = parser.render("# Hello World\n\nThis is a test.");

        assert!(rendered.html.contains("<h1 id=\"hello-world\">"));
        assert!(rendered.html.contains("<p>This is a test.</p>"));
        assert_eq!(rendered.word_count, 6);
        assert_eq!(rendered.reading_time, 1);
    }

    #[test]
    fn test_toc_extraction() {
        let parser = MarkdownParser::new();
        let rendered = parser.render("# The Brief\n## Research `v2`\n### Outcome");

        assert_eq!(rendered.toc.len(), 3);
        assert_eq!(rendered.toc[0].level, 1);
        assert_eq!(rendered.toc[0].id, "the-brief");
        assert_eq!(rendered.toc[1].text, "Research v2");
        assert_eq!(rendered.toc[1].id, "research-v2");
        assert_eq!(rendered.toc[2].level, 3);
    }

    #[test]
    fn test_duplicate_headings_get_unique_ids() {
        let parser = MarkdownParser::new();
        let rendered = parser.render("## Process\n\ntext\n\n## Process\n");

        let ids: Vec<_> = rendered.toc.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["process", "process-1"]);
        assert!(rendered.html.contains("id=\"process-1\""));
    }

    #[test]
    fn test_generated_ids_skip_taken_suffixes() {
        let parser = MarkdownParser::new();
        let rendered = parser.render("## Process\n\n## Process\n\n## Process-1\n\n## Process\n");

        let ids: Vec<_> = rendered.toc.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["process", "process-1", "process-1-1", "process-2"]);
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        let parser = MarkdownParser::new();
        let rendered = parser.render("## Results {#outcome}\n");

        assert_eq!(rendered.toc[0].id, "outcome");
        assert!(rendered.html.contains("id=\"outcome\""));
    }

    #[test]
    fn test_strip_mdx_esm() {
        let body = "import Gallery from '../components/gallery'\nimport {\n  A,\n  B,\n} from 'x'\nexport const meta = 1\n\n# Title\n";
        assert_eq!(strip_mdx_esm(body), "\n# Title\n");
    }

    #[test]
    fn test_strip_keeps_code_fences() {
        let body = "```js\nimport x from 'y'\n```\n";
        assert!(matches!(strip_mdx_esm(body), Cow::Borrowed(_)));

        let rendered = MarkdownParser::new().render(body);
        assert!(rendered.html.contains("import x from"));
        assert_eq!(rendered.word_count, 0);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Test 123 Post"), "test-123-post");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("Special!@#Chars"), "specialchars");
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time(0), 0);
        assert_eq!(reading_time(1), 1);
        assert_eq!(reading_time(200), 1);
        assert_eq!(reading_time(201), 2);
    }

    #[test]
    fn test_table_rendering() {
        let parser = MarkdownParser::new();
        let rendered = parser.render(
            r#"| Metric | Result |
|--------|--------|
| Reach  | +40%   |"#,
        );

        assert!(rendered.html.contains("<table>"));
        assert!(rendered.html.contains("<td>"));
    }
}
