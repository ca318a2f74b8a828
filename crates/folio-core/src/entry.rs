//! Normalized portfolio entries.

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    frontmatter::{Flag, RawFrontmatter, RawSocialSection, RawTestimonial, TextList, TextValue},
};

/// Category assigned to entries that do not name one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Kind of content, one directory per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Case studies under `content/projects`.
    Projects,
    /// Gallery shots under `content/shots`.
    Shots,
}

impl ContentKind {
    /// All known kinds.
    pub const ALL: [Self; 2] = [Self::Projects, Self::Shots];

    /// Directory name below the content root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Shots => "shots",
        }
    }

    /// Singular noun for messages.
    pub fn singular(&self) -> &'static str {
        match self {
            Self::Projects => "project",
            Self::Shots => "shot",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "projects" | "project" => Ok(Self::Projects),
            "shots" | "shot" => Ok(Self::Shots),
            other => Err(format!("unknown content kind: {other}")),
        }
    }
}

/// File formats accepted as content documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// MDX documents (.mdx files).
    Mdx,
    /// Markdown documents (.md files).
    Markdown,
}

impl DocumentType {
    /// Determine document type from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mdx" => Some(Self::Mdx),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Determine document type from a path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Get the file extension for this document type.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mdx => "mdx",
            Self::Markdown => "md",
        }
    }
}

/// Nature of a piece of work.
///
/// Documents may set several legacy `*Work` flags at once; they collapse to
/// one variant with the priority event > competition > organization.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    /// Plain project or personal work.
    #[default]
    Project,
    /// Work done for an organization.
    Organization,
    /// Competition entry.
    Competition,
    /// Event work.
    Event,
}

impl WorkType {
    /// All work types in display order.
    pub const ALL: [Self; 4] = [
        Self::Project,
        Self::Organization,
        Self::Competition,
        Self::Event,
    ];

    /// Human label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Organization => "Organization Work",
            Self::Competition => "Competition Entry",
            Self::Event => "Event Work",
        }
    }

    /// Resolve from legacy flags.
    pub fn from_flags(organization: bool, competition: bool, event: bool) -> Self {
        if event {
            Self::Event
        } else if competition {
            Self::Competition
        } else if organization {
            Self::Organization
        } else {
            Self::Project
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Project => "project",
            Self::Organization => "organization",
            Self::Competition => "competition",
            Self::Event => "event",
        };
        f.write_str(name)
    }
}

impl FromStr for WorkType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "project" | "projects" | "personal" => Ok(Self::Project),
            "organization" | "organisation" | "org" => Ok(Self::Organization),
            "competition" => Ok(Self::Competition),
            "event" => Ok(Self::Event),
            other => Err(format!("unknown work type: {other}")),
        }
    }
}

/// Organization details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDetails {
    pub name: String,
    pub kind: String,
}

/// Competition details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionDetails {
    pub name: String,
    pub category: String,
}

/// Event details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub name: String,
    pub kind: String,
    pub role: String,
    pub duration: String,
    pub location: String,
}

/// Named group of images with parallel captions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaSection {
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    /// Caption `i` describes image `i`; may be shorter than `images`.
    pub captions: Vec<String>,
}

impl SocialMediaSection {
    /// Caption for the image at `index`, if one was written.
    pub fn caption_for(&self, index: usize) -> Option<&str> {
        self.captions
            .get(index)
            .map(String::as_str)
            .filter(|c| !c.is_empty())
    }

    fn from_raw(raw: RawSocialSection) -> Self {
        Self {
            title: text(raw.title),
            description: text(raw.description),
            images: list(raw.images),
            captions: raw
                .captions
                .map(TextList::into_parallel_vec)
                .unwrap_or_default(),
        }
    }
}

/// Quote from a client or collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl Testimonial {
    fn from_raw(raw: RawTestimonial) -> Option<Self> {
        let quote = text(raw.quote);
        let author = text(raw.author);
        if quote.is_empty() || author.is_empty() {
            return None;
        }
        Some(Self {
            quote,
            author,
            role: Some(text(raw.role)).filter(|s| !s.is_empty()),
            company: Some(text(raw.company)).filter(|s| !s.is_empty()),
        })
    }
}

/// Image collections of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub cover: String,
    #[serde(rename = "final")]
    pub final_images: Vec<String>,
    pub applications: Vec<String>,
    pub explorations: Vec<String>,
    pub social_posts: Vec<String>,
    pub social_media_sections: Vec<SocialMediaSection>,
    pub campaigns: Vec<String>,
    pub brand_materials: Vec<String>,
    pub event_materials: Vec<String>,
    pub event_documentation: Vec<String>,
    pub event_promotion: Vec<String>,
}

/// External links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Links {
    pub live_url: String,
    pub github_url: String,
    pub behance_url: String,
    pub dribbble_url: String,
    pub instagram_url: String,
    pub linkedin_url: String,
}

/// Gallery section an image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GallerySection {
    Final,
    Applications,
    Explorations,
    SocialPosts,
    SocialMedia,
    Campaigns,
    BrandMaterials,
    EventMaterials,
    EventDocumentation,
    EventPromotion,
}

/// One image in a merged gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub section: GallerySection,
    /// Title of the social media section, when the image came from one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// A normalized portfolio work item.
///
/// Every optional field is present: strings default to empty and lists to
/// empty vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub kind: ContentKind,
    pub slug: String,
    /// Source file name within the kind directory.
    pub file: String,

    pub title: String,
    pub summary: String,
    pub year: i32,
    pub category: String,
    pub role: String,
    pub duration: String,
    pub team: String,
    pub client: String,

    pub tags: Vec<String>,
    pub skills: Vec<String>,
    pub tools: Vec<String>,

    pub work_type: WorkType,
    pub organization: OrganizationDetails,
    pub competition: CompetitionDetails,
    pub event: EventDetails,

    pub media: Media,

    pub challenges: String,
    pub solutions: String,
    pub impact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonial: Option<Testimonial>,
    pub metrics: Vec<String>,
    pub credits: Vec<String>,

    pub links: Links,
    pub featured: bool,
}

/// Whether `slug` can name an entry: non-empty, no path separators, no
/// leading dot.
pub fn is_plain_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\'])
}

/// Defaults applied while normalizing frontmatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Category for entries without one.
    pub default_category: String,
    /// Year for entries without a usable one.
    pub default_year: i32,
}

impl NormalizeOptions {
    /// Options with the default category and the given fallback year.
    pub fn with_year(default_year: i32) -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
            default_year,
        }
    }
}

impl Entry {
    /// Normalize raw frontmatter into an entry.
    ///
    /// `path` is the document path; its file stem becomes the slug unless
    /// the frontmatter names one. Fails when `title` or `summary` is empty.
    pub fn from_frontmatter(
        kind: ContentKind,
        fm: RawFrontmatter,
        path: &Path,
        options: &NormalizeOptions,
    ) -> Result<Self> {
        let work_type = resolve_work_type(&fm, path);

        let title = text(fm.title);
        if title.is_empty() {
            return Err(CoreError::invalid_entry(path, "title is required"));
        }
        let summary = Some(text(fm.summary))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| text(fm.caption));
        if summary.is_empty() {
            return Err(CoreError::invalid_entry(path, "summary is required"));
        }

        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let slug = Some(text(fm.slug))
            .filter(|s| !s.is_empty())
            .or_else(|| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
            })
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CoreError::invalid_entry(path, "cannot derive slug"))?;
        if !is_plain_slug(&slug) {
            return Err(CoreError::invalid_entry(
                path,
                format!("slug \"{slug}\" must not contain path separators or start with a dot"),
            ));
        }

        let year = match fm.year {
            Some(value) => value.as_year().unwrap_or_else(|| {
                tracing::debug!(path = %path.display(), ?value, "unusable year, using default");
                options.default_year
            }),
            None => options.default_year,
        };

        let tags = list(fm.tags);
        let featured = flag(fm.featured) || tags.iter().any(|t| t.eq_ignore_ascii_case("featured"));

        Ok(Self {
            kind,
            slug,
            file,
            title,
            summary,
            year,
            category: Some(text(fm.category))
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| options.default_category.clone()),
            role: text(fm.role),
            duration: text(fm.duration),
            team: text(fm.team),
            client: text(fm.client),
            tags,
            skills: list(fm.skills),
            tools: list(fm.tools),
            work_type,
            organization: OrganizationDetails {
                name: text(fm.organization),
                kind: text(fm.organization_type),
            },
            competition: CompetitionDetails {
                name: text(fm.competition_name),
                category: text(fm.competition_category),
            },
            event: EventDetails {
                name: text(fm.event_name),
                kind: text(fm.event_type),
                role: text(fm.event_role),
                duration: text(fm.event_duration),
                location: text(fm.event_location),
            },
            media: Media {
                cover: text(fm.cover),
                final_images: Some(list(fm.final_images))
                    .filter(|images| !images.is_empty())
                    .unwrap_or_else(|| list(fm.images)),
                applications: list(fm.applications),
                explorations: list(fm.explorations),
                social_posts: list(fm.social_posts),
                social_media_sections: fm
                    .social_media_sections
                    .unwrap_or_default()
                    .into_iter()
                    .map(SocialMediaSection::from_raw)
                    .collect(),
                campaigns: list(fm.campaigns),
                brand_materials: list(fm.brand_materials),
                event_materials: list(fm.event_materials),
                event_documentation: list(fm.event_documentation),
                event_promotion: list(fm.event_promotion),
            },
            challenges: text(fm.challenges),
            solutions: text(fm.solutions),
            impact: text(fm.impact),
            testimonial: fm.testimonial.and_then(Testimonial::from_raw),
            metrics: list(fm.metrics),
            credits: list(fm.credits),
            links: Links {
                live_url: text(fm.live_url),
                github_url: text(fm.github_url),
                behance_url: text(fm.behance_url),
                dribbble_url: text(fm.dribbble_url),
                instagram_url: text(fm.instagram_url),
                linkedin_url: text(fm.linkedin_url),
            },
            featured,
        })
    }

    /// Whether this entry has the given tag (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether this entry lists the given skill (exact match).
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    /// Every image of the entry in one list.
    ///
    /// Sections follow the order a detail page shows them; social media
    /// images carry the caption at their index.
    pub fn gallery(&self) -> Vec<GalleryImage> {
        let m = &self.media;
        let plain = [
            (GallerySection::Final, &m.final_images),
            (GallerySection::Applications, &m.applications),
            (GallerySection::Explorations, &m.explorations),
            (GallerySection::SocialPosts, &m.social_posts),
        ];
        let trailing = [
            (GallerySection::Campaigns, &m.campaigns),
            (GallerySection::BrandMaterials, &m.brand_materials),
            (GallerySection::EventMaterials, &m.event_materials),
            (GallerySection::EventDocumentation, &m.event_documentation),
            (GallerySection::EventPromotion, &m.event_promotion),
        ];

        let social = m.social_media_sections.iter().flat_map(|s| {
            let group = Some(s.title.clone()).filter(|t| !t.is_empty());
            s.images.iter().enumerate().map(move |(i, src)| GalleryImage {
                section: GallerySection::SocialMedia,
                group: group.clone(),
                src: src.clone(),
                caption: s.caption_for(i).map(str::to_string),
            })
        });

        plain
            .into_iter()
            .flat_map(|(section, images)| uncaptioned(section, images))
            .chain(social)
            .chain(
                trailing
                    .into_iter()
                    .flat_map(|(section, images)| uncaptioned(section, images)),
            )
            .collect()
    }
}

fn uncaptioned(
    section: GallerySection,
    images: &[String],
) -> impl Iterator<Item = GalleryImage> + '_ {
    images.iter().map(move |src| GalleryImage {
        section,
        group: None,
        src: src.clone(),
        caption: None,
    })
}

fn resolve_work_type(fm: &RawFrontmatter, path: &Path) -> WorkType {
    if let Some(explicit) = fm.work_type.clone().map(TextValue::into_text)
        && !explicit.is_empty()
    {
        match explicit.parse::<WorkType>() {
            Ok(work_type) => return work_type,
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring workType"),
        }
    }

    let organization = flag(fm.organization_work.clone());
    let competition = flag(fm.competition_work.clone());
    let event = flag(fm.event_work.clone());

    let set = [organization, competition, event]
        .iter()
        .filter(|f| **f)
        .count();
    let resolved = WorkType::from_flags(organization, competition, event);
    if set > 1 {
        tracing::warn!(
            path = %path.display(),
            resolved = %resolved,
            "multiple work-type flags set, using highest priority"
        );
    }
    resolved
}

fn text(value: Option<TextValue>) -> String {
    value.map(TextValue::into_text).unwrap_or_default()
}

fn list(value: Option<TextList>) -> Vec<String> {
    value.map(TextList::into_vec).unwrap_or_default()
}

fn flag(value: Option<Flag>) -> bool {
    value.is_some_and(|f| f.as_bool())
}
