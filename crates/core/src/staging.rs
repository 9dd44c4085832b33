//! Staged multi-platform content model.
//!
//! A staging session holds content items (clips, blog posts, images, ...)
//! that must each be prepared for every platform they target. This module
//! owns the field model, per-platform validation, and the aggregate
//! readiness computation that gates progression to scheduling.
//!
//! Derived state (`character_count`, `is_valid`, `validation_errors`) is
//! recomputed from its inputs on every edit, per (item, platform) pair
//! only. Nothing caches a validation verdict independently of the fields
//! it was derived from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::platform::Platform;

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

/// The kind of a staged content item. Determines which fields are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Clip,
    Blog,
    Image,
    Carousel,
    Social,
    Caption,
    Thread,
    Quote,
}

impl ContentType {
    /// Convert to the wire/database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clip => "clip",
            Self::Blog => "blog",
            Self::Image => "image",
            Self::Carousel => "carousel",
            Self::Social => "social",
            Self::Caption => "caption",
            Self::Thread => "thread",
            Self::Quote => "quote",
        }
    }

    /// Convert from a wire/database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "clip" => Ok(Self::Clip),
            "blog" => Ok(Self::Blog),
            "image" => Ok(Self::Image),
            "carousel" => Ok(Self::Carousel),
            "social" => Ok(Self::Social),
            "caption" => Ok(Self::Caption),
            "thread" => Ok(Self::Thread),
            "quote" => Ok(Self::Quote),
            _ => Err(format!(
                "Invalid content type '{s}'. Must be one of: clip, blog, image, carousel, social, caption, thread, quote"
            )),
        }
    }

    /// Visual content needs alt text on every platform.
    pub fn requires_alt_text(&self) -> bool {
        matches!(self, Self::Image | Self::Carousel)
    }
}

// ---------------------------------------------------------------------------
// Per-platform field values
// ---------------------------------------------------------------------------

/// Field values for one content item on one platform.
///
/// `character_count`, `is_valid`, and `validation_errors` are derived;
/// mutate fields through [`PlatformFields::set_caption`] /
/// [`PlatformFields::add_hashtag`] / [`PlatformFields::remove_hashtag`]
/// (or call [`PlatformFields::recompute`] after bulk edits) to keep them
/// consistent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformFields {
    /// Primary text. Rendered under the platform's field alias
    /// (`tweet`, `text`, `description`, ...) but always stored here.
    #[serde(default)]
    pub caption: String,
    /// Hashtags without the `#` prefix, in insertion order.
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Required for image/carousel items.
    #[serde(default)]
    pub alt_text: Option<String>,
    /// Call to action; only meaningful where the platform supports it.
    #[serde(default)]
    pub cta: Option<String>,
    /// Attached link; only meaningful on LinkedIn for blog items.
    #[serde(default)]
    pub link: Option<String>,

    /// Derived: caption length plus rendered hashtag block.
    #[serde(default)]
    pub character_count: usize,
    /// Derived: `character_count <= caption_max` and hashtag count in range.
    #[serde(default = "default_true")]
    pub is_valid: bool,
    /// Derived: human-readable messages when `is_valid` is false.
    #[serde(default)]
    pub validation_errors: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// Total characters consumed by a caption plus its rendered hashtags.
///
/// Hashtags render as `#tag` joined by single spaces, separated from the
/// caption by one character.
pub fn character_count(caption: &str, hashtags: &[String]) -> usize {
    let caption_len = caption.chars().count();
    if hashtags.is_empty() {
        return caption_len;
    }
    let rendered: usize = hashtags
        .iter()
        .map(|tag| 1 + tag.chars().count())
        .sum::<usize>()
        + hashtags.len().saturating_sub(1);
    caption_len + 1 + rendered
}

impl PlatformFields {
    /// Empty fields with derived state consistent for the given platform.
    pub fn new(platform: Platform) -> Self {
        let mut fields = Self::default();
        fields.recompute(platform);
        fields
    }

    /// Recompute `character_count`, `is_valid`, and `validation_errors`.
    ///
    /// Touches only this (item, platform) pair; edits stay O(1) in the
    /// number of staged items.
    pub fn recompute(&mut self, platform: Platform) {
        let limits = platform.limits();
        self.character_count = character_count(&self.caption, &self.hashtags);

        let mut errors = Vec::new();
        if self.character_count > limits.caption_max {
            errors.push(format!(
                "Content exceeds {} limit of {} characters ({}/{})",
                platform.as_str(),
                limits.caption_max,
                self.character_count,
                limits.caption_max,
            ));
        }
        if self.hashtags.len() > limits.hashtag_max {
            errors.push(format!(
                "Too many hashtags for {} (max {})",
                platform.as_str(),
                limits.hashtag_max,
            ));
        }

        self.is_valid = errors.is_empty();
        self.validation_errors = errors;
    }

    /// Replace the caption and recompute derived state.
    pub fn set_caption(&mut self, platform: Platform, caption: impl Into<String>) {
        self.caption = caption.into();
        self.recompute(platform);
    }

    /// Add a hashtag, normalizing away any leading `#` and surrounding
    /// whitespace.
    ///
    /// Rejected (and the field left untouched) when the tag is empty after
    /// normalization, already present, or the platform's hashtag limit is
    /// reached. For platforms with a limit of zero this rejects the first
    /// tag.
    pub fn add_hashtag(&mut self, platform: Platform, tag: &str) -> Result<(), CoreError> {
        let limits = platform.limits();
        let normalized = tag.trim().trim_start_matches('#').to_string();

        if normalized.is_empty() {
            return Err(CoreError::Validation(
                "Hashtag must be a non-empty string".to_string(),
            ));
        }
        if self.hashtags.iter().any(|t| t == &normalized) {
            return Err(CoreError::Validation(format!(
                "Hashtag '{normalized}' is already present"
            )));
        }
        if self.hashtags.len() >= limits.hashtag_max {
            return Err(CoreError::Validation(format!(
                "{} allows at most {} hashtags",
                platform.as_str(),
                limits.hashtag_max,
            )));
        }

        self.hashtags.push(normalized);
        self.recompute(platform);
        Ok(())
    }

    /// Remove a hashtag if present and recompute derived state.
    pub fn remove_hashtag(&mut self, platform: Platform, tag: &str) {
        let normalized = tag.trim().trim_start_matches('#');
        self.hashtags.retain(|t| t != normalized);
        self.recompute(platform);
    }
}

// ---------------------------------------------------------------------------
// Staged content item
// ---------------------------------------------------------------------------

/// One piece of generated content being prepared for publishing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagedContentItem {
    /// Opaque identifier, unique within a staging session.
    pub id: String,
    pub content_type: ContentType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Platforms this item must be prepared for.
    pub platforms: Vec<Platform>,
    /// Per-platform field values, lazily created per targeted platform.
    #[serde(default)]
    pub platform_content: BTreeMap<Platform, PlatformFields>,
    /// Opaque reference to the source content record. Never mutated here.
    #[serde(default)]
    pub original_data: serde_json::Value,
}

impl StagedContentItem {
    /// New item with no platform content yet.
    pub fn new(
        id: impl Into<String>,
        content_type: ContentType,
        title: impl Into<String>,
        platforms: Vec<Platform>,
    ) -> Self {
        Self {
            id: id.into(),
            content_type,
            title: title.into(),
            description: String::new(),
            platforms,
            platform_content: BTreeMap::new(),
            original_data: serde_json::Value::Null,
        }
    }

    /// Get or lazily create the field values for a platform.
    pub fn platform_fields_mut(&mut self, platform: Platform) -> &mut PlatformFields {
        self.platform_content
            .entry(platform)
            .or_insert_with(|| PlatformFields::new(platform))
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Blocking errors for one item, across every platform it targets.
///
/// Per platform, in order: missing caption, character/hashtag limit
/// violations from the derived state, missing alt text for visual types.
pub fn validate_item(item: &StagedContentItem) -> Vec<String> {
    let mut errors = Vec::new();

    for platform in &item.platforms {
        let fields = item.platform_content.get(platform);

        let caption_present = fields
            .map(|f| !f.caption.trim().is_empty())
            .unwrap_or(false);
        if !caption_present {
            errors.push(format!("Missing caption for {}", platform.as_str()));
        }

        if let Some(fields) = fields {
            if !fields.is_valid {
                errors.extend(fields.validation_errors.iter().cloned());
            }
        }

        if item.content_type.requires_alt_text() {
            let alt_present = fields
                .and_then(|f| f.alt_text.as_deref())
                .map(|alt| !alt.trim().is_empty())
                .unwrap_or(false);
            if !alt_present {
                errors.push(format!("Missing alt text for {}", platform.as_str()));
            }
        }
    }

    errors
}

/// Non-blocking recommendations for one item.
///
/// These never affect readiness; they surface alongside blocking errors
/// so the stager can suggest improvements without holding up publishing.
pub fn item_advisories(item: &StagedContentItem) -> Vec<String> {
    let mut advisories = Vec::new();

    for platform in &item.platforms {
        if *platform != Platform::Instagram {
            continue;
        }
        let hashtag_count = item
            .platform_content
            .get(platform)
            .map(|f| f.hashtags.len())
            .unwrap_or(0);
        if hashtag_count < 3 {
            advisories.push(
                "Consider adding at least 3 hashtags for better Instagram reach".to_string(),
            );
        }
    }

    advisories
}

/// Validate every item, returning `item id -> errors` for items that have
/// at least one blocking error.
pub fn validate_all_content(items: &[StagedContentItem]) -> BTreeMap<String, Vec<String>> {
    let mut result = BTreeMap::new();
    for item in items {
        let errors = validate_item(item);
        if !errors.is_empty() {
            result.insert(item.id.clone(), errors);
        }
    }
    result
}

/// Whether an item is fully prepared for every platform it targets.
///
/// Requires, per platform: a `platform_content` entry with a non-empty
/// caption, derived state valid, and alt text present when the content
/// type needs it. Advisories are ignored.
pub fn is_content_ready(item: &StagedContentItem) -> bool {
    item.platforms.iter().all(|platform| {
        let Some(fields) = item.platform_content.get(platform) else {
            return false;
        };
        if fields.caption.trim().is_empty() || !fields.is_valid {
            return false;
        }
        if item.content_type.requires_alt_text() {
            return fields
                .alt_text
                .as_deref()
                .map(|alt| !alt.trim().is_empty())
                .unwrap_or(false);
        }
        true
    })
}

// ---------------------------------------------------------------------------
// Aggregate readiness
// ---------------------------------------------------------------------------

/// Aggregate readiness across a staging session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readiness {
    pub total: usize,
    pub ready: usize,
    /// `round(100 * ready / total)`; 0 for an empty session.
    pub percentage: u8,
}

impl Readiness {
    /// The proceed action is only enabled at 100%.
    pub fn can_proceed(&self) -> bool {
        self.total > 0 && self.percentage == 100
    }
}

/// Full recompute of session readiness. Called after every relevant edit;
/// never cached independently of the items it was derived from.
pub fn compute_readiness(items: &[StagedContentItem]) -> Readiness {
    let total = items.len();
    let ready = items.iter().filter(|item| is_content_ready(item)).count();
    let percentage = if total == 0 {
        0
    } else {
        (ready as f64 / total as f64 * 100.0).round() as u8
    };
    Readiness {
        total,
        ready,
        percentage,
    }
}

/// The first blocking error in item order, for surfacing when the proceed
/// action is rejected.
pub fn first_blocking_error(items: &[StagedContentItem]) -> Option<(String, String)> {
    for item in items {
        if let Some(error) = validate_item(item).into_iter().next() {
            return Some((item.id.clone(), error));
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
