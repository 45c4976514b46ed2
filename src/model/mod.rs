//! Catalog data model: taxonomy, content entities and submissions.
//!
//! Content entities embed snapshots of the taxonomy rows they reference.
//! Stores rebuild those snapshots from the live rows on every read, so a
//! renamed region shows up under its new name everywhere.

mod article;
mod recipe;
mod submission;
mod taxonomy;

pub use article::{Article, ArticleDraft, ArticleType};
pub use recipe::{Difficulty, Recipe, RecipeDraft};
pub use submission::{ContactSubmission, SubmissionDraft, SubmissionType};
pub use taxonomy::{Category, Region, Tag, TaxonomyDraft};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Storage-assigned identifier. `0` marks an entity that was never saved.
pub type EntityId = u64;

pub(crate) const META_TITLE_MAX: usize = 60;
pub(crate) const META_DESCRIPTION_MAX: usize = 160;

/// Kinds of stored entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Region,
    Category,
    Tag,
    Recipe,
    Article,
    Submission,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Region => "region",
            EntityKind::Category => "category",
            EntityKind::Tag => "tag",
            EntityKind::Recipe => "recipe",
            EntityKind::Article => "article",
            EntityKind::Submission => "submission",
        }
    }
}

/// Image references for a content entity.
///
/// The featured image is required; the gallery holds the optional extra
/// slots (three for recipes, two for articles).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaSlots {
    pub featured: String,
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl MediaSlots {
    pub fn new(featured: impl Into<String>) -> Self {
        Self {
            featured: featured.into(),
            gallery: Vec::new(),
        }
    }

    /// Number of filled slots, featured image included
    pub fn len(&self) -> usize {
        usize::from(!self.featured.is_empty()) + self.gallery.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn validate(&self, gallery_slots: usize) -> Result<(), CatalogError> {
        if self.featured.trim().is_empty() {
            return Err(CatalogError::validation("a featured image is required"));
        }
        if self.gallery.len() > gallery_slots {
            return Err(CatalogError::validation(format!(
                "at most {} gallery images are allowed, got {}",
                gallery_slots,
                self.gallery.len()
            )));
        }
        Ok(())
    }
}

/// Common view over recipes and articles used by filtering, search,
/// metadata and the sitemap.
pub trait CatalogEntry {
    fn id(&self) -> EntityId;
    fn title(&self) -> &str;
    fn slug(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
    fn is_published(&self) -> bool;
    fn region(&self) -> Option<&Region>;
    fn tags(&self) -> &[Tag];
    /// Fields tested by the free-text criterion, in order
    fn text_fields(&self) -> [&str; 3];
}

pub(crate) fn require(field: &str, value: &str) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        Err(CatalogError::validation(format!("{} is required", field)))
    } else {
        Ok(())
    }
}

pub(crate) fn check_max_chars(field: &str, value: &str, max: usize) -> Result<(), CatalogError> {
    let count = value.chars().count();
    if count > max {
        Err(CatalogError::validation(format!(
            "{} must be at most {} characters, got {}",
            field, max, count
        )))
    } else {
        Ok(())
    }
}
