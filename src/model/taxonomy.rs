use serde::{Deserialize, Serialize};

use super::EntityId;

/// A country or culinary region recipes and articles are classified under.
///
/// Deleting a region deletes every recipe and article that references it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A dish category such as "Main Dishes" or "Soups".
///
/// Deleting a category deletes every recipe in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

/// A free-form label attached to recipes and articles. Deleting a tag only
/// detaches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

/// Input for creating or updating any taxonomy entity.
///
/// An empty `slug` is derived from `name`. `image` is only kept for regions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyDraft {
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl TaxonomyDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl From<&Region> for TaxonomyDraft {
    fn from(region: &Region) -> Self {
        Self {
            name: region.name.clone(),
            slug: region.slug.clone(),
            description: region.description.clone(),
            image: region.image.clone(),
        }
    }
}

impl From<&Category> for TaxonomyDraft {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            image: None,
        }
    }
}

impl From<&Tag> for TaxonomyDraft {
    fn from(tag: &Tag) -> Self {
        Self {
            name: tag.name.clone(),
            slug: tag.slug.clone(),
            description: tag.description.clone(),
            image: None,
        }
    }
}
