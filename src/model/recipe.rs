use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    check_max_chars, require, CatalogEntry, Category, EntityId, MediaSlots, Region, Tag,
    META_DESCRIPTION_MAX, META_TITLE_MAX,
};
use crate::error::CatalogError;

const RECIPE_GALLERY_SLOTS: usize = 3;

/// How demanding a recipe is to cook
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Parse a stored token. Unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == token)
    }

    /// `(token, label)` pairs for filter menus
    pub fn choices() -> Vec<(&'static str, &'static str)> {
        Self::ALL.iter().map(|d| (d.as_str(), d.label())).collect()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A published or draft recipe with its resolved taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: EntityId,
    pub title: String,
    pub slug: String,
    pub region: Region,
    pub category: Category,
    pub tags: Vec<Tag>,

    pub description: String,
    pub history: String,
    pub cultural_context: String,

    pub ingredients: String,
    pub instructions: String,
    /// Minutes
    pub prep_time: u32,
    /// Minutes
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,

    pub images: MediaSlots,

    pub meta_title: String,
    pub meta_description: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_published: bool,
}

impl Recipe {
    /// Preparation plus cooking time in minutes
    pub fn total_time(&self) -> u64 {
        u64::from(self.prep_time) + u64::from(self.cook_time)
    }
}

impl CatalogEntry for Recipe {
    fn id(&self) -> EntityId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn is_published(&self) -> bool {
        self.is_published
    }

    fn region(&self) -> Option<&Region> {
        Some(&self.region)
    }

    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn text_fields(&self) -> [&str; 3] {
        [&self.title, &self.description, &self.ingredients]
    }
}

/// Editable recipe fields. Taxonomy is referenced by slug.
///
/// Empty `slug`, `meta_title` and `meta_description` are filled in when the
/// recipe is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeDraft {
    pub title: String,
    pub slug: String,
    pub region: String,
    pub category: String,
    pub tags: Vec<String>,
    pub description: String,
    pub history: String,
    pub cultural_context: String,
    pub ingredients: String,
    pub instructions: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub images: MediaSlots,
    pub meta_title: String,
    pub meta_description: String,
    pub is_published: bool,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            region: String::new(),
            category: String::new(),
            tags: Vec::new(),
            description: String::new(),
            history: String::new(),
            cultural_context: String::new(),
            ingredients: String::new(),
            instructions: String::new(),
            prep_time: 0,
            cook_time: 0,
            servings: 1,
            difficulty: Difficulty::default(),
            images: MediaSlots::default(),
            meta_title: String::new(),
            meta_description: String::new(),
            is_published: true,
        }
    }
}

impl RecipeDraft {
    pub fn new(
        title: impl Into<String>,
        region: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            region: region.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    /// Check field-level constraints that do not need the store
    pub fn validate(&self) -> Result<(), CatalogError> {
        require("title", &self.title)?;
        require("region", &self.region)?;
        require("category", &self.category)?;
        if self.servings == 0 {
            return Err(CatalogError::validation("servings must be positive"));
        }
        self.images.validate(RECIPE_GALLERY_SLOTS)?;
        check_max_chars("meta_title", &self.meta_title, META_TITLE_MAX)?;
        check_max_chars("meta_description", &self.meta_description, META_DESCRIPTION_MAX)
    }
}

impl From<&Recipe> for RecipeDraft {
    fn from(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            slug: recipe.slug.clone(),
            region: recipe.region.slug.clone(),
            category: recipe.category.slug.clone(),
            tags: recipe.tags.iter().map(|t| t.slug.clone()).collect(),
            description: recipe.description.clone(),
            history: recipe.history.clone(),
            cultural_context: recipe.cultural_context.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            servings: recipe.servings,
            difficulty: recipe.difficulty,
            images: recipe.images.clone(),
            meta_title: recipe.meta_title.clone(),
            meta_description: recipe.meta_description.clone(),
            is_published: recipe.is_published,
        }
    }
}
