//! Storage collaborator abstraction.
//!
//! The catalog persists through [`CatalogStore`]. A store must keep slugs
//! unique per entity type, cascade region/category deletion to dependent
//! content in one atomic step, and hand back content entities with their
//! taxonomy snapshots rebuilt from the live rows.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::filter::{ArticleFilter, RecipeFilter};
use crate::model::{
    Article, Category, ContactSubmission, EntityId, EntityKind, Recipe, Region, Tag,
};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Record not found
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// Another record of the same type already uses this slug
    #[error("Duplicate {kind} slug: {slug}")]
    DuplicateEntry { kind: &'static str, slug: String },

    /// A cascade delete could not be completed as a whole; nothing was removed
    #[error("Cascade delete could not complete: {0}")]
    CascadeFailed(String),

    /// The write is not allowed for this record
    #[error("Rejected write: {0}")]
    Rejected(String),

    /// Other unexpected errors
    #[error("Unexpected storage error: {0}")]
    Other(String),
}

impl StorageError {
    pub(crate) fn not_found(kind: EntityKind, key: impl ToString) -> Self {
        StorageError::NotFound {
            kind: kind.as_str(),
            key: key.to_string(),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// What a taxonomy deletion removed or detached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeSummary {
    pub recipes: usize,
    pub articles: usize,
}

/// Trait for catalog storage backends.
///
/// Saving an entity with id `0` inserts it and assigns an id; any other id
/// updates the existing row. Each save touches one row plus its tag links.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Get the backend name (e.g., "memory", "postgres")
    fn backend_name(&self) -> &str;

    async fn save_region(&self, region: Region) -> StorageResult<Region>;
    async fn save_category(&self, category: Category) -> StorageResult<Category>;
    async fn save_tag(&self, tag: Tag) -> StorageResult<Tag>;

    async fn region(&self, slug: &str) -> StorageResult<Option<Region>>;
    async fn category(&self, slug: &str) -> StorageResult<Option<Category>>;
    async fn tag(&self, slug: &str) -> StorageResult<Option<Tag>>;

    /// All regions ordered by name
    async fn regions(&self) -> StorageResult<Vec<Region>>;
    /// All categories ordered by name
    async fn categories(&self) -> StorageResult<Vec<Category>>;
    /// All tags ordered by name
    async fn tags(&self) -> StorageResult<Vec<Tag>>;

    /// Delete a region together with every recipe and article referencing it.
    ///
    /// # Errors
    /// Returns `StorageError::CascadeFailed` if the whole cascade cannot be
    /// applied; in that case nothing is deleted.
    async fn delete_region(&self, slug: &str) -> StorageResult<CascadeSummary>;

    /// Delete a category together with every recipe in it
    async fn delete_category(&self, slug: &str) -> StorageResult<CascadeSummary>;

    /// Delete a tag and detach it from all content
    async fn delete_tag(&self, slug: &str) -> StorageResult<CascadeSummary>;

    /// Whether `slug` is used by an entity of `kind` other than `except`
    async fn slug_taken(
        &self,
        kind: EntityKind,
        slug: &str,
        except: Option<EntityId>,
    ) -> StorageResult<bool>;

    async fn save_recipe(&self, recipe: Recipe) -> StorageResult<Recipe>;
    async fn recipe(&self, slug: &str) -> StorageResult<Option<Recipe>>;
    /// Every recipe, published or not
    async fn recipes(&self) -> StorageResult<Vec<Recipe>>;

    /// Published recipes matching `filter`, newest first.
    ///
    /// Backends with indexes should override this and push the criteria down.
    async fn find_recipes(&self, filter: &RecipeFilter) -> StorageResult<Vec<Recipe>> {
        Ok(filter.apply(self.recipes().await?))
    }

    async fn save_article(&self, article: Article) -> StorageResult<Article>;
    async fn article(&self, slug: &str) -> StorageResult<Option<Article>>;
    /// Every article, published or not
    async fn articles(&self) -> StorageResult<Vec<Article>>;

    /// Published articles matching `filter`, newest first
    async fn find_articles(&self, filter: &ArticleFilter) -> StorageResult<Vec<Article>> {
        Ok(filter.apply(self.articles().await?))
    }

    /// Insert a new submission. Submissions are never rewritten.
    async fn insert_submission(
        &self,
        submission: ContactSubmission,
    ) -> StorageResult<ContactSubmission>;

    async fn set_submission_processed(
        &self,
        id: EntityId,
        processed: bool,
    ) -> StorageResult<ContactSubmission>;

    async fn submissions(&self) -> StorageResult<Vec<ContactSubmission>>;
}
