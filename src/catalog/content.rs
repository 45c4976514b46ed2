use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::info;

use super::Catalog;
use crate::error::CatalogError;
use crate::model::{
    Article, ArticleDraft, Category, EntityId, EntityKind, Recipe, RecipeDraft, Region, Tag,
    META_DESCRIPTION_MAX, META_TITLE_MAX,
};
use crate::slug::backfill;

/// Timestamps for a write: creation time is kept, `updated_at` never moves
/// backwards and never precedes `created_at`.
fn stamp(
    now: DateTime<Utc>,
    previous: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    match previous {
        Some((created_at, updated_at)) => (created_at, now.max(updated_at).max(created_at)),
        None => (now, now),
    }
}

impl Catalog {
    async fn resolve_region(&self, slug: &str) -> Result<Region, CatalogError> {
        self.store
            .region(slug)
            .await?
            .ok_or_else(|| CatalogError::not_found(EntityKind::Region.as_str(), slug))
    }

    async fn resolve_category(&self, slug: &str) -> Result<Category, CatalogError> {
        self.store
            .category(slug)
            .await?
            .ok_or_else(|| CatalogError::not_found(EntityKind::Category.as_str(), slug))
    }

    /// Look up tags by slug, ignoring duplicates
    async fn resolve_tags(&self, slugs: &[String]) -> Result<Vec<Tag>, CatalogError> {
        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        for slug in slugs {
            if !seen.insert(slug.as_str()) {
                continue;
            }
            let tag = self
                .store
                .tag(slug)
                .await?
                .ok_or_else(|| CatalogError::not_found(EntityKind::Tag.as_str(), slug.as_str()))?;
            tags.push(tag);
        }
        Ok(tags)
    }

    pub async fn create_recipe(&self, draft: RecipeDraft) -> Result<Recipe, CatalogError> {
        draft.validate()?;
        let slug = self
            .assign_slug(EntityKind::Recipe, &draft.slug, &draft.title, None)
            .await?;
        let recipe = self.compose_recipe(draft, 0, slug, None).await?;
        let saved = self.store.save_recipe(recipe).await?;
        info!("Created recipe '{}' ({})", saved.slug, saved.id);
        Ok(saved)
    }

    /// Replace the recipe stored under `slug` with `draft`.
    ///
    /// Start from `RecipeDraft::from(&recipe)` to keep the fields you are
    /// not changing.
    pub async fn update_recipe(
        &self,
        slug: &str,
        draft: RecipeDraft,
    ) -> Result<Recipe, CatalogError> {
        draft.validate()?;
        let existing = self
            .store
            .recipe(slug)
            .await?
            .ok_or_else(|| CatalogError::not_found(EntityKind::Recipe.as_str(), slug))?;
        let new_slug = self
            .update_slug(
                EntityKind::Recipe,
                &existing.slug,
                &draft.slug,
                &draft.title,
                existing.id,
            )
            .await?;
        let recipe = self
            .compose_recipe(
                draft,
                existing.id,
                new_slug,
                Some((existing.created_at, existing.updated_at)),
            )
            .await?;
        let saved = self.store.save_recipe(recipe).await?;
        info!("Updated recipe '{}' ({})", saved.slug, saved.id);
        Ok(saved)
    }

    async fn compose_recipe(
        &self,
        draft: RecipeDraft,
        id: EntityId,
        slug: String,
        previous: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Recipe, CatalogError> {
        let region = self.resolve_region(&draft.region).await?;
        let category = self.resolve_category(&draft.category).await?;
        let tags = self.resolve_tags(&draft.tags).await?;
        let (created_at, updated_at) = stamp(self.clock.now(), previous);

        let mut meta_title = draft.meta_title;
        let mut meta_description = draft.meta_description;
        backfill(&mut meta_title, &draft.title, META_TITLE_MAX);
        backfill(&mut meta_description, &draft.description, META_DESCRIPTION_MAX);

        Ok(Recipe {
            id,
            title: draft.title,
            slug,
            region,
            category,
            tags,
            description: draft.description,
            history: draft.history,
            cultural_context: draft.cultural_context,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            prep_time: draft.prep_time,
            cook_time: draft.cook_time,
            servings: draft.servings,
            difficulty: draft.difficulty,
            images: draft.images,
            meta_title,
            meta_description,
            created_at,
            updated_at,
            is_published: draft.is_published,
        })
    }

    pub async fn create_article(&self, draft: ArticleDraft) -> Result<Article, CatalogError> {
        draft.validate()?;
        let slug = self
            .assign_slug(EntityKind::Article, &draft.slug, &draft.title, None)
            .await?;
        let article = self.compose_article(draft, 0, slug, None).await?;
        let saved = self.store.save_article(article).await?;
        info!("Created article '{}' ({})", saved.slug, saved.id);
        Ok(saved)
    }

    pub async fn update_article(
        &self,
        slug: &str,
        draft: ArticleDraft,
    ) -> Result<Article, CatalogError> {
        draft.validate()?;
        let existing = self
            .store
            .article(slug)
            .await?
            .ok_or_else(|| CatalogError::not_found(EntityKind::Article.as_str(), slug))?;
        let new_slug = self
            .update_slug(
                EntityKind::Article,
                &existing.slug,
                &draft.slug,
                &draft.title,
                existing.id,
            )
            .await?;
        let article = self
            .compose_article(
                draft,
                existing.id,
                new_slug,
                Some((existing.created_at, existing.updated_at)),
            )
            .await?;
        let saved = self.store.save_article(article).await?;
        info!("Updated article '{}' ({})", saved.slug, saved.id);
        Ok(saved)
    }

    async fn compose_article(
        &self,
        draft: ArticleDraft,
        id: EntityId,
        slug: String,
        previous: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Article, CatalogError> {
        let region = if draft.region.trim().is_empty() {
            None
        } else {
            Some(self.resolve_region(&draft.region).await?)
        };
        let tags = self.resolve_tags(&draft.tags).await?;
        let (created_at, updated_at) = stamp(self.clock.now(), previous);

        let mut meta_title = draft.meta_title;
        let mut meta_description = draft.meta_description;
        backfill(&mut meta_title, &draft.title, META_TITLE_MAX);
        backfill(&mut meta_description, &draft.excerpt, META_DESCRIPTION_MAX);

        Ok(Article {
            id,
            title: draft.title,
            slug,
            article_type: draft.article_type,
            region,
            tags,
            excerpt: draft.excerpt,
            content: draft.content,
            images: draft.images,
            author_name: draft.author_name,
            author_bio: draft.author_bio,
            meta_title,
            meta_description,
            created_at,
            updated_at,
            is_published: draft.is_published,
            featured: draft.featured,
        })
    }
}
