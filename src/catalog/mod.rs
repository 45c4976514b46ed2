//! The catalog service.
//!
//! [`Catalog`] wires the pure engines (slugs, filtering, search, pagination,
//! sitemap) to the storage and notification collaborators. Build one with
//! [`crate::CatalogBuilder`].

mod content;
mod views;

pub use views::{
    ActiveCriteria, ArticleDetail, ArticleListing, FrontPage, RecipeDetail, RecipeListing,
    RegionOverview,
};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::config::{CatalogConfig, SlugCollision};
use crate::error::CatalogError;
use crate::model::{
    require, Category, ContactSubmission, EntityId, EntityKind, Region, SubmissionDraft, Tag,
    TaxonomyDraft,
};
use crate::notify::Notifier;
use crate::slug::{resolve_slug, with_suffix};
use crate::storage::{CascadeSummary, CatalogStore};

/// Source of "now" for timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct Catalog {
    store: Arc<dyn CatalogStore>,
    notifier: Arc<dyn Notifier>,
    config: CatalogConfig,
    clock: Arc<dyn Clock>,
}

impl Catalog {
    pub(crate) fn new(
        store: Arc<dyn CatalogStore>,
        notifier: Arc<dyn Notifier>,
        config: CatalogConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            notifier,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// The storage collaborator behind this catalog
    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    /// Pick a free slug for an entity of `kind`.
    ///
    /// `except` is the entity's own id on update, so keeping a slug never
    /// collides with itself.
    async fn assign_slug(
        &self,
        kind: EntityKind,
        explicit: &str,
        title: &str,
        except: Option<EntityId>,
    ) -> Result<String, CatalogError> {
        let base = resolve_slug(explicit, title)?;
        if !self.store.slug_taken(kind, &base, except).await? {
            return Ok(base);
        }

        match self.config.slugs.collision {
            SlugCollision::Reject => Err(CatalogError::DuplicateSlug {
                kind: kind.as_str(),
                slug: base,
            }),
            SlugCollision::Suffix => {
                let mut n = 2;
                loop {
                    let candidate = with_suffix(&base, n);
                    if !self.store.slug_taken(kind, &candidate, except).await? {
                        info!("Slug '{}' taken, using '{}'", base, candidate);
                        return Ok(candidate);
                    }
                    n += 1;
                }
            }
        }
    }

    /// Slug for an update: the current slug stays unless the draft clears it.
    async fn update_slug(
        &self,
        kind: EntityKind,
        current: &str,
        requested: &str,
        title: &str,
        id: EntityId,
    ) -> Result<String, CatalogError> {
        let requested = requested.trim();
        if requested == current {
            return Ok(current.to_string());
        }
        if !requested.is_empty() {
            return Err(CatalogError::validation(format!(
                "{} slug '{}' cannot be changed; clear it to derive a new one",
                kind.as_str(),
                current
            )));
        }
        self.assign_slug(kind, "", title, Some(id)).await
    }

    // Taxonomy administration

    pub async fn create_region(&self, draft: TaxonomyDraft) -> Result<Region, CatalogError> {
        require("name", &draft.name)?;
        let slug = self
            .assign_slug(EntityKind::Region, &draft.slug, &draft.name, None)
            .await?;
        let region = self
            .store
            .save_region(Region {
                id: 0,
                name: draft.name,
                slug,
                description: draft.description,
                image: draft.image,
            })
            .await?;
        info!("Created region '{}'", region.slug);
        Ok(region)
    }

    pub async fn create_category(&self, draft: TaxonomyDraft) -> Result<Category, CatalogError> {
        require("name", &draft.name)?;
        let slug = self
            .assign_slug(EntityKind::Category, &draft.slug, &draft.name, None)
            .await?;
        let category = self
            .store
            .save_category(Category {
                id: 0,
                name: draft.name,
                slug,
                description: draft.description,
            })
            .await?;
        info!("Created category '{}'", category.slug);
        Ok(category)
    }

    pub async fn create_tag(&self, draft: TaxonomyDraft) -> Result<Tag, CatalogError> {
        require("name", &draft.name)?;
        let slug = self
            .assign_slug(EntityKind::Tag, &draft.slug, &draft.name, None)
            .await?;
        let tag = self
            .store
            .save_tag(Tag {
                id: 0,
                name: draft.name,
                slug,
                description: draft.description,
            })
            .await?;
        info!("Created tag '{}'", tag.slug);
        Ok(tag)
    }

    /// Rename or re-describe the region stored under `slug`.
    ///
    /// Content filed under the region follows it, since it is referenced
    /// by id.
    pub async fn update_region(
        &self,
        slug: &str,
        draft: TaxonomyDraft,
    ) -> Result<Region, CatalogError> {
        require("name", &draft.name)?;
        let existing = self
            .store
            .region(slug)
            .await?
            .ok_or_else(|| CatalogError::not_found(EntityKind::Region.as_str(), slug))?;
        let new_slug = self
            .update_slug(
                EntityKind::Region,
                &existing.slug,
                &draft.slug,
                &draft.name,
                existing.id,
            )
            .await?;
        let region = self
            .store
            .save_region(Region {
                id: existing.id,
                name: draft.name,
                slug: new_slug,
                description: draft.description,
                image: draft.image,
            })
            .await?;
        info!("Updated region '{}'", region.slug);
        Ok(region)
    }

    pub async fn update_category(
        &self,
        slug: &str,
        draft: TaxonomyDraft,
    ) -> Result<Category, CatalogError> {
        require("name", &draft.name)?;
        let existing = self
            .store
            .category(slug)
            .await?
            .ok_or_else(|| CatalogError::not_found(EntityKind::Category.as_str(), slug))?;
        let new_slug = self
            .update_slug(
                EntityKind::Category,
                &existing.slug,
                &draft.slug,
                &draft.name,
                existing.id,
            )
            .await?;
        let category = self
            .store
            .save_category(Category {
                id: existing.id,
                name: draft.name,
                slug: new_slug,
                description: draft.description,
            })
            .await?;
        info!("Updated category '{}'", category.slug);
        Ok(category)
    }

    pub async fn update_tag(&self, slug: &str, draft: TaxonomyDraft) -> Result<Tag, CatalogError> {
        require("name", &draft.name)?;
        let existing = self
            .store
            .tag(slug)
            .await?
            .ok_or_else(|| CatalogError::not_found(EntityKind::Tag.as_str(), slug))?;
        let new_slug = self
            .update_slug(
                EntityKind::Tag,
                &existing.slug,
                &draft.slug,
                &draft.name,
                existing.id,
            )
            .await?;
        let tag = self
            .store
            .save_tag(Tag {
                id: existing.id,
                name: draft.name,
                slug: new_slug,
                description: draft.description,
            })
            .await?;
        info!("Updated tag '{}'", tag.slug);
        Ok(tag)
    }

    /// Delete a region together with every recipe and article under it.
    ///
    /// Either the whole cascade happens or nothing does.
    pub async fn delete_region(&self, slug: &str) -> Result<CascadeSummary, CatalogError> {
        Ok(self.store.delete_region(slug).await?)
    }

    /// Delete a category together with every recipe under it
    pub async fn delete_category(&self, slug: &str) -> Result<CascadeSummary, CatalogError> {
        Ok(self.store.delete_category(slug).await?)
    }

    /// Delete a tag, detaching it from all content
    pub async fn delete_tag(&self, slug: &str) -> Result<CascadeSummary, CatalogError> {
        Ok(self.store.delete_tag(slug).await?)
    }

    pub async fn regions(&self) -> Result<Vec<Region>, CatalogError> {
        Ok(self.store.regions().await?)
    }

    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.store.categories().await?)
    }

    pub async fn tags(&self) -> Result<Vec<Tag>, CatalogError> {
        Ok(self.store.tags().await?)
    }

    // Submission intake

    /// Persist a contributor submission, then notify the operator.
    ///
    /// The notification runs on a background task and is not awaited; a
    /// failure there is logged and dropped. Must be called from within a
    /// Tokio runtime.
    pub async fn submit(&self, draft: SubmissionDraft) -> Result<ContactSubmission, CatalogError> {
        let submission = draft.into_submission(self.clock.now())?;
        let saved = self.store.insert_submission(submission).await?;
        info!(
            "Stored {} submission {} from {}",
            saved.submission_type, saved.id, saved.email
        );

        let notifier = Arc::clone(&self.notifier);
        let notice = saved.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&notice).await {
                warn!(
                    "Notification via {} failed for submission {}: {}",
                    notifier.notifier_name(),
                    notice.id,
                    e
                );
            }
        });
        Ok(saved)
    }

    pub async fn mark_processed(&self, id: EntityId) -> Result<ContactSubmission, CatalogError> {
        let submission = self.store.set_submission_processed(id, true).await?;
        info!("Submission {} marked processed", id);
        Ok(submission)
    }

    /// Submissions newest first, optionally only those still awaiting review
    pub async fn submissions(
        &self,
        unprocessed_only: bool,
    ) -> Result<Vec<ContactSubmission>, CatalogError> {
        let mut submissions: Vec<ContactSubmission> = self
            .store
            .submissions()
            .await?
            .into_iter()
            .filter(|s| !(unprocessed_only && s.processed))
            .collect();
        submissions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(submissions)
    }
}
