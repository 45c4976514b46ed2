//! In-memory storage implementation.
//!
//! All tables live behind a single `RwLock`, so every write, cascades
//! included, is applied under one guard and is never observed half done.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use log::{debug, info};
use tokio::sync::RwLock;

use super::{CascadeSummary, CatalogStore, StorageError, StorageResult};
use crate::model::{
    Article, Category, ContactSubmission, EntityId, EntityKind, Recipe, Region, Tag,
};

/// Rows with an id and a unique slug
trait Row: Clone {
    const KIND: EntityKind;
    fn row_id(&self) -> EntityId;
    fn set_row_id(&mut self, id: EntityId);
    fn row_slug(&self) -> &str;
}

macro_rules! impl_row {
    ($ty:ty, $kind:expr) => {
        impl Row for $ty {
            const KIND: EntityKind = $kind;

            fn row_id(&self) -> EntityId {
                self.id
            }

            fn set_row_id(&mut self, id: EntityId) {
                self.id = id;
            }

            fn row_slug(&self) -> &str {
                &self.slug
            }
        }
    };
}

impl_row!(Region, EntityKind::Region);
impl_row!(Category, EntityKind::Category);
impl_row!(Tag, EntityKind::Tag);
impl_row!(Recipe, EntityKind::Recipe);
impl_row!(Article, EntityKind::Article);

#[derive(Default)]
struct Tables {
    next_ids: HashMap<EntityKind, EntityId>,
    regions: BTreeMap<EntityId, Region>,
    categories: BTreeMap<EntityId, Category>,
    tags: BTreeMap<EntityId, Tag>,
    recipes: BTreeMap<EntityId, Recipe>,
    articles: BTreeMap<EntityId, Article>,
    submissions: BTreeMap<EntityId, ContactSubmission>,
}

impl Tables {
    fn allocate_id(&mut self, kind: EntityKind) -> EntityId {
        let next = self.next_ids.entry(kind).or_insert(1);
        let id = *next;
        *next += 1;
        id
    }

    fn slug_in_use<T: Row>(table: &BTreeMap<EntityId, T>, slug: &str, except: Option<EntityId>) -> bool {
        table
            .values()
            .any(|row| row.row_slug() == slug && Some(row.row_id()) != except)
    }

    fn slug_taken(&self, kind: EntityKind, slug: &str, except: Option<EntityId>) -> bool {
        match kind {
            EntityKind::Region => Self::slug_in_use(&self.regions, slug, except),
            EntityKind::Category => Self::slug_in_use(&self.categories, slug, except),
            EntityKind::Tag => Self::slug_in_use(&self.tags, slug, except),
            EntityKind::Recipe => Self::slug_in_use(&self.recipes, slug, except),
            EntityKind::Article => Self::slug_in_use(&self.articles, slug, except),
            EntityKind::Submission => false,
        }
    }

    /// Rebuild a recipe's taxonomy snapshots from the live rows
    fn hydrate_recipe(&self, mut recipe: Recipe) -> Option<Recipe> {
        recipe.region = self.regions.get(&recipe.region.id)?.clone();
        recipe.category = self.categories.get(&recipe.category.id)?.clone();
        recipe.tags = self.live_tags(&recipe.tags);
        Some(recipe)
    }

    fn hydrate_article(&self, mut article: Article) -> Article {
        article.region = article
            .region
            .as_ref()
            .and_then(|r| self.regions.get(&r.id))
            .cloned();
        article.tags = self.live_tags(&article.tags);
        article
    }

    fn live_tags(&self, tags: &[Tag]) -> Vec<Tag> {
        tags.iter()
            .filter_map(|t| self.tags.get(&t.id))
            .cloned()
            .collect()
    }

    fn check_tags(&self, tags: &[Tag]) -> StorageResult<()> {
        match tags.iter().find(|t| !self.tags.contains_key(&t.id)) {
            Some(missing) => Err(StorageError::not_found(EntityKind::Tag, &missing.slug)),
            None => Ok(()),
        }
    }
}

fn by_slug<T: Row>(table: &BTreeMap<EntityId, T>, slug: &str) -> Option<T> {
    table.values().find(|row| row.row_slug() == slug).cloned()
}

/// Write a row under its final id, enforcing slug uniqueness.
fn upsert<T: Row>(table: &mut BTreeMap<EntityId, T>, row: T) -> StorageResult<T> {
    if table
        .values()
        .any(|existing| existing.row_slug() == row.row_slug() && existing.row_id() != row.row_id())
    {
        return Err(StorageError::DuplicateEntry {
            kind: T::KIND.as_str(),
            slug: row.row_slug().to_string(),
        });
    }
    table.insert(row.row_id(), row.clone());
    Ok(row)
}

/// Resolve the id a save should land on: a fresh one for new rows, the
/// existing one for updates.
fn target_id<T: Row>(
    tables: &mut Tables,
    table_has: impl Fn(&Tables, EntityId) -> bool,
    row: &T,
) -> StorageResult<EntityId> {
    if row.row_id() == 0 {
        Ok(tables.allocate_id(T::KIND))
    } else if table_has(tables, row.row_id()) {
        Ok(row.row_id())
    } else {
        Err(StorageError::not_found(T::KIND, row.row_id()))
    }
}

fn sorted_by_name<T>(rows: impl Iterator<Item = T>, name: impl Fn(&T) -> &str) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.sort_by(|a, b| name(a).cmp(name(b)));
    rows
}

/// In-memory catalog store.
///
/// Useful for tests, the CLI, and embedding the catalog without a database.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    fn backend_name(&self) -> &str {
        "memory"
    }

    async fn save_region(&self, region: Region) -> StorageResult<Region> {
        let mut tables = self.tables.write().await;
        let id = target_id(&mut tables, |t, id| t.regions.contains_key(&id), &region)?;
        let mut candidate = region;
        candidate.set_row_id(id);
        upsert(&mut tables.regions, candidate)
    }

    async fn save_category(&self, category: Category) -> StorageResult<Category> {
        let mut tables = self.tables.write().await;
        let id = target_id(&mut tables, |t, id| t.categories.contains_key(&id), &category)?;
        let mut candidate = category;
        candidate.set_row_id(id);
        upsert(&mut tables.categories, candidate)
    }

    async fn save_tag(&self, tag: Tag) -> StorageResult<Tag> {
        let mut tables = self.tables.write().await;
        let id = target_id(&mut tables, |t, id| t.tags.contains_key(&id), &tag)?;
        let mut candidate = tag;
        candidate.set_row_id(id);
        upsert(&mut tables.tags, candidate)
    }

    async fn region(&self, slug: &str) -> StorageResult<Option<Region>> {
        Ok(by_slug(&self.tables.read().await.regions, slug))
    }

    async fn category(&self, slug: &str) -> StorageResult<Option<Category>> {
        Ok(by_slug(&self.tables.read().await.categories, slug))
    }

    async fn tag(&self, slug: &str) -> StorageResult<Option<Tag>> {
        Ok(by_slug(&self.tables.read().await.tags, slug))
    }

    async fn regions(&self) -> StorageResult<Vec<Region>> {
        let tables = self.tables.read().await;
        Ok(sorted_by_name(tables.regions.values().cloned(), |r| r.name.as_str()))
    }

    async fn categories(&self) -> StorageResult<Vec<Category>> {
        let tables = self.tables.read().await;
        Ok(sorted_by_name(tables.categories.values().cloned(), |c| c.name.as_str()))
    }

    async fn tags(&self) -> StorageResult<Vec<Tag>> {
        let tables = self.tables.read().await;
        Ok(sorted_by_name(tables.tags.values().cloned(), |t| t.name.as_str()))
    }

    async fn delete_region(&self, slug: &str) -> StorageResult<CascadeSummary> {
        let mut tables = self.tables.write().await;
        let region = by_slug(&tables.regions, slug)
            .ok_or_else(|| StorageError::not_found(EntityKind::Region, slug))?;

        let before = (tables.recipes.len(), tables.articles.len());
        tables.recipes.retain(|_, r| r.region.id != region.id);
        tables
            .articles
            .retain(|_, a| a.region.as_ref().map_or(true, |r| r.id != region.id));
        tables.regions.remove(&region.id);

        let summary = CascadeSummary {
            recipes: before.0 - tables.recipes.len(),
            articles: before.1 - tables.articles.len(),
        };
        info!(
            "Deleted region '{}' with {} recipes and {} articles",
            slug, summary.recipes, summary.articles
        );
        Ok(summary)
    }

    async fn delete_category(&self, slug: &str) -> StorageResult<CascadeSummary> {
        let mut tables = self.tables.write().await;
        let category = by_slug(&tables.categories, slug)
            .ok_or_else(|| StorageError::not_found(EntityKind::Category, slug))?;

        let before = tables.recipes.len();
        tables.recipes.retain(|_, r| r.category.id != category.id);
        tables.categories.remove(&category.id);

        let summary = CascadeSummary {
            recipes: before - tables.recipes.len(),
            articles: 0,
        };
        info!("Deleted category '{}' with {} recipes", slug, summary.recipes);
        Ok(summary)
    }

    async fn delete_tag(&self, slug: &str) -> StorageResult<CascadeSummary> {
        let mut tables = self.tables.write().await;
        let tag = by_slug(&tables.tags, slug)
            .ok_or_else(|| StorageError::not_found(EntityKind::Tag, slug))?;

        let mut summary = CascadeSummary::default();
        for recipe in tables.recipes.values_mut() {
            let before = recipe.tags.len();
            recipe.tags.retain(|t| t.id != tag.id);
            if recipe.tags.len() != before {
                summary.recipes += 1;
            }
        }
        for article in tables.articles.values_mut() {
            let before = article.tags.len();
            article.tags.retain(|t| t.id != tag.id);
            if article.tags.len() != before {
                summary.articles += 1;
            }
        }
        tables.tags.remove(&tag.id);
        debug!(
            "Detached tag '{}' from {} recipes and {} articles",
            slug, summary.recipes, summary.articles
        );
        Ok(summary)
    }

    async fn slug_taken(
        &self,
        kind: EntityKind,
        slug: &str,
        except: Option<EntityId>,
    ) -> StorageResult<bool> {
        Ok(self.tables.read().await.slug_taken(kind, slug, except))
    }

    async fn save_recipe(&self, recipe: Recipe) -> StorageResult<Recipe> {
        let mut tables = self.tables.write().await;
        if !tables.regions.contains_key(&recipe.region.id) {
            return Err(StorageError::not_found(EntityKind::Region, &recipe.region.slug));
        }
        if !tables.categories.contains_key(&recipe.category.id) {
            return Err(StorageError::not_found(EntityKind::Category, &recipe.category.slug));
        }
        tables.check_tags(&recipe.tags)?;

        let id = target_id(&mut tables, |t, id| t.recipes.contains_key(&id), &recipe)?;
        let mut candidate = recipe;
        candidate.set_row_id(id);
        let saved = upsert(&mut tables.recipes, candidate)?;
        tables
            .hydrate_recipe(saved)
            .ok_or_else(|| StorageError::Other("recipe lost its taxonomy during save".to_string()))
    }

    async fn recipe(&self, slug: &str) -> StorageResult<Option<Recipe>> {
        let tables = self.tables.read().await;
        Ok(by_slug(&tables.recipes, slug).and_then(|r| tables.hydrate_recipe(r)))
    }

    async fn recipes(&self) -> StorageResult<Vec<Recipe>> {
        let tables = self.tables.read().await;
        Ok(tables
            .recipes
            .values()
            .cloned()
            .filter_map(|r| tables.hydrate_recipe(r))
            .collect())
    }

    async fn save_article(&self, article: Article) -> StorageResult<Article> {
        let mut tables = self.tables.write().await;
        if let Some(region) = &article.region {
            if !tables.regions.contains_key(&region.id) {
                return Err(StorageError::not_found(EntityKind::Region, &region.slug));
            }
        }
        tables.check_tags(&article.tags)?;

        let id = target_id(&mut tables, |t, id| t.articles.contains_key(&id), &article)?;
        let mut candidate = article;
        candidate.set_row_id(id);
        let saved = upsert(&mut tables.articles, candidate)?;
        Ok(tables.hydrate_article(saved))
    }

    async fn article(&self, slug: &str) -> StorageResult<Option<Article>> {
        let tables = self.tables.read().await;
        Ok(by_slug(&tables.articles, slug).map(|a| tables.hydrate_article(a)))
    }

    async fn articles(&self) -> StorageResult<Vec<Article>> {
        let tables = self.tables.read().await;
        Ok(tables
            .articles
            .values()
            .cloned()
            .map(|a| tables.hydrate_article(a))
            .collect())
    }

    async fn insert_submission(
        &self,
        mut submission: ContactSubmission,
    ) -> StorageResult<ContactSubmission> {
        if submission.id != 0 {
            return Err(StorageError::Rejected(format!(
                "submission {} already exists and cannot be rewritten",
                submission.id
            )));
        }
        let mut tables = self.tables.write().await;
        submission.id = tables.allocate_id(EntityKind::Submission);
        tables.submissions.insert(submission.id, submission.clone());
        Ok(submission)
    }

    async fn set_submission_processed(
        &self,
        id: EntityId,
        processed: bool,
    ) -> StorageResult<ContactSubmission> {
        let mut tables = self.tables.write().await;
        let submission = tables
            .submissions
            .get_mut(&id)
            .ok_or_else(|| StorageError::not_found(EntityKind::Submission, id))?;
        submission.processed = processed;
        Ok(submission.clone())
    }

    async fn submissions(&self) -> StorageResult<Vec<ContactSubmission>> {
        Ok(self.tables.read().await.submissions.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, MediaSlots};
    use chrono::Utc;

    fn region(name: &str, slug: &str) -> Region {
        Region {
            id: 0,
            name: name.to_string(),
            slug: slug.to_string(),
            description: String::new(),
            image: None,
        }
    }

    fn category(slug: &str) -> Category {
        Category {
            id: 0,
            name: slug.to_string(),
            slug: slug.to_string(),
            description: String::new(),
        }
    }

    fn recipe(slug: &str, region: &Region, category: &Category, tags: Vec<Tag>) -> Recipe {
        let now = Utc::now();
        Recipe {
            id: 0,
            title: slug.to_string(),
            slug: slug.to_string(),
            region: region.clone(),
            category: category.clone(),
            tags,
            description: String::new(),
            history: String::new(),
            cultural_context: String::new(),
            ingredients: String::new(),
            instructions: String::new(),
            prep_time: 5,
            cook_time: 5,
            servings: 1,
            difficulty: Difficulty::Easy,
            images: MediaSlots::new("x.jpg"),
            meta_title: String::new(),
            meta_description: String::new(),
            created_at: now,
            updated_at: now,
            is_published: true,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_rejects_duplicate_slug() {
        let store = InMemoryStore::new();
        let italy = store.save_region(region("Italy", "italy")).await.unwrap();
        assert_eq!(italy.id, 1);

        let err = store.save_region(region("Italia", "italy")).await.unwrap_err();
        assert!(matches!(err, StorageError::DuplicateEntry { kind: "region", .. }));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = InMemoryStore::new();
        let mut ghost = region("Ghost", "ghost");
        ghost.id = 99;
        let err = store.save_region(ghost).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_regions_sorted_by_name() {
        let store = InMemoryStore::new();
        store.save_region(region("Thailand", "thailand")).await.unwrap();
        store.save_region(region("France", "france")).await.unwrap();
        store.save_region(region("Mexico", "mexico")).await.unwrap();

        let names: Vec<String> = store.regions().await.unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["France", "Mexico", "Thailand"]);
    }

    #[tokio::test]
    async fn test_reads_rehydrate_renamed_region() {
        let store = InMemoryStore::new();
        let mut italy = store.save_region(region("Italy", "italy")).await.unwrap();
        let mains = store.save_category(category("mains")).await.unwrap();
        store.save_recipe(recipe("risotto", &italy, &mains, vec![])).await.unwrap();

        italy.name = "Italia".to_string();
        store.save_region(italy).await.unwrap();

        let risotto = store.recipe("risotto").await.unwrap().unwrap();
        assert_eq!(risotto.region.name, "Italia");
    }

    #[tokio::test]
    async fn test_save_recipe_with_unknown_region_fails() {
        let store = InMemoryStore::new();
        let mains = store.save_category(category("mains")).await.unwrap();
        let mut nowhere = region("Nowhere", "nowhere");
        nowhere.id = 42;

        let err = store
            .save_recipe(recipe("lost", &nowhere, &mains, vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound { kind: "region", .. }));
        assert!(store.recipes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_category_cascades_to_recipes_only() {
        let store = InMemoryStore::new();
        let italy = store.save_region(region("Italy", "italy")).await.unwrap();
        let mains = store.save_category(category("mains")).await.unwrap();
        let soups = store.save_category(category("soups")).await.unwrap();
        store.save_recipe(recipe("risotto", &italy, &mains, vec![])).await.unwrap();
        store.save_recipe(recipe("minestrone", &italy, &soups, vec![])).await.unwrap();

        let summary = store.delete_category("mains").await.unwrap();
        assert_eq!(summary, CascadeSummary { recipes: 1, articles: 0 });

        let left: Vec<String> = store.recipes().await.unwrap().into_iter().map(|r| r.slug).collect();
        assert_eq!(left, vec!["minestrone"]);
        assert!(store.region("italy").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_tag_detaches() {
        let store = InMemoryStore::new();
        let italy = store.save_region(region("Italy", "italy")).await.unwrap();
        let mains = store.save_category(category("mains")).await.unwrap();
        let tag = store
            .save_tag(Tag {
                id: 0,
                name: "Comfort".to_string(),
                slug: "comfort".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();
        store
            .save_recipe(recipe("risotto", &italy, &mains, vec![tag]))
            .await
            .unwrap();

        let summary = store.delete_tag("comfort").await.unwrap();
        assert_eq!(summary.recipes, 1);

        let risotto = store.recipe("risotto").await.unwrap().unwrap();
        assert!(risotto.tags.is_empty());
    }

    #[tokio::test]
    async fn test_submissions_are_insert_only() {
        let store = InMemoryStore::new();
        let submission = ContactSubmission {
            id: 0,
            submission_type: crate::model::SubmissionType::Story,
            name: "Lee".to_string(),
            email: "lee@example.com".to_string(),
            title: "Kimchi".to_string(),
            description: "Family kimchi".to_string(),
            region: "Korea".to_string(),
            content: "...".to_string(),
            created_at: Utc::now(),
            processed: false,
        };
        let saved = store.insert_submission(submission).await.unwrap();
        assert_eq!(saved.id, 1);

        let err = store.insert_submission(saved.clone()).await.unwrap_err();
        assert!(matches!(err, StorageError::Rejected(_)));

        let processed = store.set_submission_processed(saved.id, true).await.unwrap();
        assert!(processed.processed);
        assert_eq!(processed.title, "Kimchi");
    }
}
