//! JSON catalog snapshots.
//!
//! A snapshot lists taxonomy and content as drafts, so loading one goes
//! through the same validation, slug and timestamp rules as any other write.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::model::{ArticleDraft, RecipeDraft, TaxonomyDraft};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSnapshot {
    pub regions: Vec<TaxonomyDraft>,
    pub categories: Vec<TaxonomyDraft>,
    pub tags: Vec<TaxonomyDraft>,
    pub recipes: Vec<RecipeDraft>,
    pub articles: Vec<ArticleDraft>,
}

/// How many entities a snapshot load created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub regions: usize,
    pub categories: usize,
    pub tags: usize,
    pub recipes: usize,
    pub articles: usize,
}

impl CatalogSnapshot {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a snapshot file
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json).map_err(|e| {
            CatalogError::SnapshotError(format!("{}: {}", path.display(), e))
        })
    }

    /// Create every entity in dependency order: taxonomy first, then content.
    ///
    /// Stops at the first failing write; entities created before it stay.
    pub async fn load_into(self, catalog: &Catalog) -> Result<LoadSummary, CatalogError> {
        let mut summary = LoadSummary::default();

        for draft in self.regions {
            catalog.create_region(draft).await?;
            summary.regions += 1;
        }
        for draft in self.categories {
            catalog.create_category(draft).await?;
            summary.categories += 1;
        }
        for draft in self.tags {
            catalog.create_tag(draft).await?;
            summary.tags += 1;
        }
        for draft in self.recipes {
            catalog.create_recipe(draft).await?;
            summary.recipes += 1;
        }
        for draft in self.articles {
            catalog.create_article(draft).await?;
            summary.articles += 1;
        }

        info!(
            "Loaded snapshot: {} regions, {} categories, {} tags, {} recipes, {} articles",
            summary.regions, summary.categories, summary.tags, summary.recipes, summary.articles
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "regions": [{"name": "Italy", "description": "Italian cuisine"}],
        "categories": [{"name": "Main Dishes"}],
        "tags": [{"name": "Comfort Food"}],
        "recipes": [{
            "title": "Authentic Risotto alla Milanese",
            "region": "italy",
            "category": "main-dishes",
            "tags": ["comfort-food"],
            "description": "Creamy saffron risotto",
            "prep_time": 10,
            "cook_time": 25,
            "servings": 4,
            "difficulty": "medium",
            "images": {"featured": "recipes/risotto.jpg"}
        }],
        "articles": [{
            "title": "A Morning at the Rialto Market",
            "article_type": "story",
            "region": "italy",
            "excerpt": "Fishmongers and fog",
            "images": {"featured": "articles/rialto.jpg"}
        }]
    }"#;

    #[tokio::test]
    async fn test_load_snapshot_into_catalog() {
        let catalog = Catalog::builder().build().await.unwrap();
        let snapshot = CatalogSnapshot::from_json(SNAPSHOT).unwrap();

        let summary = snapshot.load_into(&catalog).await.unwrap();
        assert_eq!(summary.recipes, 1);
        assert_eq!(summary.articles, 1);

        let detail = catalog
            .recipe_detail("authentic-risotto-alla-milanese")
            .await
            .unwrap();
        assert_eq!(detail.recipe.region.name, "Italy");
        assert_eq!(detail.recipe.tags[0].slug, "comfort-food");
        assert_eq!(detail.recipe.total_time(), 35);
    }

    #[tokio::test]
    async fn test_unknown_region_stops_load() {
        let catalog = Catalog::builder().build().await.unwrap();
        let snapshot = CatalogSnapshot::from_json(
            r#"{"categories": [{"name": "Soups"}],
                "recipes": [{"title": "Pho", "region": "vietnam", "category": "soups",
                             "images": {"featured": "pho.jpg"}}]}"#,
        )
        .unwrap();

        let err = snapshot.load_into(&catalog).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { kind: "region", .. }));
    }

    #[test]
    fn test_malformed_json_is_snapshot_error() {
        let err = CatalogSnapshot::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::SnapshotError(_)));
    }
}
