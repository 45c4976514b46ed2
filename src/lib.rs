//! Culinary content catalog engine.
//!
//! Recipes and articles classified by region, category and tag, with
//! filtered listings, cross-type search, pagination, region pages,
//! contributor submissions and a sitemap feed.
//!
//! ```
//! # use mesa_catalog::{Catalog, ListingParams, RecipeDraft, TaxonomyDraft};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::builder().build().await?;
//! catalog.create_region(TaxonomyDraft::new("Italy")).await?;
//! catalog.create_category(TaxonomyDraft::new("Main Dishes")).await?;
//!
//! let mut draft = RecipeDraft::new("Risotto alla Milanese", "italy", "main-dishes");
//! draft.images.featured = "recipes/risotto.jpg".to_string();
//! let recipe = catalog.create_recipe(draft).await?;
//! assert_eq!(recipe.slug, "risotto-alla-milanese");
//!
//! let listing = catalog.list_recipes(&ListingParams::default()).await?;
//! assert_eq!(listing.page.count, 1);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod metadata;
pub mod model;
pub mod notify;
pub mod pagination;
pub mod search;
pub mod sitemap;
pub mod slug;
pub mod snapshot;
pub mod storage;

// Re-export commonly used types
pub use builder::CatalogBuilder;
pub use catalog::{Catalog, Clock, SystemClock};
pub use config::CatalogConfig;
pub use error::CatalogError;
pub use filter::{ArticleFilter, ListingParams, RecipeFilter};
pub use model::{
    Article, ArticleDraft, ArticleType, Category, ContactSubmission, Difficulty, Recipe,
    RecipeDraft, Region, SubmissionDraft, SubmissionType, Tag, TaxonomyDraft,
};
pub use notify::{LogNotifier, MailRelayNotifier, Notifier};
pub use pagination::{paginate, Page};
pub use search::SearchHit;
pub use snapshot::CatalogSnapshot;
pub use storage::{CatalogStore, InMemoryStore, StorageError};
