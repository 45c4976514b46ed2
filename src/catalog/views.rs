use log::debug;
use serde::Serialize;

use super::Catalog;
use crate::error::CatalogError;
use crate::filter::{ArticleFilter, ListingParams, RecipeFilter};
use crate::metadata::MetaTags;
use crate::model::{Article, ArticleType, Category, Difficulty, EntityKind, Recipe, Region};
use crate::pagination::{paginate, parse_page_number, Page};
use crate::search::{search, SearchHit};
use crate::sitemap::{self, SitemapEntry};

/// The criteria that actually took effect for a listing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActiveCriteria {
    pub region: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub article_type: Option<ArticleType>,
    pub search: Option<String>,
}

/// One page of recipes plus everything a filter form needs
#[derive(Debug, Clone, Serialize)]
pub struct RecipeListing {
    pub page: Page<Recipe>,
    pub regions: Vec<Region>,
    pub categories: Vec<Category>,
    pub difficulties: Vec<(&'static str, &'static str)>,
    pub criteria: ActiveCriteria,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleListing {
    pub page: Page<Article>,
    pub article_types: Vec<(&'static str, &'static str)>,
    pub criteria: ActiveCriteria,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionOverview {
    pub region: Region,
    pub recipes: Vec<Recipe>,
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub meta: MetaTags,
    /// Other recipes from the same region
    pub related: Vec<Recipe>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleDetail {
    pub article: Article,
    pub meta: MetaTags,
    /// Other articles of the same type
    pub related: Vec<Article>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrontPage {
    pub featured: Vec<Article>,
    pub recipes: Vec<Recipe>,
    pub articles: Vec<Article>,
}

fn echo_search(params: &ListingParams) -> Option<String> {
    params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl Catalog {
    /// Published recipes matching `filter`, newest first
    pub async fn find_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, CatalogError> {
        Ok(self.store.find_recipes(filter).await?)
    }

    /// Published articles matching `filter`, newest first
    pub async fn find_articles(
        &self,
        filter: &ArticleFilter,
    ) -> Result<Vec<Article>, CatalogError> {
        Ok(self.store.find_articles(filter).await?)
    }

    /// The recipe listing page for raw query parameters
    pub async fn list_recipes(&self, params: &ListingParams) -> Result<RecipeListing, CatalogError> {
        let filter = RecipeFilter::from_params(params);
        let recipes = self.find_recipes(&filter).await?;
        let page = paginate(
            recipes,
            self.config.listing.recipes_per_page,
            parse_page_number(params.page.as_deref()),
        );
        debug!(
            "Recipe listing page {}/{} ({} matches)",
            page.number, page.num_pages, page.count
        );

        Ok(RecipeListing {
            page,
            regions: self.store.regions().await?,
            categories: self.store.categories().await?,
            difficulties: Difficulty::choices(),
            criteria: ActiveCriteria {
                region: filter.region,
                category: filter.category,
                difficulty: filter.difficulty,
                search: echo_search(params),
                ..Default::default()
            },
        })
    }

    /// The article listing page for raw query parameters
    pub async fn list_articles(
        &self,
        params: &ListingParams,
    ) -> Result<ArticleListing, CatalogError> {
        let filter = ArticleFilter::from_params(params);
        let articles = self.find_articles(&filter).await?;
        let page = paginate(
            articles,
            self.config.listing.articles_per_page,
            parse_page_number(params.page.as_deref()),
        );
        debug!(
            "Article listing page {}/{} ({} matches)",
            page.number, page.num_pages, page.count
        );

        Ok(ArticleListing {
            page,
            article_types: ArticleType::choices(),
            criteria: ActiveCriteria {
                region: filter.region,
                article_type: filter.article_type,
                search: echo_search(params),
                ..Default::default()
            },
        })
    }

    /// Recipes then articles whose text contains `query`
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, CatalogError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let recipes = self.store.recipes().await?;
        let articles = self.store.articles().await?;
        Ok(search(query, recipes, articles))
    }

    /// Latest recipes and articles for one region
    pub async fn region_overview(&self, slug: &str) -> Result<RegionOverview, CatalogError> {
        let region = self
            .store
            .region(slug)
            .await?
            .ok_or_else(|| CatalogError::not_found(EntityKind::Region.as_str(), slug))?;

        let mut recipes = self.find_recipes(&RecipeFilter::new().region(slug)).await?;
        recipes.truncate(self.config.listing.region_recipes);
        let mut articles = self.find_articles(&ArticleFilter::new().region(slug)).await?;
        articles.truncate(self.config.listing.region_articles);

        Ok(RegionOverview {
            region,
            recipes,
            articles,
        })
    }

    pub async fn recipe_detail(&self, slug: &str) -> Result<RecipeDetail, CatalogError> {
        let recipe = self
            .store
            .recipe(slug)
            .await?
            .filter(|r| r.is_published)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Recipe.as_str(), slug))?;

        let related = self
            .find_recipes(&RecipeFilter::new().region(recipe.region.slug.as_str()))
            .await?
            .into_iter()
            .filter(|r| r.id != recipe.id)
            .take(self.config.listing.related_recipes)
            .collect();

        Ok(RecipeDetail {
            meta: MetaTags::from(&recipe),
            recipe,
            related,
        })
    }

    pub async fn article_detail(&self, slug: &str) -> Result<ArticleDetail, CatalogError> {
        let article = self
            .store
            .article(slug)
            .await?
            .filter(|a| a.is_published)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Article.as_str(), slug))?;

        let related = self
            .find_articles(&ArticleFilter::new().article_type(article.article_type))
            .await?
            .into_iter()
            .filter(|a| a.id != article.id)
            .take(self.config.listing.related_articles)
            .collect();

        Ok(ArticleDetail {
            meta: MetaTags::from(&article),
            article,
            related,
        })
    }

    pub async fn front_page(&self) -> Result<FrontPage, CatalogError> {
        let listing = &self.config.listing;

        let mut featured = self.find_articles(&ArticleFilter::new().featured(true)).await?;
        featured.truncate(listing.front_page_featured);
        let mut recipes = self.find_recipes(&RecipeFilter::new()).await?;
        recipes.truncate(listing.front_page_recipes);
        let mut articles = self.find_articles(&ArticleFilter::new()).await?;
        articles.truncate(listing.front_page_articles);

        Ok(FrontPage {
            featured,
            recipes,
            articles,
        })
    }

    /// Sitemap entries for all published content
    pub async fn sitemap_entries(&self) -> Result<Vec<SitemapEntry>, CatalogError> {
        let recipes = self.store.recipes().await?;
        let articles = self.store.articles().await?;
        Ok(sitemap::entries(&recipes, &articles))
    }

    /// The sitemap XML document, rooted at the configured site URL
    pub async fn render_sitemap(&self) -> Result<String, CatalogError> {
        let entries = self.sitemap_entries().await?;
        Ok(sitemap::render_xml(&entries, &self.config.site.base_url))
    }
}
