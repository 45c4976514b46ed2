//! Multi-criteria filtering over catalog collections.
//!
//! Every criterion is optional and criteria combine with AND. Unpublished
//! entries never pass, whatever the criteria. Results come back newest
//! first, ties broken by ascending id.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::{Article, ArticleType, CatalogEntry, Difficulty, Recipe};

/// Raw listing query parameters as supplied by a caller.
///
/// Values are untrusted strings; unknown tokens degrade to "no constraint".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingParams {
    pub region: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    #[serde(rename = "type")]
    pub article_type: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
}

/// A case-insensitive substring needle. Blank input is no needle at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    needle: String,
}

impl TextQuery {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                needle: trimmed.to_lowercase(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// True if any of the entry's text fields contains the needle
    pub fn matches<T: CatalogEntry>(&self, entry: &T) -> bool {
        entry
            .text_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

fn token(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn region_matches<T: CatalogEntry>(entry: &T, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(slug) => entry.region().is_some_and(|r| r.slug == slug),
    }
}

/// Sort newest first; equal timestamps fall back to ascending id
pub fn sort_newest_first<T: CatalogEntry>(entries: &mut [T]) {
    entries.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| a.id().cmp(&b.id()))
    });
}

/// Keep published entries accepted by `predicate`, newest first
pub fn select<T, I, F>(entries: I, predicate: F) -> Vec<T>
where
    T: CatalogEntry,
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> bool,
{
    let mut selected: Vec<T> = entries
        .into_iter()
        .filter(|entry| entry.is_published() && predicate(entry))
        .collect();
    sort_newest_first(&mut selected);
    selected
}

/// Criteria for recipe listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    pub region: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub text: Option<TextQuery>,
}

impl RecipeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build criteria from raw parameters, dropping anything unusable
    pub fn from_params(params: &ListingParams) -> Self {
        let filter = Self {
            region: token(params.region.as_ref()).map(str::to_string),
            category: token(params.category.as_ref()).map(str::to_string),
            difficulty: token(params.difficulty.as_ref()).and_then(Difficulty::from_token),
            text: params.search.as_deref().and_then(TextQuery::parse),
        };
        debug!("Recipe filter from params {:?}: {:?}", params, filter);
        filter
    }

    pub fn region(mut self, slug: impl Into<String>) -> Self {
        self.region = Some(slug.into());
        self
    }

    pub fn category(mut self, slug: impl Into<String>) -> Self {
        self.category = Some(slug.into());
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn text(mut self, query: &str) -> Self {
        self.text = TextQuery::parse(query);
        self
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        recipe.is_published
            && region_matches(recipe, self.region.as_deref())
            && self
                .category
                .as_deref()
                .map_or(true, |slug| recipe.category.slug == slug)
            && self.difficulty.map_or(true, |d| recipe.difficulty == d)
            && self.text.as_ref().map_or(true, |q| q.matches(recipe))
    }

    pub fn apply(&self, recipes: impl IntoIterator<Item = Recipe>) -> Vec<Recipe> {
        select(recipes, |recipe| self.matches(recipe))
    }
}

/// Criteria for article listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleFilter {
    pub region: Option<String>,
    pub article_type: Option<ArticleType>,
    pub featured: Option<bool>,
    pub text: Option<TextQuery>,
}

impl ArticleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build criteria from raw parameters. `type=all` means any type.
    pub fn from_params(params: &ListingParams) -> Self {
        let filter = Self {
            region: token(params.region.as_ref()).map(str::to_string),
            article_type: token(params.article_type.as_ref()).and_then(ArticleType::from_token),
            featured: None,
            text: params.search.as_deref().and_then(TextQuery::parse),
        };
        debug!("Article filter from params {:?}: {:?}", params, filter);
        filter
    }

    pub fn region(mut self, slug: impl Into<String>) -> Self {
        self.region = Some(slug.into());
        self
    }

    pub fn article_type(mut self, article_type: ArticleType) -> Self {
        self.article_type = Some(article_type);
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn text(mut self, query: &str) -> Self {
        self.text = TextQuery::parse(query);
        self
    }

    pub fn matches(&self, article: &Article) -> bool {
        article.is_published
            && region_matches(article, self.region.as_deref())
            && self.article_type.map_or(true, |t| article.article_type == t)
            && self.featured.map_or(true, |f| article.featured == f)
            && self.text.as_ref().map_or(true, |q| q.matches(article))
    }

    pub fn apply(&self, articles: impl IntoIterator<Item = Article>) -> Vec<Article> {
        select(articles, |article| self.matches(article))
    }
}
