//! Cross-type free-text search over recipes and articles.

use log::debug;
use serde::Serialize;

use crate::filter::{select, TextQuery};
use crate::model::{Article, CatalogEntry, Recipe};

/// A single search result, tagged with its entity type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "item", rename_all = "lowercase")]
pub enum SearchHit {
    Recipe(Recipe),
    Article(Article),
}

impl SearchHit {
    pub fn title(&self) -> &str {
        match self {
            SearchHit::Recipe(recipe) => recipe.title(),
            SearchHit::Article(article) => article.title(),
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            SearchHit::Recipe(recipe) => recipe.slug(),
            SearchHit::Article(article) => article.slug(),
        }
    }

    pub fn is_recipe(&self) -> bool {
        matches!(self, SearchHit::Recipe(_))
    }
}

/// Search published recipes and articles for `query`.
///
/// A blank query returns nothing. Otherwise all matching recipes come first,
/// newest first, followed by all matching articles, newest first. There is
/// no relevance ranking.
pub fn search(
    query: &str,
    recipes: impl IntoIterator<Item = Recipe>,
    articles: impl IntoIterator<Item = Article>,
) -> Vec<SearchHit> {
    let Some(text) = TextQuery::parse(query) else {
        return Vec::new();
    };

    let recipes = select(recipes, |recipe| text.matches(recipe));
    let articles = select(articles, |article| text.matches(article));
    debug!(
        "Search '{}' matched {} recipes and {} articles",
        text.as_str(),
        recipes.len(),
        articles.len()
    );

    recipes
        .into_iter()
        .map(SearchHit::Recipe)
        .chain(articles.into_iter().map(SearchHit::Article))
        .collect()
}
