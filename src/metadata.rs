//! SEO metadata views over content entities.
//!
//! Keywords are rebuilt from the entity's current taxonomy every time they
//! are requested; nothing here is stored.

use serde::Serialize;

use crate::model::{Article, Recipe};

/// Head metadata for a recipe or article page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaTags {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// `[title, region, category, ...tags]`
pub fn recipe_keywords(recipe: &Recipe) -> Vec<String> {
    let mut keywords = vec![
        recipe.title.clone(),
        recipe.region.name.clone(),
        recipe.category.name.clone(),
    ];
    keywords.extend(recipe.tags.iter().map(|tag| tag.name.clone()));
    keywords
}

/// `[title, article_type, region (if any), ...tags]`
pub fn article_keywords(article: &Article) -> Vec<String> {
    let mut keywords = vec![
        article.title.clone(),
        article.article_type.as_str().to_string(),
    ];
    if let Some(region) = &article.region {
        keywords.push(region.name.clone());
    }
    keywords.extend(article.tags.iter().map(|tag| tag.name.clone()));
    keywords
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

impl From<&Recipe> for MetaTags {
    fn from(recipe: &Recipe) -> Self {
        MetaTags {
            title: non_empty_or(&recipe.meta_title, &recipe.title),
            description: non_empty_or(&recipe.meta_description, &recipe.description),
            keywords: recipe_keywords(recipe),
            image: Some(recipe.images.featured.clone()).filter(|i| !i.is_empty()),
        }
    }
}

impl From<&Article> for MetaTags {
    fn from(article: &Article) -> Self {
        MetaTags {
            title: non_empty_or(&article.meta_title, &article.title),
            description: non_empty_or(&article.meta_description, &article.excerpt),
            keywords: article_keywords(article),
            image: Some(article.images.featured.clone()).filter(|i| !i.is_empty()),
        }
    }
}
