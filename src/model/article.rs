use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    check_max_chars, require, CatalogEntry, EntityId, MediaSlots, Region, Tag,
    META_DESCRIPTION_MAX, META_TITLE_MAX,
};
use crate::error::CatalogError;

const ARTICLE_GALLERY_SLOTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleType {
    Story,
    Interview,
    Blog,
    Culture,
}

impl ArticleType {
    pub const ALL: [ArticleType; 4] = [
        ArticleType::Story,
        ArticleType::Interview,
        ArticleType::Blog,
        ArticleType::Culture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleType::Story => "story",
            ArticleType::Interview => "interview",
            ArticleType::Blog => "blog",
            ArticleType::Culture => "culture",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArticleType::Story => "Story",
            ArticleType::Interview => "Interview",
            ArticleType::Blog => "Blog",
            ArticleType::Culture => "Culture",
        }
    }

    /// Parse a stored token. Unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == token)
    }

    pub fn choices() -> Vec<(&'static str, &'static str)> {
        Self::ALL.iter().map(|t| (t.as_str(), t.label())).collect()
    }
}

impl fmt::Display for ArticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A story, interview, blog post or culture piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: EntityId,
    pub title: String,
    pub slug: String,
    pub article_type: ArticleType,
    pub region: Option<Region>,
    pub tags: Vec<Tag>,

    pub excerpt: String,
    pub content: String,

    pub images: MediaSlots,

    /// Interviewee or story author
    pub author_name: String,
    pub author_bio: String,

    pub meta_title: String,
    pub meta_description: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_published: bool,
    /// Promoted on the front page
    pub featured: bool,
}

impl CatalogEntry for Article {
    fn id(&self) -> EntityId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn is_published(&self) -> bool {
        self.is_published
    }

    fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn text_fields(&self) -> [&str; 3] {
        [&self.title, &self.excerpt, &self.content]
    }
}

/// Editable article fields. `region` and `tags` hold slugs; an empty
/// `region` means the article is not tied to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub article_type: ArticleType,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub images: MediaSlots,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_bio: String,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default = "default_published")]
    pub is_published: bool,
    #[serde(default)]
    pub featured: bool,
}

fn default_published() -> bool {
    true
}

impl ArticleDraft {
    pub fn new(title: impl Into<String>, article_type: ArticleType) -> Self {
        Self {
            title: title.into(),
            slug: String::new(),
            article_type,
            region: String::new(),
            tags: Vec::new(),
            excerpt: String::new(),
            content: String::new(),
            images: MediaSlots::default(),
            author_name: String::new(),
            author_bio: String::new(),
            meta_title: String::new(),
            meta_description: String::new(),
            is_published: true,
            featured: false,
        }
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        require("title", &self.title)?;
        self.images.validate(ARTICLE_GALLERY_SLOTS)?;
        check_max_chars("meta_title", &self.meta_title, META_TITLE_MAX)?;
        check_max_chars("meta_description", &self.meta_description, META_DESCRIPTION_MAX)
    }
}

impl From<&Article> for ArticleDraft {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            slug: article.slug.clone(),
            article_type: article.article_type,
            region: article
                .region
                .as_ref()
                .map(|r| r.slug.clone())
                .unwrap_or_default(),
            tags: article.tags.iter().map(|t| t.slug.clone()).collect(),
            excerpt: article.excerpt.clone(),
            content: article.content.clone(),
            images: article.images.clone(),
            author_name: article.author_name.clone(),
            author_bio: article.author_bio.clone(),
            meta_title: article.meta_title.clone(),
            meta_description: article.meta_description.clone(),
            is_published: article.is_published,
            featured: article.featured,
        }
    }
}
