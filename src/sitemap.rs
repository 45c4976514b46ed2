//! Sitemap feed for published content.

use std::fmt::{self, Write};

use chrono::{DateTime, Utc};
use html_escape::encode_text;
use serde::Serialize;

use crate::model::{Article, CatalogEntry, Recipe};

pub const RECIPE_PRIORITY: f32 = 1.0;
pub const ARTICLE_PRIORITY: f32 = 0.9;
pub const CHANGE_FREQUENCY: &str = "weekly";

/// One `<url>` element of the sitemap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    /// Site-relative path, e.g. `/recipe/pho/`
    pub path: String,
    pub slug: String,
    pub lastmod: DateTime<Utc>,
    pub priority: f32,
    pub changefreq: &'static str,
}

fn entry<T: CatalogEntry>(prefix: &str, item: &T, priority: f32) -> SitemapEntry {
    SitemapEntry {
        path: format!("/{}/{}/", prefix, item.slug()),
        slug: item.slug().to_string(),
        lastmod: item.updated_at(),
        priority,
        changefreq: CHANGE_FREQUENCY,
    }
}

/// Entries for every published recipe, then every published article
pub fn entries<'a>(
    recipes: impl IntoIterator<Item = &'a Recipe>,
    articles: impl IntoIterator<Item = &'a Article>,
) -> Vec<SitemapEntry> {
    recipes
        .into_iter()
        .filter(|r| r.is_published)
        .map(|r| entry("recipe", r, RECIPE_PRIORITY))
        .chain(
            articles
                .into_iter()
                .filter(|a| a.is_published)
                .map(|a| entry("story", a, ARTICLE_PRIORITY)),
        )
        .collect()
}

fn write_urlset(out: &mut String, entries: &[SitemapEntry], base: &str) -> fmt::Result {
    writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(
        out,
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"
    )?;
    for entry in entries {
        let location = format!("{}{}", base, entry.path);
        writeln!(out, "  <url>")?;
        writeln!(out, "    <loc>{}</loc>", encode_text(&location))?;
        writeln!(out, "    <lastmod>{}</lastmod>", entry.lastmod.format("%Y-%m-%d"))?;
        writeln!(out, "    <changefreq>{}</changefreq>", entry.changefreq)?;
        writeln!(out, "    <priority>{:.1}</priority>", entry.priority)?;
        writeln!(out, "  </url>")?;
    }
    writeln!(out, "</urlset>")
}

/// Render entries as a sitemaps.org `urlset` document
pub fn render_xml(entries: &[SitemapEntry], base_url: &str) -> String {
    let mut xml = String::new();
    // Writing into a String cannot fail
    let _ = write_urlset(&mut xml, entries, base_url.trim_end_matches('/'));
    xml
}
