//! Slug and SEO field derivation.
//!
//! Everything here is a pure function of its inputs; uniqueness is checked
//! by the catalog against the store.

use crate::error::CatalogError;

const SEPARATOR: char = '-';

/// Derive a URL-safe slug from a display title.
///
/// Letters and digits are lower-cased and kept (including non-ASCII
/// letters); every run of whitespace or punctuation becomes a single `-`;
/// leading and trailing separators are dropped.
///
/// # Errors
/// Returns `CatalogError::Validation` if the title has no alphanumeric
/// characters.
///
/// # Example
/// ```
/// use mesa_catalog::slug::slugify;
///
/// assert_eq!(
///     slugify("Tom Kha Gai (Thai Coconut Chicken Soup)").unwrap(),
///     "tom-kha-gai-thai-coconut-chicken-soup"
/// );
/// assert!(slugify("  !!  ").is_err());
/// ```
pub fn slugify(title: &str) -> Result<String, CatalogError> {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        return Err(CatalogError::validation(format!(
            "cannot derive a slug from '{}': it has no letters or digits",
            title
        )));
    }
    Ok(slug)
}

/// Pick the slug to persist: a non-blank explicit slug is used verbatim
/// (minus surrounding whitespace), otherwise one is derived from `title`.
pub fn resolve_slug(explicit: &str, title: &str) -> Result<String, CatalogError> {
    let explicit = explicit.trim();
    if explicit.is_empty() {
        slugify(title)
    } else {
        Ok(explicit.to_string())
    }
}

/// `base-n`, the n-th alternative tried when `base` is taken (n starts at 2)
pub fn with_suffix(base: &str, n: usize) -> String {
    format!("{}{}{}", base, SEPARATOR, n)
}

/// Hard cut to at most `max` characters, no ellipsis
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

/// Fill an empty meta field from `source`, truncated to `max` characters.
/// A populated field is left untouched.
pub fn backfill(field: &mut String, source: &str, max: usize) {
    if field.is_empty() {
        *field = truncate_chars(source, max);
    }
}
