use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main catalog configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// Page sizes and aggregation limits
    #[serde(default)]
    pub listing: ListingConfig,
    /// Slug derivation behaviour
    #[serde(default)]
    pub slugs: SlugConfig,
    /// Operator notification for new submissions
    #[serde(default)]
    pub notification: NotificationConfig,
    /// Public site settings used for sitemap URLs
    #[serde(default)]
    pub site: SiteConfig,
}

/// Sizes of the fixed listing contexts
#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfig {
    #[serde(default = "default_recipes_per_page")]
    pub recipes_per_page: usize,
    #[serde(default = "default_articles_per_page")]
    pub articles_per_page: usize,
    /// Recipes shown on a region page
    #[serde(default = "default_region_recipes")]
    pub region_recipes: usize,
    /// Articles shown on a region page
    #[serde(default = "default_region_articles")]
    pub region_articles: usize,
    #[serde(default = "default_front_page_featured")]
    pub front_page_featured: usize,
    #[serde(default = "default_front_page_recipes")]
    pub front_page_recipes: usize,
    #[serde(default = "default_front_page_articles")]
    pub front_page_articles: usize,
    #[serde(default = "default_related_recipes")]
    pub related_recipes: usize,
    #[serde(default = "default_related_articles")]
    pub related_articles: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            recipes_per_page: default_recipes_per_page(),
            articles_per_page: default_articles_per_page(),
            region_recipes: default_region_recipes(),
            region_articles: default_region_articles(),
            front_page_featured: default_front_page_featured(),
            front_page_recipes: default_front_page_recipes(),
            front_page_articles: default_front_page_articles(),
            related_recipes: default_related_recipes(),
            related_articles: default_related_articles(),
        }
    }
}

/// What to do when a derived or explicit slug is already taken
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlugCollision {
    /// Fail the write with `CatalogError::DuplicateSlug`
    #[default]
    Reject,
    /// Append `-2`, `-3`, ... until the slug is free
    Suffix,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SlugConfig {
    #[serde(default)]
    pub collision: SlugCollision,
}

/// Which notifier delivers submission notices
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotifierKind {
    /// Only write the notice to the log
    #[default]
    Log,
    /// POST the notice to an HTTP mail relay
    MailRelay,
}

/// Configuration for operator notifications
#[derive(Debug, Deserialize, Clone)]
pub struct NotificationConfig {
    #[serde(default)]
    pub kind: NotifierKind,
    /// Mail relay URL (required for `mail_relay`)
    pub endpoint: Option<String>,
    /// Bearer token for the relay (can also be set via MESA_RELAY_API_KEY)
    pub api_key: Option<String>,
    #[serde(default = "default_operator_address")]
    pub operator_address: String,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            kind: NotifierKind::default(),
            endpoint: None,
            api_key: None,
            operator_address: default_operator_address(),
            from_address: default_from_address(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

// Default value functions
fn default_recipes_per_page() -> usize {
    12
}

fn default_articles_per_page() -> usize {
    10
}

fn default_region_recipes() -> usize {
    8
}

fn default_region_articles() -> usize {
    4
}

fn default_front_page_featured() -> usize {
    3
}

fn default_front_page_recipes() -> usize {
    6
}

fn default_front_page_articles() -> usize {
    4
}

fn default_related_recipes() -> usize {
    4
}

fn default_related_articles() -> usize {
    3
}

fn default_operator_address() -> String {
    "admin@mesaglobal.com".to_string()
}

fn default_from_address() -> String {
    "noreply@mesaglobal.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_base_url() -> String {
    "https://mesaglobal.com".to_string()
}

impl CatalogConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MESA__ prefix
    /// 2. catalog.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MESA__LISTING__RECIPES_PER_PAGE
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`CatalogConfig::load`] for the source priority.
pub fn load_config() -> Result<CatalogConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("catalog").required(false))
        // Use double underscore for nested: MESA__SLUGS__COLLISION
        .add_source(
            Environment::with_prefix("MESA")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
