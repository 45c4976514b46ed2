use std::sync::Arc;

use log::debug;

use crate::catalog::{Catalog, Clock, SystemClock};
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::notify::{Notifier, NotifierFactory};
use crate::storage::{CatalogStore, InMemoryStore};

/// Builder for wiring a [`Catalog`] to its collaborators
#[derive(Default)]
pub struct CatalogBuilder {
    store: Option<Arc<dyn CatalogStore>>,
    notifier: Option<Box<dyn Notifier>>,
    config: Option<CatalogConfig>,
    clock: Option<Arc<dyn Clock>>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage backend
    ///
    /// Defaults to an empty [`InMemoryStore`].
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use mesa_catalog::{Catalog, InMemoryStore};
    ///
    /// let builder = Catalog::builder().store(Arc::new(InMemoryStore::new()));
    /// ```
    pub fn store(mut self, store: Arc<dyn CatalogStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the operator notifier
    ///
    /// When unset, the notifier named in the configuration is created.
    ///
    /// # Example
    /// ```
    /// use mesa_catalog::{Catalog, LogNotifier};
    ///
    /// let builder = Catalog::builder()
    ///     .notifier(Box::new(LogNotifier::new("editors@example.com")));
    /// ```
    pub fn notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Set the configuration
    ///
    /// # Example
    /// ```
    /// use mesa_catalog::{Catalog, CatalogConfig};
    ///
    /// let mut config = CatalogConfig::default();
    /// config.listing.recipes_per_page = 24;
    /// let builder = Catalog::builder().config(config);
    /// ```
    pub fn config(mut self, config: CatalogConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the time source used for `created_at`/`updated_at`
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the catalog
    ///
    /// # Errors
    /// Returns `CatalogError::BuilderError` if the configured notifier
    /// cannot be created (e.g., `mail_relay` without an endpoint).
    ///
    /// # Example
    /// ```
    /// # use mesa_catalog::Catalog;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let catalog = Catalog::builder().build().await?;
    /// assert!(catalog.regions().await?.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<Catalog, CatalogError> {
        let config = self.config.unwrap_or_default();

        let notifier = match self.notifier {
            Some(notifier) => notifier,
            None => NotifierFactory::create(&config.notification).map_err(|e| {
                CatalogError::BuilderError(format!("Failed to create notifier: {}", e))
            })?,
        };
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryStore::new()) as Arc<dyn CatalogStore>);
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);

        debug!(
            "Building catalog on {} storage with {} notifier",
            store.backend_name(),
            notifier.notifier_name()
        );
        Ok(Catalog::new(store, Arc::from(notifier), config, clock))
    }
}

impl Catalog {
    /// Creates a new builder for a catalog
    ///
    /// # Example
    /// ```
    /// use mesa_catalog::Catalog;
    ///
    /// let builder = Catalog::builder();
    /// ```
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }
}
