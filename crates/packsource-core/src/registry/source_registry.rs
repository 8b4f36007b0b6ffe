//! Concurrent, memoizing map from package sources to repository clients.

use crate::catalog::SourceCatalog;
use crate::config::RegistryConfig;
use crate::error::{Result, SourceError};
use crate::models::PackageSource;
use crate::protocol::{self, RepositoryFactory, SourceRepository};
use crate::registry::available::AvailableSources;
use crate::registry::builder::SourceRegistryBuilder;
use crate::registry::events::{SourcesChangedNotifier, SubscriptionId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Hands out one shared repository client per package source URL.
///
/// The catalog decides which sources exist and which one is active; the
/// registry only turns those descriptors into clients and caches them. Cache
/// entries are created on first use and kept for the registry's lifetime, even
/// across "sources changed" notifications.
///
/// Share a single instance (usually behind an `Arc`) with everything that
/// needs repository resolution.
pub struct SourceRegistry {
    catalog: Arc<dyn SourceCatalog>,
    factory: Arc<dyn RepositoryFactory>,
    config: RegistryConfig,
    /// Source URL -> client. Exact, case-sensitive keys.
    repos: RwLock<HashMap<String, Arc<SourceRepository>>>,
    changes: Arc<SourcesChangedNotifier>,
}

impl SourceRegistry {
    /// Create a registry with default configuration.
    pub fn new(catalog: Arc<dyn SourceCatalog>, factory: Arc<dyn RepositoryFactory>) -> Self {
        Self::with_config(catalog, factory, RegistryConfig::default())
    }

    /// Create a registry with custom configuration.
    ///
    /// Subscribes to the catalog's "sources saved" notification. The
    /// subscription holds only a weak reference to the registry's observers
    /// and asks the catalog to drop it once the registry is gone.
    pub fn with_config(
        catalog: Arc<dyn SourceCatalog>,
        factory: Arc<dyn RepositoryFactory>,
        config: RegistryConfig,
    ) -> Self {
        let changes = Arc::new(SourcesChangedNotifier::new());
        let observers = Arc::downgrade(&changes);
        catalog.on_sources_saved(Box::new(move || match observers.upgrade() {
            Some(observers) => {
                observers.notify();
                true
            }
            None => false,
        }));

        info!(
            "Source registry ready (next-gen host: {})",
            config.next_gen_host
        );

        Self {
            catalog,
            factory,
            config,
            repos: RwLock::new(HashMap::new()),
            changes,
        }
    }

    /// Create a builder for SourceRegistry.
    pub fn builder(
        catalog: Arc<dyn SourceCatalog>,
        factory: Arc<dyn RepositoryFactory>,
    ) -> SourceRegistryBuilder {
        SourceRegistryBuilder::new(catalog, factory)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // === Repository Resolution ===

    /// Repository for the catalog's active source.
    ///
    /// Returns [`SourceError::InvalidState`] without touching the cache when no
    /// source is active.
    pub fn active_repository(&self) -> Result<Arc<SourceRepository>> {
        let active = self
            .catalog
            .active_source()
            .ok_or_else(SourceError::no_active_source)?;

        if active.is_aggregate {
            warn!("Active package source is the aggregate source; this should not happen");
        }

        self.get_or_create(&active.to_package_source())
    }

    /// Repository for an arbitrary source, created on first use.
    pub fn create_source_repository(
        &self,
        source: &PackageSource,
    ) -> Result<Arc<SourceRepository>> {
        self.get_or_create(source)
    }

    /// Cached repository for `url`, without creating one.
    pub fn cached_repository(&self, url: &str) -> Option<Arc<SourceRepository>> {
        self.read_repos().get(url).cloned()
    }

    /// Number of cached repositories.
    pub fn cached_repository_count(&self) -> usize {
        self.read_repos().len()
    }

    /// Look up the cached client for `source.url` or build and publish one.
    ///
    /// Construction runs with no lock held, so two threads may both build a
    /// client for the same new URL. Only the first to publish is kept and every
    /// caller receives that instance. Failed constructions are not cached.
    fn get_or_create(&self, source: &PackageSource) -> Result<Arc<SourceRepository>> {
        if let Some(repo) = self.read_repos().get(source.cache_key()) {
            return Ok(Arc::clone(repo));
        }

        let created = Arc::new(protocol::create_repository(
            source,
            self.factory.as_ref(),
            &self.config,
        )?);

        let mut repos = self.write_repos();
        let published = repos
            .entry(source.cache_key().to_string())
            .or_insert_with(|| Arc::clone(&created));

        if Arc::ptr_eq(published, &created) {
            debug!("Cached repository for {}", source);
        } else {
            debug!("Discarded duplicate repository for {}", source.url);
        }
        Ok(Arc::clone(published))
    }

    // === Source Management ===

    /// Live view of the catalog's enabled sources.
    pub fn available_sources(&self) -> AvailableSources {
        AvailableSources::new(Arc::clone(&self.catalog))
    }

    /// Make the enabled source named `new_source.name` active.
    ///
    /// The name is matched case-insensitively. The catalog's stored descriptor
    /// is what gets activated; a differing `new_source.url` is only logged. No
    /// repository is created here.
    pub fn change_active_source(&self, new_source: &PackageSource) -> Result<()> {
        let source = self
            .catalog
            .enabled_sources()
            .into_iter()
            .find(|s| new_source.name_matches(&s.name))
            .ok_or_else(|| SourceError::UnknownSource {
                name: new_source.name.clone(),
            })?;

        if source.url != new_source.url {
            warn!(
                "Source '{}' requested with URL {} but catalog has {}; using catalog URL",
                source.name, new_source.url, source.url
            );
        }

        self.catalog.set_active_source(&source)?;
        info!("Active package source changed to {}", source.name);
        Ok(())
    }

    // === Change Notification ===

    /// Run `callback` every time the catalog saves its source list.
    ///
    /// Callbacks run synchronously on the saving thread, in no particular order.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.changes.subscribe(Arc::new(callback))
    }

    /// Remove a subscription. Returns false if it was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.changes.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.changes.subscriber_count()
    }

    // Entries are only ever inserted whole, so a poisoned map is still consistent.
    fn read_repos(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<SourceRepository>>> {
        self.repos.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_repos(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<SourceRepository>>> {
        self.repos.write().unwrap_or_else(PoisonError::into_inner)
    }
}
