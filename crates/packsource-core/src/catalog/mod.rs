//! The source catalog: the external owner of configured package sources.
//!
//! The registry treats the catalog as the single source of truth for which
//! sources exist, which are enabled and which is active. It never caches any of
//! that state, only the repositories derived from it.

mod memory;

pub use memory::InMemorySourceCatalog;

use crate::error::Result;
use crate::models::CatalogSource;

/// Callback invoked after the catalog's source list has been saved.
///
/// Returns whether it wants to stay registered. A listener whose owner is gone
/// returns `false` and the catalog drops it.
pub type SourcesSavedCallback = Box<dyn Fn() -> bool + Send + Sync + 'static>;

/// Contract the registry consumes from whatever stores package sources.
pub trait SourceCatalog: Send + Sync {
    /// The currently active source, if one is configured.
    fn active_source(&self) -> Option<CatalogSource>;

    /// All enabled sources, in catalog order.
    fn enabled_sources(&self) -> Vec<CatalogSource>;

    /// Mark `source` as the active source.
    ///
    /// The registry always passes a descriptor previously returned by
    /// [`SourceCatalog::enabled_sources`].
    fn set_active_source(&self, source: &CatalogSource) -> Result<()>;

    /// Register a callback for "sources saved" notifications.
    ///
    /// Callbacks run synchronously on the thread that saved the sources.
    /// Implementations should unregister a callback once it returns `false`.
    fn on_sources_saved(&self, callback: SourcesSavedCallback);
}
