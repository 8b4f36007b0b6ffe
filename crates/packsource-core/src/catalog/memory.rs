//! Thread-safe in-memory source catalog.

use crate::catalog::{SourceCatalog, SourcesSavedCallback};
use crate::error::{Result, SourceError};
use crate::models::{names_match, CatalogSource};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

#[derive(Debug, Clone)]
struct CatalogEntry {
    source: CatalogSource,
    enabled: bool,
}

#[derive(Debug, Default)]
struct CatalogState {
    entries: Vec<CatalogEntry>,
    active: Option<CatalogSource>,
}

/// In-memory [`SourceCatalog`] for embedding and tests.
///
/// Mutations change the in-memory list immediately. Subscribers hear about
/// them only when [`InMemorySourceCatalog::save`] is called, mirroring a
/// settings store that raises its event on save rather than on every edit.
#[derive(Default)]
pub struct InMemorySourceCatalog {
    state: RwLock<CatalogState>,
    saved_callbacks: RwLock<Vec<Arc<dyn Fn() -> bool + Send + Sync + 'static>>>,
}

impl InMemorySourceCatalog {
    /// Create an empty catalog with no active source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog whose sources are all enabled.
    pub fn with_sources(sources: impl IntoIterator<Item = CatalogSource>) -> Self {
        let catalog = Self::new();
        for source in sources {
            catalog.add_source(source);
        }
        catalog
    }

    /// Add an enabled source. Returns false if a source with the same name
    /// (case-insensitive) already exists.
    pub fn add_source(&self, source: CatalogSource) -> bool {
        let mut state = self.write_state();
        if state
            .entries
            .iter()
            .any(|e| names_match(&e.source.name, &source.name))
        {
            return false;
        }
        debug!("Added catalog source: {} ({})", source.name, source.url);
        state.entries.push(CatalogEntry {
            source,
            enabled: true,
        });
        true
    }

    /// Remove a source by name. Clears the active source if it was removed.
    pub fn remove_source(&self, name: &str) -> bool {
        let mut state = self.write_state();
        let before = state.entries.len();
        state
            .entries
            .retain(|e| !names_match(&e.source.name, name));
        let removed = state.entries.len() != before;

        if removed
            && state
                .active
                .as_ref()
                .is_some_and(|a| names_match(&a.name, name))
        {
            state.active = None;
        }
        removed
    }

    /// Enable or disable a source by name. Returns false if no such source exists.
    pub fn set_enabled(&self, name: &str, enabled: bool) -> bool {
        let mut state = self.write_state();
        match state
            .entries
            .iter_mut()
            .find(|e| names_match(&e.source.name, name))
        {
            Some(entry) => {
                entry.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Make the aggregate pseudo-source active.
    pub fn activate_aggregate(&self) {
        self.write_state().active = Some(CatalogSource::aggregate());
    }

    /// Forget the active source.
    pub fn clear_active(&self) {
        self.write_state().active = None;
    }

    /// Number of registered "sources saved" callbacks.
    pub fn saved_callback_count(&self) -> usize {
        self.saved_callbacks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Persist the source list and notify subscribers.
    ///
    /// Callbacks that return `false` are unregistered afterwards.
    pub fn save(&self) {
        let callbacks: Vec<_> = self
            .saved_callbacks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        debug!("Package sources saved, notifying {} listeners", callbacks.len());
        let stale: Vec<_> = callbacks
            .into_iter()
            .filter(|callback| !callback())
            .collect();

        if !stale.is_empty() {
            debug!("Dropping {} stale sources-saved listeners", stale.len());
            self.saved_callbacks
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|callback| !stale.iter().any(|s| Arc::ptr_eq(s, callback)));
        }
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SourceCatalog for InMemorySourceCatalog {
    fn active_source(&self) -> Option<CatalogSource> {
        self.read_state().active.clone()
    }

    fn enabled_sources(&self) -> Vec<CatalogSource> {
        self.read_state()
            .entries
            .iter()
            .filter(|e| e.enabled)
            .map(|e| e.source.clone())
            .collect()
    }

    fn set_active_source(&self, source: &CatalogSource) -> Result<()> {
        let mut state = self.write_state();
        if source.is_aggregate {
            state.active = Some(source.clone());
            return Ok(());
        }

        let stored = state
            .entries
            .iter()
            .find(|e| e.enabled && names_match(&e.source.name, &source.name))
            .map(|e| e.source.clone())
            .ok_or_else(|| SourceError::Catalog {
                message: format!("source '{}' is not enabled in the catalog", source.name),
            })?;

        debug!("Active package source set to {}", stored.name);
        state.active = Some(stored);
        Ok(())
    }

    fn on_sources_saved(&self, callback: SourcesSavedCallback) {
        self.saved_callbacks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::from(callback));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_catalog() -> InMemorySourceCatalog {
        InMemorySourceCatalog::with_sources([
            CatalogSource::new("nuget.org", "https://www.nuget.org/api/v2"),
            CatalogSource::new("preview", "https://preview.nuget.org/ver3"),
        ])
    }

    #[test]
    fn test_add_rejects_duplicate_names() {
        let catalog = sample_catalog();
        assert!(!catalog.add_source(CatalogSource::new("NuGet.org", "https://other")));
        assert_eq!(catalog.enabled_sources().len(), 2);
    }

    #[test]
    fn test_disabled_sources_are_hidden() {
        let catalog = sample_catalog();
        assert!(catalog.set_enabled("preview", false));
        let names: Vec<_> = catalog.enabled_sources().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["nuget.org"]);
        assert!(!catalog.set_enabled("missing", false));
    }

    #[test]
    fn test_set_active_requires_enabled_source() {
        let catalog = sample_catalog();
        catalog.set_enabled("preview", false);

        let err = catalog
            .set_active_source(&CatalogSource::new("preview", "https://preview.nuget.org/ver3"))
            .unwrap_err();
        assert!(matches!(err, SourceError::Catalog { .. }));
        assert!(catalog.active_source().is_none());

        catalog
            .set_active_source(&CatalogSource::new("NUGET.ORG", "ignored"))
            .unwrap();
        let active = catalog.active_source().unwrap();
        assert_eq!(active.name, "nuget.org");
        assert_eq!(active.url, "https://www.nuget.org/api/v2");
    }

    #[test]
    fn test_remove_clears_active() {
        let catalog = sample_catalog();
        catalog
            .set_active_source(&CatalogSource::new("preview", ""))
            .unwrap();
        assert!(catalog.remove_source("Preview"));
        assert!(catalog.active_source().is_none());
        assert!(!catalog.remove_source("Preview"));
    }

    #[test]
    fn test_save_notifies_each_callback_once() {
        let catalog = sample_catalog();
        let hits = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            catalog.on_sources_saved(Box::new(move || {
                hits.fetch_add(1, Ordering::SeqCst);
                true
            }));
        }

        catalog.save();
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert_eq!(catalog.saved_callback_count(), 3);
    }

    #[test]
    fn test_save_drops_callbacks_that_unregister() {
        let catalog = sample_catalog();
        let hits = Arc::new(AtomicUsize::new(0));
        let once = Arc::clone(&hits);
        catalog.on_sources_saved(Box::new(move || {
            once.fetch_add(1, Ordering::SeqCst);
            false
        }));
        catalog.on_sources_saved(Box::new(|| true));

        catalog.save();
        assert_eq!(catalog.saved_callback_count(), 1);

        catalog.save();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(catalog.saved_callback_count(), 1);
    }

    #[test]
    fn test_name_lookups_fold_non_ascii_case() {
        let catalog = InMemorySourceCatalog::with_sources([CatalogSource::new(
            "Übersicht",
            "https://feeds.example.de/v2",
        )]);

        assert!(!catalog.add_source(CatalogSource::new("ÜBERSICHT", "https://other")));
        assert!(catalog.set_enabled("übersicht", true));
        catalog
            .set_active_source(&CatalogSource::new("übersicht", "ignored"))
            .unwrap();
        assert_eq!(catalog.active_source().unwrap().name, "Übersicht");
        assert!(catalog.remove_source("ÜBERSICHT"));
        assert!(catalog.active_source().is_none());
    }

    #[test]
    fn test_activate_aggregate() {
        let catalog = sample_catalog();
        catalog.activate_aggregate();
        assert!(catalog.active_source().unwrap().is_aggregate);
        catalog.clear_active();
        assert!(catalog.active_source().is_none());
    }
}
