//! Live view over the catalog's enabled sources.

use crate::catalog::SourceCatalog;
use crate::models::{CatalogSource, PackageSource};
use std::sync::Arc;

/// Iterator produced by [`AvailableSources`].
pub type AvailableSourcesIter =
    std::iter::Map<std::vec::IntoIter<CatalogSource>, fn(CatalogSource) -> PackageSource>;

/// Restartable sequence of the catalog's enabled sources.
///
/// Nothing is read when the view is created. Every call to
/// [`AvailableSources::iter`] reads the catalog again, so a long-lived view
/// never goes stale.
#[derive(Clone)]
pub struct AvailableSources {
    catalog: Arc<dyn SourceCatalog>,
}

impl AvailableSources {
    pub(crate) fn new(catalog: Arc<dyn SourceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn iter(&self) -> AvailableSourcesIter {
        self.catalog
            .enabled_sources()
            .into_iter()
            .map(into_package_source as fn(CatalogSource) -> PackageSource)
    }
}

fn into_package_source(source: CatalogSource) -> PackageSource {
    source.into()
}

impl IntoIterator for &AvailableSources {
    type Item = PackageSource;
    type IntoIter = AvailableSourcesIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for AvailableSources {
    type Item = PackageSource;
    type IntoIter = AvailableSourcesIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for AvailableSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvailableSources").finish_non_exhaustive()
    }
}
