//! Package source descriptors.

use crate::config::ProtocolConfig;
use serde::{Deserialize, Serialize};

/// A named package feed.
///
/// The registry keys its repository cache on `url` alone, compared as an exact,
/// case-sensitive string. `name` only matters when switching the active source,
/// where it is looked up case-insensitively in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageSource {
    pub name: String,
    pub url: String,
}

impl PackageSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Key under which the registry caches this source's repository.
    pub fn cache_key(&self) -> &str {
        &self.url
    }

    /// Case-insensitive name comparison used for catalog lookups.
    pub fn name_matches(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

impl std::fmt::Display for PackageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

/// Compare two source names ignoring case.
///
/// Folds with Unicode lowercase mappings, so non-ASCII letters match too.
pub fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// A source as stored by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSource {
    pub name: String,
    pub url: String,
    /// Marks the synthetic "all sources" entry, which has no feed of its own.
    #[serde(default)]
    pub is_aggregate: bool,
}

impl CatalogSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            is_aggregate: false,
        }
    }

    /// The aggregate pseudo-source.
    pub fn aggregate() -> Self {
        Self {
            name: ProtocolConfig::AGGREGATE_SOURCE_NAME.to_string(),
            url: ProtocolConfig::AGGREGATE_SOURCE_URL.to_string(),
            is_aggregate: true,
        }
    }

    pub fn to_package_source(&self) -> PackageSource {
        PackageSource::new(self.name.clone(), self.url.clone())
    }
}

impl From<CatalogSource> for PackageSource {
    fn from(source: CatalogSource) -> Self {
        PackageSource::new(source.name, source.url)
    }
}

impl From<&CatalogSource> for PackageSource {
    fn from(source: &CatalogSource) -> Self {
        source.to_package_source()
    }
}
