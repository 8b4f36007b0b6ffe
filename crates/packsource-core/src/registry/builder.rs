//! Builder for configuring SourceRegistry construction.

use crate::catalog::SourceCatalog;
use crate::config::RegistryConfig;
use crate::protocol::RepositoryFactory;
use crate::registry::SourceRegistry;
use std::sync::Arc;

/// Builder for configuring [`SourceRegistry`] construction.
///
/// # Example
///
/// ```rust,ignore
/// let registry = SourceRegistry::builder(catalog, factory)
///     .next_gen_host("api.feeds.internal")
///     .build();
/// ```
pub struct SourceRegistryBuilder {
    catalog: Arc<dyn SourceCatalog>,
    factory: Arc<dyn RepositoryFactory>,
    config: RegistryConfig,
}

impl SourceRegistryBuilder {
    /// Create a builder from the two collaborators the registry needs.
    pub fn new(catalog: Arc<dyn SourceCatalog>, factory: Arc<dyn RepositoryFactory>) -> Self {
        Self {
            catalog,
            factory,
            config: RegistryConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the host that routes sources to the next-generation client.
    ///
    /// Default: [`crate::config::ProtocolConfig::NEXT_GEN_HOST`]
    pub fn next_gen_host(mut self, host: impl Into<String>) -> Self {
        self.config.next_gen_host = host.into();
        self
    }

    /// Build the registry.
    pub fn build(self) -> SourceRegistry {
        SourceRegistry::with_config(self.catalog, self.factory, self.config)
    }
}
