//! Packsource - In-process registry of package sources and their protocol clients.
//!
//! This crate maps a logical package source (name + URL) to a live client able
//! to talk to it. It memoizes one client per source URL and picks the protocol
//! implementation from the URL. Active-source switching and source listing stay
//! consistent with an externally owned [`SourceCatalog`].
//!
//! The catalog's storage and the legacy client implementation are supplied by
//! the embedder through the [`SourceCatalog`] and [`RepositoryFactory`] traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use packsource::{CatalogSource, InMemorySourceCatalog, PackageSource, SourceRegistry};
//!
//! let catalog = Arc::new(InMemorySourceCatalog::with_sources([
//!     CatalogSource::new("nuget.org", "https://www.nuget.org/api/v2"),
//! ]));
//! let registry = SourceRegistry::new(catalog, Arc::new(MyFactory));
//!
//! let choice = PackageSource::new("NuGet.org", "https://www.nuget.org/api/v2");
//! registry.change_active_source(&choice)?;
//! let repo = registry.active_repository()?;
//! println!("Using {} via {}", repo.source(), repo.protocol());
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod protocol;
pub mod registry;

// Re-export commonly used types
pub use catalog::{InMemorySourceCatalog, SourceCatalog, SourcesSavedCallback};
pub use config::{ProtocolConfig, RegistryConfig};
pub use error::{ErrorKind, Result, SourceError};
pub use models::{CatalogSource, PackageSource};
pub use protocol::{
    create_repository, select_protocol, LegacyFeed, LegacyRepository, NextGenRepository,
    PackageRepository, ProtocolVersion, RepositoryFactory, SourceRepository,
};
pub use registry::{
    AvailableSources, SourceRegistry, SourceRegistryBuilder, SourcesChangedCallback,
    SubscriptionId,
};
