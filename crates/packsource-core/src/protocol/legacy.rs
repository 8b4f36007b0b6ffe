//! Legacy-protocol repositories built by an external factory.

use super::repository::PackageRepository;
use super::ProtocolVersion;
use crate::models::PackageSource;
use std::sync::Arc;

/// Opaque client object produced by a [`RepositoryFactory`].
pub trait LegacyFeed: Send + Sync {
    /// URL the client was built for.
    fn url(&self) -> &str;
}

/// Builds legacy-protocol clients from a raw source URL.
///
/// Construction cost and latency are up to the implementation; the registry
/// calls this without holding any lock.
pub trait RepositoryFactory: Send + Sync {
    fn create_repository(&self, url: &str) -> anyhow::Result<Arc<dyn LegacyFeed>>;
}

/// A legacy feed paired with the descriptor it was created for.
#[derive(Clone)]
pub struct LegacyRepository {
    source: PackageSource,
    feed: Arc<dyn LegacyFeed>,
}

impl LegacyRepository {
    pub fn new(source: PackageSource, feed: Arc<dyn LegacyFeed>) -> Self {
        Self { source, feed }
    }

    /// The factory-built client.
    pub fn feed(&self) -> &Arc<dyn LegacyFeed> {
        &self.feed
    }
}

impl PackageRepository for LegacyRepository {
    fn source(&self) -> &PackageSource {
        &self.source
    }

    fn protocol(&self) -> ProtocolVersion {
        ProtocolVersion::Legacy
    }
}

impl std::fmt::Debug for LegacyRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LegacyRepository")
            .field("source", &self.source)
            .field("feed_url", &self.feed.url())
            .finish()
    }
}
