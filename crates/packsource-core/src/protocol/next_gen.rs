//! Next-generation protocol repositories.

use super::repository::PackageRepository;
use super::ProtocolVersion;
use crate::models::PackageSource;
use url::Url;

/// Client for a source on the next-generation host.
///
/// Needs nothing beyond the descriptor; the parsed endpoint is kept so callers
/// don't re-parse the URL.
#[derive(Debug, Clone)]
pub struct NextGenRepository {
    source: PackageSource,
    endpoint: Url,
}

impl NextGenRepository {
    pub fn new(source: PackageSource, endpoint: Url) -> Self {
        Self { source, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl PackageRepository for NextGenRepository {
    fn source(&self) -> &PackageSource {
        &self.source
    }

    fn protocol(&self) -> ProtocolVersion {
        ProtocolVersion::NextGen
    }
}
