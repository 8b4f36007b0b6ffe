//! Protocol selection for package sources.
//!
//! Decides which client implementation talks to a given source and builds it.
//! Detection is a heuristic on the source URL: a source whose host is the
//! configured sentinel host speaks the next-generation protocol, everything
//! else goes through the legacy repository factory.
//!
//! Adding a protocol means adding a [`ProtocolVersion`] and a
//! [`SourceRepository`] variant and extending [`create_repository`]; the
//! registry's caching and notification code stay untouched.

mod legacy;
mod next_gen;
mod repository;

pub use legacy::{LegacyFeed, LegacyRepository, RepositoryFactory};
pub use next_gen::NextGenRepository;
pub use repository::{PackageRepository, SourceRepository};

use crate::config::RegistryConfig;
use crate::error::{Result, SourceError};
use crate::models::PackageSource;
use tracing::debug;
use url::Url;

/// Protocol spoken by a package source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolVersion {
    /// Feeds served through the repository factory.
    Legacy,
    /// Feeds hosted on the sentinel next-generation host.
    NextGen,
}

impl std::fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolVersion::Legacy => write!(f, "legacy"),
            ProtocolVersion::NextGen => write!(f, "next-gen"),
        }
    }
}

/// Parse `url` and return it if its host is `next_gen_host`.
///
/// Relative references never parse as a [`Url`] and so never match.
fn next_gen_endpoint(url: &str, next_gen_host: &str) -> Option<Url> {
    let parsed = Url::parse(url).ok()?;
    let matches = parsed
        .host_str()
        .is_some_and(|host| host.eq_ignore_ascii_case(next_gen_host));
    matches.then_some(parsed)
}

/// Decide which protocol handles `url`.
pub fn select_protocol(url: &str, next_gen_host: &str) -> ProtocolVersion {
    match next_gen_endpoint(url, next_gen_host) {
        Some(_) => ProtocolVersion::NextGen,
        None => ProtocolVersion::Legacy,
    }
}

/// Build the client for `source`.
///
/// Next-generation clients are built from the descriptor alone. Legacy clients
/// are built by `factory` from the raw URL; a factory failure is returned as
/// [`SourceError::Construction`].
pub fn create_repository(
    source: &PackageSource,
    factory: &dyn RepositoryFactory,
    config: &RegistryConfig,
) -> Result<SourceRepository> {
    if let Some(endpoint) = next_gen_endpoint(&source.url, &config.next_gen_host) {
        debug!("Creating next-gen repository for {}", source);
        return Ok(SourceRepository::NextGen(NextGenRepository::new(
            source.clone(),
            endpoint,
        )));
    }

    debug!("Creating legacy repository for {}", source);
    let feed = factory
        .create_repository(&source.url)
        .map_err(|e| SourceError::construction(source.url.clone(), e))?;
    Ok(SourceRepository::Legacy(LegacyRepository::new(
        source.clone(),
        feed,
    )))
}
