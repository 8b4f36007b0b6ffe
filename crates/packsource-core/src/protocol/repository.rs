//! The repository handle handed out by the registry.

use super::{LegacyRepository, NextGenRepository, ProtocolVersion};
use crate::models::PackageSource;

/// Capability shared by every protocol client.
pub trait PackageRepository: Send + Sync {
    /// Descriptor the repository was created for.
    fn source(&self) -> &PackageSource;

    /// Protocol the repository speaks.
    fn protocol(&self) -> ProtocolVersion;
}

/// A ready-to-use client for one package source.
///
/// Closed set: every handle is one of these variants.
#[derive(Debug, Clone)]
pub enum SourceRepository {
    NextGen(NextGenRepository),
    Legacy(LegacyRepository),
}

impl SourceRepository {
    fn inner(&self) -> &dyn PackageRepository {
        match self {
            SourceRepository::NextGen(repo) => repo,
            SourceRepository::Legacy(repo) => repo,
        }
    }

    pub fn as_next_gen(&self) -> Option<&NextGenRepository> {
        match self {
            SourceRepository::NextGen(repo) => Some(repo),
            SourceRepository::Legacy(_) => None,
        }
    }

    pub fn as_legacy(&self) -> Option<&LegacyRepository> {
        match self {
            SourceRepository::Legacy(repo) => Some(repo),
            SourceRepository::NextGen(_) => None,
        }
    }
}

impl PackageRepository for SourceRepository {
    fn source(&self) -> &PackageSource {
        self.inner().source()
    }

    fn protocol(&self) -> ProtocolVersion {
        self.inner().protocol()
    }
}
