//! Error types for the package source registry.
//!
//! Every failure the registry surfaces is a distinct variant so callers can
//! react to it (prompt for configuration, show the unknown name, retry
//! construction) instead of inspecting message strings.

use thiserror::Error;

/// Main error type for registry operations.
#[derive(Debug, Error)]
pub enum SourceError {
    /// `change_active_source` named a source that is not enabled in the catalog.
    #[error("Unknown package source: {name}")]
    UnknownSource { name: String },

    /// The catalog has no active source configured.
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    /// A protocol client could not be constructed for the source.
    #[error("Failed to create repository for {url}: {message}")]
    Construction {
        url: String,
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// The catalog rejected a mutation.
    #[error("Catalog error: {message}")]
    Catalog { message: String },
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Copyable discriminant of [`SourceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownSource,
    InvalidState,
    Construction,
    Catalog,
}

impl SourceError {
    /// Wrap a factory failure for the given source URL.
    pub fn construction(url: impl Into<String>, source: anyhow::Error) -> Self {
        SourceError::Construction {
            url: url.into(),
            message: source.to_string(),
            source,
        }
    }

    /// Error returned when the catalog reports no active source.
    pub fn no_active_source() -> Self {
        SourceError::InvalidState {
            message: "no active package source is configured".to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::UnknownSource { .. } => ErrorKind::UnknownSource,
            SourceError::InvalidState { .. } => ErrorKind::InvalidState,
            SourceError::Construction { .. } => ErrorKind::Construction,
            SourceError::Catalog { .. } => ErrorKind::Catalog,
        }
    }

    /// Check if repeating the call may succeed.
    ///
    /// Only construction failures qualify: they leave no cache entry, so the
    /// next lookup builds the client again from scratch.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SourceError::Construction { .. })
    }
}
