//! The source registry: resolves package sources to cached repository clients.
//!
//! - **Resolution**: one client per source URL, built on first use and shared
//!   by every caller afterwards
//! - **Active source**: read from and written to the catalog, never stored here
//! - **Notifications**: re-broadcasts the catalog's "sources saved" event

mod available;
mod builder;
mod events;
mod source_registry;

pub use available::{AvailableSources, AvailableSourcesIter};
pub use builder::SourceRegistryBuilder;
pub use events::{SourcesChangedCallback, SubscriptionId};
pub use source_registry::SourceRegistry;
