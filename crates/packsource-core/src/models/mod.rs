//! Value types shared by the registry, catalog and protocol layers.

mod source;

pub use source::{names_match, CatalogSource, PackageSource};
