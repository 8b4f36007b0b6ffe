//! Centralized configuration for the source registry.
//!
//! Constants live on unit structs; [`RegistryConfig`] carries the values an
//! embedder may override at runtime.

use serde::{Deserialize, Serialize};

/// Protocol detection constants.
pub struct ProtocolConfig;

impl ProtocolConfig {
    /// Host that identifies a next-generation protocol endpoint.
    pub const NEXT_GEN_HOST: &'static str = "preview.nuget.org";
    /// Display name of the synthetic "all sources" pseudo-source.
    pub const AGGREGATE_SOURCE_NAME: &'static str = "All";
    /// URL placeholder carried by the aggregate pseudo-source.
    pub const AGGREGATE_SOURCE_URL: &'static str = "(Aggregate source)";
}

/// Runtime configuration for [`crate::SourceRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RegistryConfig {
    /// Sentinel host routed to the next-generation client (matched case-insensitively).
    pub next_gen_host: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            next_gen_host: ProtocolConfig::NEXT_GEN_HOST.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_sentinel_host() {
        let config = RegistryConfig::default();
        assert_eq!(config.next_gen_host, "preview.nuget.org");
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let config: RegistryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());

        let config: RegistryConfig =
            serde_json::from_str(r#"{"next_gen_host": "api.feeds.internal"}"#).unwrap();
        assert_eq!(config.next_gen_host, "api.feeds.internal");
    }
}
