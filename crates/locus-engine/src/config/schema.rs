use serde::{Deserialize, Serialize};

use crate::resolve::Strategy;
use crate::weights::Weights;

/// Root configuration. Every field has a default, so a partial file only
/// overrides what it names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocusConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub weights: Weights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Strategy used when the host does not pick one per call.
    #[serde(default)]
    pub strategy: Strategy,
    /// Longest text, in characters, the strong relative path may anchor on.
    /// Longer text is too fragile to pin a locator to.
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            max_text_len: default_max_text_len(),
        }
    }
}

fn default_max_text_len() -> usize {
    80
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_sections() {
        let config: LocusConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.resolver.strategy, Strategy::Scored);
        assert_eq!(config.resolver.max_text_len, 80);
        assert_eq!(config.weights.classic.id, 100);
    }

    #[test]
    fn partial_resolver_section_keeps_other_defaults() {
        let config: LocusConfig =
            serde_yaml::from_str("resolver:\n  strategy: legacy\n").unwrap();
        assert_eq!(config.resolver.strategy, Strategy::Legacy);
        assert_eq!(config.resolver.max_text_len, 80);
    }
}
