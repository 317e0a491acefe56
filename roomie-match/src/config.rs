//! Configuration for the compatibility engine.

use serde::{Deserialize, Serialize};

/// Configuration for the compatibility engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Pairwise analysis call settings
    pub pairwise: CallConfig,
    /// Bulk ranking call settings
    pub bulk: CallConfig,
    /// Cache settings
    pub cache: CacheConfig,
    /// Fallback settings
    pub fallback: FallbackConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            pairwise: CallConfig {
                temperature: 0.7,
                max_tokens: 1024,
            },
            bulk: CallConfig {
                temperature: 0.6,
                max_tokens: 2000,
            },
            cache: CacheConfig::default(),
            fallback: FallbackConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Per-call-type reasoning settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallConfig {
    /// Sampling temperature
    pub temperature: f32,
    /// Output token ceiling
    pub max_tokens: u32,
}

/// Cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Retention period for cached results (seconds)
    pub retention_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            retention_secs: 7 * 24 * 3600, // 7 days
        }
    }
}

/// Fallback settings for degraded pairwise results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Neutral score used when live analysis fails or omits the score
    pub neutral_score: u8,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self { neutral_score: 75 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.pairwise.max_tokens, 1024);
        assert_eq!(config.bulk.max_tokens, 2000);
        assert_eq!(config.cache.retention_secs, 604_800);
        assert_eq!(config.fallback.neutral_score, 75);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = MatchConfig::default();
        config.cache.retention_secs = 3600;

        let yaml = config.to_yaml().unwrap();
        let parsed = MatchConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.cache.retention_secs, 3600);
    }
}
