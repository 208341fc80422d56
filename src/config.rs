//! Unified configuration for the key and pattern engine.
//!
//! Groups the tunables of the pattern cache, batch matching, name building
//! and the parameter registry. Every section has sensible defaults, so a
//! configuration file only needs the values it changes:
//!
//! ```yaml
//! cache:
//!   max_size: 200
//! batch:
//!   min_parallel_batch: 64
//! name_policy:
//!   default:
//!     postfix: "."
//! parameters:
//!   - name: Culture
//!     classification: non_canonical
//!     default_rule: "[a-z]{2}"
//!   - name: Key
//! ```

use crate::compiler::PatternCache;
use crate::error::{KeyError, Result};
use crate::key::ParameterInfos;
use crate::matcher::NamePolicy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use crate::compiler::CacheConfig;

/// Batch matching configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Minimum batch size to match on the rayon pool.
    pub min_parallel_batch: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            min_parallel_batch: 256,
        }
    }
}

impl BatchConfig {
    /// Never go parallel.
    pub fn sequential() -> Self {
        Self {
            min_parallel_batch: usize::MAX,
        }
    }
}

/// Complete engine configuration.
///
/// # Example
/// ```rust
/// use lexical_keys::config::LexicalConfig;
///
/// let config = LexicalConfig::new()
///     .with_cache_size(500)
///     .with_min_parallel_batch(64);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalConfig {
    /// Compiled pattern cache configuration
    pub cache: CacheConfig,
    /// Batch matching configuration
    pub batch: BatchConfig,
    /// Separators for pattern-less name building
    pub name_policy: NamePolicy,
    /// Known parameters, their classification and default rules
    pub parameters: ParameterInfos,
}

impl LexicalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for services matching large key sets.
    pub fn high_throughput() -> Self {
        Self {
            cache: CacheConfig { max_size: 5000 },
            batch: BatchConfig {
                min_parallel_batch: 64,
            },
            ..Default::default()
        }
    }

    /// Configuration for tools that compile few patterns and match serially.
    pub fn minimal() -> Self {
        Self {
            cache: CacheConfig { max_size: 64 },
            batch: BatchConfig::sequential(),
            ..Default::default()
        }
    }

    /// Parse a YAML configuration.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_cache_size(mut self, max_size: usize) -> Self {
        self.cache.max_size = max_size;
        self
    }

    pub fn with_min_parallel_batch(mut self, size: usize) -> Self {
        self.batch.min_parallel_batch = size;
        self
    }

    pub fn with_name_policy(mut self, policy: NamePolicy) -> Self {
        self.name_policy = policy;
        self
    }

    pub fn with_parameters(mut self, parameters: ParameterInfos) -> Self {
        self.parameters = parameters;
        self
    }

    /// A pattern cache sized by this configuration, compiling against its
    /// parameters.
    pub fn pattern_cache(&self) -> PatternCache {
        PatternCache::with_config_and_infos(self.cache.clone(), self.parameters.clone())
    }

    /// Check that the configuration is usable.
    ///
    /// Every default rule must compile, parameter names must be non-empty and
    /// unique, and the cache must hold at least one pattern.
    pub fn validate(&self) -> Result<()> {
        if self.cache.max_size == 0 {
            return Err(KeyError::Config("cache.max_size must be at least 1".to_string()));
        }

        let mut names: Vec<&str> = Vec::with_capacity(self.parameters.len());
        for info in self.parameters.iter() {
            if info.name.is_empty() {
                return Err(KeyError::Config("parameter name must not be empty".to_string()));
            }
            if names.contains(&info.name.as_str()) {
                return Err(KeyError::Config(format!("parameter '{}' is listed twice", info.name)));
            }
            names.push(&info.name);

            if let Some(rule) = &info.default_rule {
                Regex::new(&format!("^(?:{rule})$")).map_err(|e| {
                    KeyError::Config(format!("default rule of '{}': {}", info.name, e))
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{Classification, ParameterInfo};

    #[test]
    fn test_default_config() {
        let config = LexicalConfig::default();
        assert_eq!(config.cache.max_size, 1000);
        assert_eq!(config.batch.min_parallel_batch, 256);
        assert_eq!(config.parameters, ParameterInfos::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let fast = LexicalConfig::high_throughput();
        assert_eq!(fast.cache.max_size, 5000);
        assert_eq!(fast.batch.min_parallel_batch, 64);

        let minimal = LexicalConfig::minimal();
        assert_eq!(minimal.batch, BatchConfig::sequential());
    }

    #[test]
    fn test_builder_methods() {
        let config = LexicalConfig::new()
            .with_cache_size(10)
            .with_min_parallel_batch(2)
            .with_name_policy(NamePolicy::dotted());

        assert_eq!(config.cache.max_size, 10);
        assert_eq!(config.batch.min_parallel_batch, 2);
        assert_eq!(config.name_policy, NamePolicy::dotted());
        assert_eq!(config.pattern_cache().config().max_size, 10);
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = LexicalConfig::from_yaml(
            r#"
cache:
  max_size: 200
parameters:
  - name: Culture
    classification: non_canonical
    default_rule: "[a-z]{2}"
  - name: Key
"#,
        )
        .unwrap();

        assert_eq!(config.cache.max_size, 200);
        assert_eq!(config.batch, BatchConfig::default());
        assert_eq!(config.parameters.len(), 2);
        assert_eq!(config.parameters.classification("Culture"), Classification::NonCanonical);
        assert_eq!(config.parameters.classification("Key"), Classification::Canonical);
    }

    #[test]
    fn test_pattern_cache_uses_configured_parameters() {
        let config = LexicalConfig::from_yaml(
            r#"
parameters:
  - name: Culture
    classification: non_canonical
    default_rule: "[a-z]{2}"
  - name: Key
"#,
        )
        .unwrap();

        let cache = config.pattern_cache();
        let pattern = cache.get_or_compile("{Culture/}[Key]").unwrap();
        assert_eq!(pattern.capture(0).effective_rule(), Some("[a-z]{2}"));
        assert!(pattern.capture(0).accepts("fi"));
        assert!(!pattern.capture(0).accepts("en-US"));
        assert_eq!(cache.parameter_infos(), &config.parameters);
    }

    #[test]
    fn test_from_json() {
        let config =
            LexicalConfig::from_json(r#"{ "batch": { "min_parallel_batch": 8 } }"#).unwrap();
        assert_eq!(config.batch.min_parallel_batch, 8);
    }

    #[test]
    fn test_malformed_input_is_config_error() {
        assert!(matches!(
            LexicalConfig::from_yaml("cache: [1, 2"),
            Err(KeyError::Config(_))
        ));
        assert!(matches!(LexicalConfig::from_json("{"), Err(KeyError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_rule() {
        let config = LexicalConfig::new().with_parameters(
            ParameterInfos::empty()
                .with(ParameterInfo::new("Key", Classification::Canonical).with_default_rule("(")),
        );
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default rule of 'Key'"));
    }

    #[test]
    fn test_validate_rejects_zero_cache() {
        assert!(LexicalConfig::new().with_cache_size(0).validate().is_err());
    }
}
