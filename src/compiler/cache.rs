//! Process-wide cache of compiled patterns.
//!
//! Patterns are usually a handful of fixed strings (file name layouts,
//! dictionary key layouts) compiled over and over by independent callers.
//! The cache hands out shared [`Arc<CompiledPattern>`]s so each text is
//! tokenized and its rules compiled once.

use super::{compile_with, CompiledPattern};
use crate::collections::FnvHasher;
use crate::error::Result;
use crate::key::ParameterInfos;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of patterns retained. Once reached, further patterns
    /// are compiled and returned but not stored.
    pub max_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_size: 1000 }
    }
}

/// Cache statistics for monitoring.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Total cache lookups
    pub total_lookups: usize,

    /// Cache hits
    pub hits: usize,

    /// Cache misses
    pub misses: usize,

    /// Successful pattern compilations
    pub compilations: usize,

    /// Compiled patterns not retained because the cache was full
    pub not_retained: usize,
}

type PatternMap = HashMap<String, Arc<CompiledPattern>, BuildHasherDefault<FnvHasher>>;

#[derive(Debug, Default)]
struct CacheCounters {
    total_lookups: AtomicUsize,
    hits: AtomicUsize,
    misses: AtomicUsize,
    compilations: AtomicUsize,
    not_retained: AtomicUsize,
}

impl CacheCounters {
    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            total_lookups: self.total_lookups.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            compilations: self.compilations.load(Ordering::Relaxed),
            not_retained: self.not_retained.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        for counter in [
            &self.total_lookups,
            &self.hits,
            &self.misses,
            &self.compilations,
            &self.not_retained,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Thread-safe cache of compiled patterns keyed by pattern text.
///
/// Patterns are compiled against the cache's own [`ParameterInfos`]. Lookups
/// of known patterns only take the read side of the lock; statistics are
/// kept in atomics.
///
/// # Examples
///
/// ```rust
/// use lexical_keys::PatternCache;
///
/// let cache = PatternCache::new();
/// let a = cache.get_or_compile("{Culture/}[Key]")?;
/// let b = cache.get_or_compile("{Culture/}[Key]")?;
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// assert_eq!(cache.stats().hits, 1);
/// # Ok::<(), lexical_keys::KeyError>(())
/// ```
#[derive(Debug)]
pub struct PatternCache {
    patterns: RwLock<PatternMap>,
    counters: CacheCounters,
    config: CacheConfig,
    infos: ParameterInfos,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// A cache compiling against the global [`ParameterInfos`].
    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_config_and_infos(config, ParameterInfos::global().clone())
    }

    /// A cache compiling against `infos`.
    pub fn with_config_and_infos(config: CacheConfig, infos: ParameterInfos) -> Self {
        Self {
            patterns: RwLock::new(PatternMap::default()),
            counters: CacheCounters::default(),
            config,
            infos,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn parameter_infos(&self) -> &ParameterInfos {
        &self.infos
    }

    /// Get the compiled pattern for `text`, compiling it on a miss.
    ///
    /// Compilation errors are returned and never cached.
    pub fn get_or_compile(&self, text: &str) -> Result<Arc<CompiledPattern>> {
        CacheCounters::bump(&self.counters.total_lookups);
        if let Some(pattern) = self.get(text) {
            CacheCounters::bump(&self.counters.hits);
            tracing::trace!(pattern = text, "pattern cache hit");
            return Ok(pattern);
        }
        CacheCounters::bump(&self.counters.misses);

        let compiled = Arc::new(compile_with(text, &self.infos)?);
        CacheCounters::bump(&self.counters.compilations);

        let mut patterns = self.patterns.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have compiled the same text meanwhile; keep the first.
        if let Some(existing) = patterns.get(text) {
            return Ok(existing.clone());
        }
        if patterns.len() >= self.config.max_size {
            CacheCounters::bump(&self.counters.not_retained);
            tracing::debug!(
                pattern = text,
                max_size = self.config.max_size,
                "pattern cache full, not retaining compiled pattern"
            );
            return Ok(compiled);
        }
        patterns.insert(text.to_string(), compiled.clone());
        tracing::debug!(pattern = text, size = patterns.len(), "cached compiled pattern");
        Ok(compiled)
    }

    /// Look up without compiling or touching statistics.
    pub fn get(&self, text: &str) -> Option<Arc<CompiledPattern>> {
        let patterns = self.patterns.read().unwrap_or_else(PoisonError::into_inner);
        patterns.get(text).cloned()
    }

    /// A snapshot of the counters. Under concurrent use the fields may be
    /// read at slightly different moments.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }

    pub fn hit_ratio(&self) -> f64 {
        let stats = self.stats();
        if stats.total_lookups == 0 {
            return 0.0;
        }
        stats.hits as f64 / stats.total_lookups as f64
    }

    pub fn size(&self) -> usize {
        let patterns = self.patterns.read().unwrap_or_else(PoisonError::into_inner);
        patterns.len()
    }

    /// Drop every cached pattern and reset statistics.
    pub fn clear(&self) {
        let mut patterns = self.patterns.write().unwrap_or_else(PoisonError::into_inner);
        patterns.clear();
        self.counters.reset();
    }

    /// Warm the cache with known patterns.
    pub fn precompile(&self, patterns: &[&str]) -> Result<()> {
        for &pattern in patterns {
            self.get_or_compile(pattern)?;
        }
        Ok(())
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_CACHE: OnceLock<PatternCache> = OnceLock::new();

/// The global pattern cache instance.
pub fn global_pattern_cache() -> &'static PatternCache {
    GLOBAL_CACHE.get_or_init(PatternCache::new)
}

/// Initialize the global cache with a custom configuration.
///
/// Returns `false` when the global cache was already initialized, in which
/// case the existing configuration stays in effect.
pub fn init_global_cache(config: CacheConfig) -> bool {
    GLOBAL_CACHE.set(PatternCache::with_config(config)).is_ok()
}
