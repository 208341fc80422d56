//! Matching many inputs against one pattern.
//!
//! Small batches run on the calling thread; from
//! [`BatchConfig::min_parallel_batch`] inputs on, work is spread over the
//! rayon pool. Results are returned in input order either way.

use super::{match_key, match_string, PatternMatch};
use crate::compiler::CompiledPattern;
use crate::config::BatchConfig;
use crate::error::Result;
use crate::key::Key;
use rayon::prelude::*;

/// Match every key against `pattern`.
pub fn match_keys<'p>(
    pattern: &'p CompiledPattern,
    keys: &[Key],
    config: &BatchConfig,
) -> Vec<PatternMatch<'p>> {
    if keys.len() < config.min_parallel_batch {
        return keys.iter().map(|key| match_key(pattern, key)).collect();
    }

    tracing::debug!(
        pattern = pattern.text(),
        batch = keys.len(),
        threads = rayon::current_num_threads(),
        "matching keys in parallel"
    );
    keys.par_iter().map(|key| match_key(pattern, key)).collect()
}

/// Match every string against `pattern`.
///
/// # Errors
/// Fails up front when the pattern's composite regex cannot be built.
pub fn match_strings<'p, S>(
    pattern: &'p CompiledPattern,
    texts: &[S],
    config: &BatchConfig,
) -> Result<Vec<PatternMatch<'p>>>
where
    S: AsRef<str> + Sync,
{
    pattern.composite_regex()?;

    if texts.len() < config.min_parallel_batch {
        return texts
            .iter()
            .map(|text| match_string(pattern, text.as_ref()))
            .collect();
    }

    tracing::debug!(
        pattern = pattern.text(),
        batch = texts.len(),
        threads = rayon::current_num_threads(),
        "matching strings in parallel"
    );
    texts
        .par_iter()
        .map(|text| match_string(pattern, text.as_ref()))
        .collect()
}
