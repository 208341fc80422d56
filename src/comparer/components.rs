//! Stock comparer components.

use super::{CanonicalComparer, NonCanonicalComparer};
use crate::collections::{fnv1a, StructList, FNV_PRIME};
use crate::key::{Key, KeyPart};

/// Canonical component: two parts agree when parameter name and value are equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterNameValueComparer;

impl CanonicalComparer for ParameterNameValueComparer {
    fn equals(&self, x: &KeyPart, y: &KeyPart) -> bool {
        x.parameter_name() == y.parameter_name() && x.value() == y.value()
    }

    fn hash(&self, part: &KeyPart) -> u64 {
        fnv1a(part.parameter_name()).wrapping_mul(FNV_PRIME) ^ fnv1a(part.value())
    }
}

/// Distinct non-canonical parameters of a chain: empty values count as
/// absent, and among the rest the left-most (tail-most) occurrence wins.
pub(crate) fn effective_non_canonical(key: &KeyPart) -> StructList<(&str, &str), 8> {
    let mut effective: StructList<(&str, &str), 8> = StructList::new();
    for part in key.non_canonical_parts() {
        let name = part.parameter_name();
        if part.value().is_empty() || effective.contains_by(|(n, _)| *n == name) {
            continue;
        }
        effective.push((name, part.value()));
    }
    effective
}

fn pair_hash(name: &str, value: &str) -> u64 {
    fnv1a(name).wrapping_mul(FNV_PRIME) ^ fnv1a(value)
}

/// Non-canonical component: compares the set of non-canonical parameters.
///
/// Order is irrelevant, a repeated name resolves to its left-most occurrence,
/// and an empty value is the same as the parameter being absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonCanonicalParametersComparer;

impl NonCanonicalComparer for NonCanonicalParametersComparer {
    fn equals(&self, x: &Key, y: &Key) -> bool {
        let xs = effective_non_canonical(x);
        let ys = effective_non_canonical(y);
        xs.len() == ys.len()
            && xs
                .iter()
                .all(|(name, value)| ys.contains_by(|(n, v)| n == name && v == value))
    }

    fn hash(&self, key: &Key) -> u64 {
        effective_non_canonical(key)
            .iter()
            .fold(0, |acc, (name, value)| acc ^ pair_hash(name, value))
    }
}

/// Non-canonical component tracking one named parameter regardless of its
/// classification, e.g. to tell apart keys that differ only by `Culture`
/// under a comparer that otherwise ignores it.
#[derive(Debug, Clone)]
pub struct ParameterValueComparer {
    parameter_name: String,
}

impl ParameterValueComparer {
    pub fn new(parameter_name: impl Into<String>) -> Self {
        Self {
            parameter_name: parameter_name.into(),
        }
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }
}

impl NonCanonicalComparer for ParameterValueComparer {
    fn equals(&self, x: &Key, y: &Key) -> bool {
        x.find(&self.parameter_name) == y.find(&self.parameter_name)
    }

    fn hash(&self, key: &Key) -> u64 {
        key.find(&self.parameter_name)
            .map(|value| pair_hash(&self.parameter_name, value))
            .unwrap_or(0)
    }
}
