//! Match results.

use crate::collections::sequence_eq;
use crate::compiler::{CompiledPattern, PatternSegment};
use crate::error::Result;
use crate::key::parameters::{ANY_SECTION, SECTION};
use crate::key::{Key, ParameterInfos};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// The values a pattern bound from a key or a string.
///
/// Values are stored by capture index. `success` and the rendered name are
/// computed on first request; both are pure functions of the values, so
/// concurrent first requests agree.
#[derive(Debug, Clone)]
pub struct PatternMatch<'p> {
    pattern: &'p CompiledPattern,
    values: Box<[Option<Arc<str>>]>,
    success: OnceLock<bool>,
    rendered: OnceLock<String>,
}

impl<'p> PatternMatch<'p> {
    pub(crate) fn new(pattern: &'p CompiledPattern, values: Box<[Option<Arc<str>>]>) -> Self {
        debug_assert_eq!(values.len(), pattern.capture_count());
        Self {
            pattern,
            values,
            success: OnceLock::new(),
            rendered: OnceLock::new(),
        }
    }

    /// A match with every slot empty.
    pub(crate) fn empty(pattern: &'p CompiledPattern) -> Self {
        Self::new(pattern, vec![None; pattern.capture_count()].into_boxed_slice())
    }

    pub fn pattern(&self) -> &'p CompiledPattern {
        self.pattern
    }

    /// Captured values indexed by capture index.
    pub fn values(&self) -> &[Option<Arc<str>>] {
        &self.values
    }

    pub fn value(&self, capture_index: usize) -> Option<&str> {
        self.values.get(capture_index)?.as_deref()
    }

    /// Value bound to the part with this identifier, e.g. `"Section_n"`.
    pub fn get(&self, identifier: &str) -> Option<&str> {
        let part = self.pattern.part_by_identifier(identifier)?;
        self.value(part.capture_index())
    }

    /// Values bound to the parts of `parameter_name`, in occurrence order.
    pub fn values_of(&self, parameter_name: &str) -> Vec<&str> {
        self.pattern
            .parts_for(parameter_name)
            .unwrap_or_default()
            .iter()
            .filter_map(|&index| self.value(index))
            .collect()
    }

    /// Number of filled slots.
    pub fn filled(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    /// Whether every required part has a value.
    pub fn success(&self) -> bool {
        *self.success.get_or_init(|| {
            self.pattern
                .captures()
                .iter()
                .all(|part| !part.is_required() || self.values[part.capture_index()].is_some())
        })
    }

    /// The name this match renders to, or `None` when it is not successful.
    pub fn render(&self) -> Option<&str> {
        if !self.success() {
            return None;
        }
        Some(self.rendered.get_or_init(|| self.render_uncached()))
    }

    fn render_uncached(&self) -> String {
        let mut out = String::with_capacity(self.pattern.text().len() + self.value_bytes());
        for segment in self.pattern.segments() {
            match segment {
                PatternSegment::Literal(literal) => out.push_str(literal),
                PatternSegment::Capture(index) => {
                    if let Some(value) = &self.values[*index] {
                        let part = self.pattern.capture(*index);
                        out.push_str(part.prefix());
                        out.push_str(value);
                        out.push_str(part.postfix());
                    }
                }
            }
        }
        out
    }

    fn value_bytes(&self) -> usize {
        self.values.iter().flatten().map(|value| value.len()).sum()
    }

    /// Identifier and value of every filled part, in capture order.
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pattern
            .captures()
            .iter()
            .filter_map(|part| Some((part.identifier(), self.value(part.capture_index())?)))
    }

    /// Rebuild a key from the captured values in pattern order.
    ///
    /// `anysection` parts become `Section` parameters; classifications come
    /// from `infos`.
    pub fn to_key(&self, infos: &ParameterInfos) -> Result<Key> {
        let mut key = Key::root();
        for part in self.pattern.captures() {
            let Some(value) = &self.values[part.capture_index()] else {
                continue;
            };
            let name = match part.parameter_name() {
                ANY_SECTION => SECTION,
                name => name,
            };
            key = key.parameter_with(infos, name, value.clone())?;
        }
        Ok(key)
    }
}

impl PartialEq for PatternMatch<'_> {
    fn eq(&self, other: &Self) -> bool {
        (std::ptr::eq(self.pattern, other.pattern) || self.pattern == other.pattern)
            && sequence_eq(self.values.iter(), other.values.iter(), |a, b| a == b)
    }
}

impl Eq for PatternMatch<'_> {}

impl fmt::Display for PatternMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render().unwrap_or_default())
    }
}

struct Parameters<'a, 'p>(&'a PatternMatch<'p>);

impl Serialize for Parameters<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.filled()))?;
        for (identifier, value) in self.0.parameters() {
            map.serialize_entry(identifier, value)?;
        }
        map.end()
    }
}

impl Serialize for PatternMatch<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PatternMatch", 2)?;
        state.serialize_field("success", &self.success())?;
        state.serialize_field("parameters", &Parameters(self))?;
        state.end()
    }
}
