//! Binding the parts of a key chain to pattern parts.

use super::PatternMatch;
use crate::collections::StructList;
use crate::compiler::{CompiledPattern, Occurrence};
use crate::key::parameters::{is_section_like, ANY_SECTION};
use crate::key::KeyPart;
use std::sync::Arc;

/// Match a key against a pattern.
///
/// Parts are bound root first, so `Section_0` takes the section nearest the
/// root. A part binds to the first of its candidate slots (in occurrence
/// order) that is still empty and whose rule accepts the value; parts without
/// an accepting slot are ignored. Afterwards an empty `Last` slot takes the
/// deepest value bound to one of its numbered siblings.
///
/// A `Last` slot is an ordinary slot during binding: when it is the only part
/// of its parameter it takes the root-most value, and values beyond the last
/// free slot are dropped.
///
/// # Examples
///
/// ```rust
/// use lexical_keys::{compile, match_key, Key};
///
/// let pattern = compile("{Section_0.}{Section_1.}[Section_n]")?;
/// let key = Key::root().section("A").section("B");
///
/// let m = match_key(&pattern, &key);
/// assert!(m.success());
/// assert_eq!(m.get("Section_0"), Some("A"));
/// assert_eq!(m.get("Section_n"), Some("B"));
/// assert_eq!(m.render(), Some("A.B"));
/// # Ok::<(), lexical_keys::KeyError>(())
/// ```
pub fn match_key<'p>(pattern: &'p CompiledPattern, key: &KeyPart) -> PatternMatch<'p> {
    let mut values: Box<[Option<Arc<str>>]> = vec![None; pattern.capture_count()].into_boxed_slice();

    let parts = participating_parts(key);
    for part in parts.iter().rev() {
        bind(pattern, &mut values, part);
    }
    repair_last_occurrences(pattern, &mut values);

    PatternMatch::new(pattern, values)
}

/// Non-root parts with a value, tail first. Of repeated non-canonical
/// parameters only the tail-most occurrence takes part.
fn participating_parts(key: &KeyPart) -> StructList<&KeyPart, 16> {
    let mut parts = StructList::new();
    let mut seen: StructList<&str, 8> = StructList::new();
    for part in key.walk() {
        if part.is_root() || part.value().is_empty() {
            continue;
        }
        if !part.is_canonical() {
            let name = part.parameter_name();
            if seen.contains_by(|n| *n == name) {
                continue;
            }
            seen.push(name);
        }
        parts.push(part);
    }
    parts
}

fn bind(pattern: &CompiledPattern, values: &mut [Option<Arc<str>>], part: &KeyPart) -> bool {
    let name = part.parameter_name();
    let candidates = match pattern.parts_for(name) {
        Some(candidates) => candidates,
        None if is_section_like(name) => match pattern.parts_for(ANY_SECTION) {
            Some(candidates) => candidates,
            None => return false,
        },
        None => return false,
    };

    for &index in candidates {
        if values[index].is_none() && pattern.capture(index).accepts(part.value()) {
            values[index] = Some(part.value_arc().clone());
            return true;
        }
    }
    false
}

fn repair_last_occurrences(pattern: &CompiledPattern, values: &mut [Option<Arc<str>>]) {
    for (name, indices) in pattern.parameter_groups() {
        let Some((&last, siblings)) = indices.split_last() else {
            continue;
        };
        if siblings.is_empty()
            || pattern.capture(last).occurrence() != Occurrence::Last
            || values[last].is_some()
        {
            continue;
        }
        if let Some(&from) = siblings.iter().rev().find(|&&i| values[i].is_some()) {
            values[last] = values[from].take();
            tracing::trace!(
                parameter = name,
                from = pattern.capture(from).identifier(),
                to = pattern.capture(last).identifier(),
                "moved value into last occurrence"
            );
        }
    }
}
