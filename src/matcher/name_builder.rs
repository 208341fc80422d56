//! Building flat names from keys with a separator policy.
//!
//! Unlike pattern rendering, a [`NamePolicy`] needs no pattern: every
//! parameter of the key is emitted, separated according to per-parameter
//! rules. Non-canonical parameters come first, de-duplicated by name, then
//! the canonical path in chain order:
//!
//! ```text
//! Culture:fi  Type:ConsoleApp1.MyController  Key:Success
//!   -> "fi:ConsoleApp1.MyController:Success"
//! ```

use crate::collections::StructList;
use crate::key::{Classification, KeyPart};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How one parameter is emitted into a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparatorRule {
    /// Whether the parameter appears in the name at all.
    pub included: bool,
    /// Emitted before the value when something precedes it.
    pub prefix: String,
    /// Emitted after the value when something follows it.
    pub postfix: String,
}

impl Default for SeparatorRule {
    fn default() -> Self {
        Self {
            included: true,
            prefix: String::new(),
            postfix: String::new(),
        }
    }
}

impl SeparatorRule {
    pub fn new(prefix: impl Into<String>, postfix: impl Into<String>) -> Self {
        Self {
            included: true,
            prefix: prefix.into(),
            postfix: postfix.into(),
        }
    }

    pub fn postfix(postfix: impl Into<String>) -> Self {
        Self::new("", postfix)
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::new(prefix, "")
    }

    /// A rule that leaves the parameter out of the name.
    pub fn excluded() -> Self {
        Self {
            included: false,
            ..Self::default()
        }
    }
}

/// Separator rules for building names from keys.
///
/// Rule lookup for a parameter: an explicit rule for its name, then the
/// default of its classification, then the global default.
///
/// # Examples
///
/// ```rust
/// use lexical_keys::{Key, NamePolicy, SeparatorRule};
///
/// let key = Key::root()
///     .culture("fi")
///     .type_("ConsoleApp1.MyController")
///     .key("Success");
///
/// assert_eq!(
///     NamePolicy::default().build_name(&key),
///     "fi:ConsoleApp1.MyController:Success"
/// );
///
/// let policy = NamePolicy::default()
///     .with_rule("Culture", SeparatorRule::excluded())
///     .with_rule("Type", SeparatorRule::postfix("/"));
/// assert_eq!(policy.build_name(&key), "ConsoleApp1.MyController/Success");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamePolicy {
    /// Rules by parameter name.
    pub rules: BTreeMap<String, SeparatorRule>,
    pub canonical_default: Option<SeparatorRule>,
    pub non_canonical_default: Option<SeparatorRule>,
    pub default: SeparatorRule,
}

impl Default for NamePolicy {
    fn default() -> Self {
        Self::new(SeparatorRule::postfix(":"))
    }
}

/// An item of the name in write order (back to front).
#[derive(Clone, Copy)]
struct NameItem<'a> {
    value: &'a str,
    rule: &'a SeparatorRule,
}

impl NamePolicy {
    /// A policy applying `default` to every parameter.
    pub fn new(default: SeparatorRule) -> Self {
        Self {
            rules: BTreeMap::new(),
            canonical_default: None,
            non_canonical_default: None,
            default,
        }
    }

    /// `.`-separated names, e.g. `ConsoleApp1.MyController.Success`.
    pub fn dotted() -> Self {
        Self::new(SeparatorRule::postfix("."))
    }

    /// `/`-separated relative paths with the culture as first directory.
    pub fn path() -> Self {
        Self::new(SeparatorRule::postfix("/"))
    }

    pub fn with_rule(mut self, parameter_name: impl Into<String>, rule: SeparatorRule) -> Self {
        self.rules.insert(parameter_name.into(), rule);
        self
    }

    pub fn with_canonical_default(mut self, rule: SeparatorRule) -> Self {
        self.canonical_default = Some(rule);
        self
    }

    pub fn with_non_canonical_default(mut self, rule: SeparatorRule) -> Self {
        self.non_canonical_default = Some(rule);
        self
    }

    pub fn with_default(mut self, rule: SeparatorRule) -> Self {
        self.default = rule;
        self
    }

    /// The rule that applies to a parameter.
    pub fn rule_for(&self, parameter_name: &str, classification: Classification) -> &SeparatorRule {
        if let Some(rule) = self.rules.get(parameter_name) {
            return rule;
        }
        let category = match classification {
            Classification::Canonical => self.canonical_default.as_ref(),
            Classification::NonCanonical => self.non_canonical_default.as_ref(),
        };
        category.unwrap_or(&self.default)
    }

    /// Build the name of `key`.
    ///
    /// Parameters with empty values or excluded rules are skipped, and of
    /// repeated non-canonical parameters only the tail-most occurrence is
    /// emitted.
    ///
    /// # Panics
    /// When the measured length and the written bytes disagree, which is an
    /// internal consistency failure.
    pub fn build_name(&self, key: &KeyPart) -> String {
        let items = self.collect_items(key);
        let count = items.len();

        // Pass 1: measure.
        let mut length = 0;
        for (i, item) in items.iter().enumerate() {
            length += item.value.len();
            if i + 1 < count {
                length += item.rule.prefix.len();
            }
            if i > 0 {
                length += item.rule.postfix.len();
            }
        }

        // Pass 2: write back to front.
        let mut buffer = vec![0u8; length];
        let mut cursor = length;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write_back(&mut buffer, &mut cursor, &item.rule.postfix);
            }
            write_back(&mut buffer, &mut cursor, item.value);
            if i + 1 < count {
                write_back(&mut buffer, &mut cursor, &item.rule.prefix);
            }
        }
        assert_eq!(cursor, 0, "name buffer not filled exactly, {cursor} bytes left");

        String::from_utf8(buffer)
            .unwrap_or_else(|e| unreachable!("name assembled from str slices: {e}"))
    }

    /// Canonical items tail to root, then non-canonical items tail to root.
    fn collect_items<'a>(&'a self, key: &'a KeyPart) -> StructList<NameItem<'a>, 16> {
        let mut canonical: StructList<NameItem<'a>, 16> = StructList::new();
        let mut non_canonical: StructList<NameItem<'a>, 8> = StructList::new();
        let mut seen: StructList<&str, 8> = StructList::new();

        for part in key.walk() {
            if part.is_root() || part.value().is_empty() {
                continue;
            }
            let name = part.parameter_name();
            let rule = self.rule_for(name, part.classification());
            match part.classification() {
                Classification::Canonical => {
                    if rule.included {
                        canonical.push(NameItem { value: part.value(), rule });
                    }
                }
                Classification::NonCanonical => {
                    if seen.contains_by(|n| *n == name) {
                        continue;
                    }
                    seen.push(name);
                    if rule.included {
                        non_canonical.push(NameItem { value: part.value(), rule });
                    }
                }
            }
        }

        canonical.extend(non_canonical.iter().copied());
        canonical
    }
}

fn write_back(buffer: &mut [u8], cursor: &mut usize, text: &str) {
    let bytes = text.as_bytes();
    assert!(
        bytes.len() <= *cursor,
        "name buffer overrun writing {} bytes at {}",
        bytes.len(),
        cursor
    );
    *cursor -= bytes.len();
    buffer[*cursor..*cursor + bytes.len()].copy_from_slice(bytes);
}
