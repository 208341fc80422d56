//! Binding compiled patterns to keys and strings.
//!
//! The matcher works in three directions over a [`CompiledPattern`]:
//!
//! - **key → match**: [`match_key`] binds the parts of a key chain to the
//!   pattern's capture slots, with `anysection` fallback and last-occurrence
//!   repair
//! - **string → match**: [`match_string`] parses a flat name with the
//!   pattern's composite regex
//! - **key → string**: [`build_name`] renders a key through a pattern, and
//!   [`NamePolicy::build_name`] renders it without one
//!
//! Both matching directions produce a [`PatternMatch`], so a string parsed by
//! a pattern can be turned back into a key with [`PatternMatch::to_key`].
//!
//! ## Example Usage
//!
//! ```rust
//! use lexical_keys::{build_name, compile, match_string, Key, ParameterInfos};
//!
//! let pattern = compile("{Culture/}{Type.}[Key].json")?;
//! let key = Key::root().culture("fi").type_("Views").key("Home");
//!
//! let name = build_name(&pattern, &key).unwrap();
//! assert_eq!(name, "fi/Views.Home.json");
//!
//! let parsed = match_string(&pattern, &name)?.to_key(ParameterInfos::global())?;
//! assert_eq!(parsed, key);
//! # Ok::<(), lexical_keys::KeyError>(())
//! ```

pub mod batch;
pub mod key_match;
pub mod name_builder;
pub mod result;
pub mod string_match;

pub use batch::{match_keys, match_strings};
pub use key_match::match_key;
pub use name_builder::{NamePolicy, SeparatorRule};
pub use result::PatternMatch;
pub use string_match::match_string;

use crate::compiler::CompiledPattern;
use crate::error::Result;
use crate::key::KeyPart;

/// Render `key` through `pattern`.
///
/// Returns `None` when the key does not fill every required part.
pub fn build_name(pattern: &CompiledPattern, key: &KeyPart) -> Option<String> {
    match_key(pattern, key).render().map(str::to_string)
}

impl CompiledPattern {
    /// Shorthand for [`match_key`].
    pub fn match_key(&self, key: &KeyPart) -> PatternMatch<'_> {
        match_key(self, key)
    }

    /// Shorthand for [`match_string`].
    pub fn match_str(&self, text: &str) -> Result<PatternMatch<'_>> {
        match_string(self, text)
    }

    /// Shorthand for [`build_name`].
    pub fn build_name(&self, key: &KeyPart) -> Option<String> {
        build_name(self, key)
    }
}
