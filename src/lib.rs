//! # Lexical Keys
//!
//! Structured localization keys and the name patterns that map them to and
//! from flat identifiers such as file names or dictionary keys.
//!
//! - [`Key`] - an immutable chain of named parameters
//!   (`Culture`, `Type`, `Section`, `Key` ...) sharing tails between keys
//! - [`compile`] - turns a pattern such as `"{Culture/}{Section_n.}[Key]"`
//!   into a reusable [`CompiledPattern`]
//! - [`match_key`], [`match_string`], [`build_name`] - bind patterns to keys
//!   and strings in either direction
//! - [`KeyComparer`] - key identity with positional canonical parameters and
//!   set-like non-canonical ones
//!
//! ## Quick Start
//!
//! ### Building names
//!
//! ```rust
//! use lexical_keys::{compile, Key};
//!
//! let pattern = compile("{Culture:}{Type:}{anysection_n:}[Key]")?;
//! let key = Key::root()
//!     .culture("fi")
//!     .type_("ConsoleApp1.MyController")
//!     .key("Success");
//!
//! assert_eq!(
//!     pattern.build_name(&key).as_deref(),
//!     Some("fi:ConsoleApp1.MyController:Success")
//! );
//! # Ok::<(), lexical_keys::KeyError>(())
//! ```
//!
//! ### Parsing names
//!
//! ```rust
//! use lexical_keys::{compile, match_string, ParameterInfos};
//!
//! let pattern = compile("Resources/{Culture/}{Section_0.}{Section_1.}[Key].json")?;
//! let m = match_string(&pattern, "Resources/en-US/Errors.Http.NotFound.json")?;
//!
//! assert!(m.success());
//! assert_eq!(m.values_of("Section"), vec!["Errors", "Http"]);
//!
//! let key = m.to_key(ParameterInfos::global())?;
//! assert_eq!(
//!     key.to_string(),
//!     "Culture:en-US:Section:Errors:Section:Http:Key:NotFound"
//! );
//! # Ok::<(), lexical_keys::KeyError>(())
//! ```
//!
//! ### Key identity
//!
//! ```rust
//! use lexical_keys::Key;
//! use std::collections::HashMap;
//!
//! let mut strings = HashMap::new();
//! strings.insert(Key::root().culture("fi").type_("Home").key("Title"), "Tervetuloa");
//!
//! // Non-canonical parameters compare as a set.
//! let lookup = Key::root().type_("Home").culture("fi").key("Title");
//! assert_eq!(strings.get(&lookup), Some(&"Tervetuloa"));
//!
//! // Canonical parameters compare by position.
//! assert_ne!(
//!     Key::root().section("A").section("B"),
//!     Key::root().section("B").section("A")
//! );
//! ```

pub mod collections;
pub mod comparer;
pub mod compiler;
pub mod config;
pub mod error;
pub mod key;
pub mod matcher;

// Key model
pub use key::format::parse_key;
pub use key::{Classification, Key, KeyPart, ParameterInfo, ParameterInfos, Walk};

// Identity
pub use comparer::components::{
    NonCanonicalParametersComparer, ParameterNameValueComparer, ParameterValueComparer,
};
pub use comparer::{CanonicalComparer, KeyComparer, NonCanonicalComparer};

// Compiler
pub use compiler::{
    compile, compile_with, global_pattern_cache, CapturePart, CompiledPattern, Occurrence,
    PatternCache, PatternSegment,
};

// Matcher
pub use matcher::{
    build_name, match_key, match_keys, match_string, match_strings, NamePolicy, PatternMatch,
    SeparatorRule,
};

// Configuration and errors
pub use config::{BatchConfig, CacheConfig, LexicalConfig};
pub use error::{KeyError, Result};
