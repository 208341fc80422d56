//! Name pattern compiler.
//!
//! A name pattern describes how a flat identifier (a file name, a dictionary
//! key) is assembled from and parsed into key parameters:
//!
//! ```text
//! {Culture/}{anysection_0.}{anysection_1.}[Key].json
//! ```
//!
//! - literal text is matched and emitted verbatim;
//! - `{...}` is an optional parameter, `[...]` a required one;
//! - inside a group, characters before the identifier are the prefix and
//!   characters after it (and after an optional `<rule>`) the postfix;
//! - `Name_0`, `Name_1` ... bind successive occurrences of a repeated
//!   parameter, `Name_n` (or plain `Name`) the last one;
//! - `anysection` stands in for Section, Location, Type, Resource or Assembly.
//!
//! The compiler is organized into:
//! - [`parser`] - tokenization of the pattern text
//! - [`pattern`] - the compiled representation and its composite regex
//! - [`cache`] - a process-wide cache of compiled patterns
//!
//! # Examples
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

pub mod cache;
pub(crate) mod parser;
pub mod pattern;

pub use cache::{global_pattern_cache, init_global_cache, CacheConfig, CacheStats, PatternCache};
pub use pattern::{CapturePart, CompiledPattern, CompositeRegex, Occurrence, PatternSegment};

use crate::error::Result;
use crate::key::ParameterInfos;

/// Compile a pattern against the global [`ParameterInfos`].
///
/// # Errors
/// [`KeyError::PatternSyntax`](crate::KeyError::PatternSyntax) for unbalanced
/// or mismatched groups, a group without an identifier, an unterminated or
/// invalid inline rule, a duplicate identifier, or inline rules whose named
/// groups collide once combined into the composite regex.
pub fn compile(text: &str) -> Result<CompiledPattern> {
    compile_with(text, ParameterInfos::global())
}

/// Compile a pattern, taking default rules from `infos`.
pub fn compile_with(text: &str, infos: &ParameterInfos) -> Result<CompiledPattern> {
    let tokens = parser::tokenize(text)?;
    let pattern = CompiledPattern::from_tokens(text, tokens, infos)?;
    tracing::debug!(
        pattern = text,
        segments = pattern.segments().len(),
        captures = pattern.capture_count(),
        "compiled name pattern"
    );
    Ok(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{Classification, ParameterInfo};

    #[test]
    fn test_compile_is_deterministic() {
        let text = "{Culture/}{Section_0.}{Section_1.}[Section_n]{.Key}";
        assert_eq!(compile(text).unwrap(), compile(text).unwrap());
    }

    #[test]
    fn test_compile_with_custom_infos() {
        let infos = ParameterInfos::empty()
            .with(ParameterInfo::new("Key", Classification::Canonical).with_default_rule("[A-Z]+"));

        let pattern = compile_with("[Key]", &infos).unwrap();
        assert!(pattern.capture(0).accepts("OK"));
        assert!(!pattern.capture(0).accepts("ok"));

        let pattern = compile_with("{Culture}", &infos).unwrap();
        assert!(pattern.capture(0).effective_rule().is_none());
    }

    #[test]
    fn test_compile_rejects_bad_default_rule() {
        let infos = ParameterInfos::empty()
            .with(ParameterInfo::new("Key", Classification::Canonical).with_default_rule("("));
        assert!(compile_with("[Key]", &infos).is_err());
    }
}
