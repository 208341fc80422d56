//! Parsing flat strings with a pattern's composite regex.

use super::PatternMatch;
use crate::compiler::CompiledPattern;
use crate::error::Result;
use std::sync::Arc;

/// Match a flat string such as a file name against a pattern.
///
/// A string the pattern does not describe yields an unsuccessful match with
/// every slot empty. Empty captures count as absent.
///
/// # Errors
/// [`KeyError::PatternSyntax`](crate::KeyError::PatternSyntax) when the
/// pattern's composite regex cannot be built.
///
/// # Examples
///
/// ```rust
/// use lexical_keys::{compile, match_string};
///
/// let pattern = compile("{Culture:}{Type:}{anysection_n:}[Key]")?;
/// let m = match_string(&pattern, "fi:ConsoleApp1.MyController:Success")?;
///
/// assert!(m.success());
/// assert_eq!(m.get("Culture"), Some("fi"));
/// assert_eq!(m.get("Type"), Some("ConsoleApp1.MyController"));
/// assert_eq!(m.get("Key"), Some("Success"));
/// # Ok::<(), lexical_keys::KeyError>(())
/// ```
pub fn match_string<'p>(pattern: &'p CompiledPattern, text: &str) -> Result<PatternMatch<'p>> {
    let composite = pattern.composite_regex()?;

    let Some(captures) = composite.regex().captures(text) else {
        return Ok(PatternMatch::empty(pattern));
    };

    let values: Box<[Option<Arc<str>>]> = (0..pattern.capture_count())
        .map(|index| {
            captures
                .get(composite.group(index))
                .map(|m| m.as_str())
                .filter(|value| !value.is_empty())
                .map(Arc::from)
        })
        .collect();

    Ok(PatternMatch::new(pattern, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;

    #[test]
    fn test_non_matching_string() {
        let pattern = compile("[Key].json").unwrap();
        let m = match_string(&pattern, "strings.xml").unwrap();

        assert!(!m.success());
        assert_eq!(m.filled(), 0);
    }

    #[test]
    fn test_optional_parts() {
        let pattern = compile("{Culture/}[Key].json").unwrap();

        let with = match_string(&pattern, "en-US/Errors.json").unwrap();
        assert_eq!(with.get("Culture"), Some("en-US"));
        assert_eq!(with.get("Key"), Some("Errors"));

        let without = match_string(&pattern, "Errors.json").unwrap();
        assert_eq!(without.get("Culture"), None);
        assert!(without.success());
    }

    #[test]
    fn test_default_rule_shapes_capture() {
        // "Assets" is no culture name, so it cannot bind to Culture
        let pattern = compile("{Culture/}[Section/][Key]").unwrap();
        let m = match_string(&pattern, "Assets/Logo").unwrap();

        assert_eq!(m.get("Culture"), None);
        assert_eq!(m.get("Section"), Some("Assets"));
        assert_eq!(m.get("Key"), Some("Logo"));
    }

    #[test]
    fn test_repeated_sections() {
        let pattern = compile("{Section_0.}{Section_1.}[Section_n]").unwrap();
        let m = match_string(&pattern, "A.B.C").unwrap();

        assert_eq!(m.values_of("Section"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_literal_metacharacters_are_escaped() {
        let pattern = compile("({Culture})[Key]+").unwrap();
        assert!(match_string(&pattern, "(fi)Ok+").unwrap().success());
        assert!(!match_string(&pattern, "fiOk").unwrap().success());
    }
}
