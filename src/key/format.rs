//! Textual key format: `Name:Value` pairs from root to tail.
//!
//! `Key::root().culture("fi").key("Success")` prints as
//! `Culture:fi:Key:Success`. A backslash escapes `:` and `\` inside names
//! and values. Parsing classifies each parameter through [`ParameterInfos`].

use super::{Key, KeyPart, ParameterInfos};
use crate::collections::StructList;
use crate::error::{KeyError, Result};
use std::fmt::{self, Write};
use std::str::FromStr;

fn write_escaped(f: &mut impl Write, text: &str) -> fmt::Result {
    for c in text.chars() {
        if c == ':' || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    Ok(())
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: StructList<&KeyPart, 16> = self.walk().filter(|p| !p.is_root()).collect();
        for (i, part) in parts.iter().rev().enumerate() {
            if i > 0 {
                f.write_char(':')?;
            }
            write_escaped(f, part.parameter_name())?;
            f.write_char(':')?;
            write_escaped(f, part.value())?;
        }
        Ok(())
    }
}

/// Split on unescaped `:`, resolving escapes.
fn split_fields(text: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped @ (':' | '\\')) => current.push(escaped),
                Some(other) => {
                    return Err(KeyError::InvalidArgument(format!(
                        "invalid escape '\\{other}' in key '{text}'"
                    )))
                }
                None => {
                    return Err(KeyError::InvalidArgument(format!(
                        "dangling escape at end of key '{text}'"
                    )))
                }
            },
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    Ok(fields)
}

/// Parse the textual key format, classifying parameters with `infos`.
///
/// The empty string parses to a root sentinel.
///
/// # Examples
///
/// ```rust
/// use lexical_keys::{Key, ParameterInfos};
/// use lexical_keys::key::format::parse_key;
///
/// let key = parse_key("Culture:fi:Section:A\\:B:Key:Ok", ParameterInfos::global())?;
/// assert_eq!(key.find("Section"), Some("A:B"));
/// assert_eq!(key.to_string(), "Culture:fi:Section:A\\:B:Key:Ok");
/// # Ok::<(), lexical_keys::KeyError>(())
/// ```
pub fn parse_key(text: &str, infos: &ParameterInfos) -> Result<Key> {
    let mut key = Key::root();
    if text.is_empty() {
        return Ok(key);
    }

    let fields = split_fields(text)?;
    if fields.len() % 2 != 0 {
        return Err(KeyError::InvalidArgument(format!(
            "key '{text}' has a parameter name without a value"
        )));
    }
    for pair in fields.chunks(2) {
        key = key.parameter_with(infos, &pair[0], pair[1].as_str())?;
    }
    Ok(key)
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self> {
        parse_key(s, ParameterInfos::global())
    }
}
