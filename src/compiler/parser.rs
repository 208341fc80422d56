//! Pattern text tokenization.
//!
//! Splits a pattern such as `"{Culture/}{Section_0.}[Key<[a-z]+>]"` into
//! literal runs and parameter groups. A parameter group is
//! `prefix identifier [<rule>] postfix` enclosed in `{}` (optional) or `[]`
//! (required).

use crate::error::{KeyError, Result};
use std::iter::Peekable;
use std::str::CharIndices;

/// Tokens of a name pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(String),
    Parameter(ParameterToken),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParameterToken {
    pub required: bool,
    pub prefix: String,
    pub identifier: String,
    pub rule: Option<String>,
    pub postfix: String,
    /// Byte offset of the opening bracket.
    pub position: usize,
}

fn syntax_error(text: &str, position: usize, message: impl AsRef<str>) -> KeyError {
    KeyError::PatternSyntax(format!(
        "{} at position {} in pattern '{}'",
        message.as_ref(),
        position,
        text
    ))
}

/// Tokenize a pattern into literal and parameter tokens.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = text.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' | '[' => {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                let parameter = parse_parameter(text, position, c == '[', &mut chars)?;
                tokens.push(Token::Parameter(parameter));
            }
            '}' | ']' => {
                return Err(syntax_error(text, position, format!("unbalanced '{c}'")));
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    Ok(tokens)
}

fn parse_parameter(
    text: &str,
    position: usize,
    required: bool,
    chars: &mut Peekable<CharIndices<'_>>,
) -> Result<ParameterToken> {
    let close = if required { ']' } else { '}' };
    let unclosed = || syntax_error(text, position, format!("unclosed group, expected '{close}'"));

    let mut prefix = String::new();
    loop {
        match chars.peek() {
            Some(&(_, c)) if c.is_ascii_alphabetic() => break,
            Some(&(at, c)) if c == '}' || c == ']' => {
                return Err(syntax_error(text, at, "parameter group without identifier"));
            }
            Some(&(at, c)) if c == '{' || c == '[' || c == '<' => {
                return Err(syntax_error(text, at, format!("unexpected '{c}' before identifier")));
            }
            Some(&(_, c)) => {
                prefix.push(c);
                chars.next();
            }
            None => return Err(unclosed()),
        }
    }

    let mut identifier = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '_' {
            identifier.push(c);
            chars.next();
        } else {
            break;
        }
    }

    let rule = match chars.peek() {
        Some(&(at, '<')) => {
            chars.next();
            Some(parse_rule(text, at, chars)?)
        }
        _ => None,
    };

    let mut postfix = String::new();
    loop {
        match chars.next() {
            Some((_, c)) if c == close => break,
            Some((at, c)) if matches!(c, '{' | '}' | '[' | ']') => {
                return Err(syntax_error(
                    text,
                    at,
                    format!("unexpected '{c}' inside group, expected '{close}'"),
                ));
            }
            Some((_, c)) => postfix.push(c),
            None => return Err(unclosed()),
        }
    }

    Ok(ParameterToken {
        required,
        prefix,
        identifier,
        rule,
        postfix,
        position,
    })
}

/// Read an inline rule up to its matching `>`. Nested angle brackets must
/// balance; `\` keeps the following character verbatim.
fn parse_rule(text: &str, position: usize, chars: &mut Peekable<CharIndices<'_>>) -> Result<String> {
    let mut rule = String::new();
    let mut depth = 1usize;
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => {
                rule.push(c);
                match chars.next() {
                    Some((_, escaped)) => rule.push(escaped),
                    None => break,
                }
            }
            '<' => {
                depth += 1;
                rule.push(c);
            }
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(rule);
                }
                rule.push(c);
            }
            _ => rule.push(c),
        }
    }
    Err(syntax_error(text, position, "unterminated inline rule"))
}
