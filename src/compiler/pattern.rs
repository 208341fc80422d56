//! Compiled name patterns.

use super::parser::{ParameterToken, Token};
use crate::collections::sequence_eq;
use crate::error::{KeyError, Result};
use crate::key::parameters::ANY_SECTION;
use crate::key::ParameterInfos;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Which occurrence of a repeated parameter a part binds.
///
/// `Index` parts sort before `Last`, so for `Section_0`, `Section_1`,
/// `Section_n` the ordering is 0, 1, last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Occurrence {
    Index(u32),
    /// No suffix or `_n`: ordered after every numbered sibling and repaired
    /// to hold the deepest bound value of its group.
    Last,
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occurrence::Index(i) => write!(f, "{i}"),
            Occurrence::Last => f.write_str("n"),
        }
    }
}

/// One segment of a compiled pattern, in text order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    Literal(String),
    /// Capture index of a parameter part.
    Capture(usize),
}

/// A parameter placeholder of a compiled pattern.
#[derive(Debug, Clone)]
pub struct CapturePart {
    identifier: String,
    parameter_name: String,
    occurrence: Occurrence,
    required: bool,
    prefix: String,
    postfix: String,
    capture_index: usize,
    segment_index: usize,
    inline_rule: Option<String>,
    /// Inline rule, else the parameter's default rule.
    effective_rule: Option<String>,
    /// `effective_rule` anchored to the whole value.
    matcher: Option<Regex>,
}

impl CapturePart {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    pub fn occurrence(&self) -> Occurrence {
        self.occurrence
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn postfix(&self) -> &str {
        &self.postfix
    }

    pub fn capture_index(&self) -> usize {
        self.capture_index
    }

    /// Position of this part in [`CompiledPattern::segments`].
    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    pub fn inline_rule(&self) -> Option<&str> {
        self.inline_rule.as_deref()
    }

    pub fn effective_rule(&self) -> Option<&str> {
        self.effective_rule.as_deref()
    }

    pub fn is_any_section(&self) -> bool {
        self.parameter_name == ANY_SECTION
    }

    /// Whether `value` satisfies this part's rule. Parts without a rule
    /// accept anything.
    pub fn accepts(&self, value: &str) -> bool {
        self.matcher.as_ref().map_or(true, |rule| rule.is_match(value))
    }
}

impl PartialEq for CapturePart {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
            && self.parameter_name == other.parameter_name
            && self.occurrence == other.occurrence
            && self.required == other.required
            && self.prefix == other.prefix
            && self.postfix == other.postfix
            && self.capture_index == other.capture_index
            && self.segment_index == other.segment_index
            && self.inline_rule == other.inline_rule
            && self.effective_rule == other.effective_rule
    }
}

impl Eq for CapturePart {}

/// Composite regex for flat-string matching, with the regex group index of
/// every capture part.
#[derive(Debug, Clone)]
pub struct CompositeRegex {
    regex: Regex,
    groups: Vec<usize>,
}

impl CompositeRegex {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Regex group index for a capture index.
    pub fn group(&self, capture_index: usize) -> usize {
        self.groups[capture_index]
    }
}

fn group_name(capture_index: usize) -> String {
    format!("lk_c{capture_index}")
}

/// A parsed, immutable, shareable name pattern.
///
/// # Examples
///
/// ```rust
/// use lexical_keys::{compile, Occurrence};
///
/// let pattern = compile("{Culture/}{Section_0.}{Section_1.}[Section_n]")?;
/// assert_eq!(pattern.capture_count(), 4);
///
/// let sections: Vec<Occurrence> = pattern
///     .parts_for("Section")
///     .unwrap()
///     .iter()
///     .map(|&i| pattern.capture(i).occurrence())
///     .collect();
/// assert_eq!(
///     sections,
///     vec![Occurrence::Index(0), Occurrence::Index(1), Occurrence::Last]
/// );
/// # Ok::<(), lexical_keys::KeyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    text: String,
    segments: Vec<PatternSegment>,
    captures: Vec<CapturePart>,
    by_identifier: HashMap<String, usize>,
    by_parameter: HashMap<String, Vec<usize>>,
    /// Source of the composite regex, validated at compile time.
    composite_expr: String,
    composite: OnceLock<std::result::Result<CompositeRegex, KeyError>>,
}

impl CompiledPattern {
    pub(crate) fn from_tokens(text: &str, tokens: Vec<Token>, infos: &ParameterInfos) -> Result<Self> {
        let mut segments = Vec::with_capacity(tokens.len());
        let mut captures: Vec<CapturePart> = Vec::new();
        let mut by_identifier = HashMap::new();
        let mut by_parameter: HashMap<String, Vec<usize>> = HashMap::new();

        for token in tokens {
            match token {
                Token::Literal(literal) => segments.push(PatternSegment::Literal(literal)),
                Token::Parameter(parameter) => {
                    let capture_index = captures.len();
                    let part = build_part(text, parameter, capture_index, segments.len(), infos)?;

                    if by_identifier
                        .insert(part.identifier.clone(), capture_index)
                        .is_some()
                    {
                        return Err(KeyError::PatternSyntax(format!(
                            "duplicate identifier '{}' in pattern '{}'",
                            part.identifier, text
                        )));
                    }
                    by_parameter
                        .entry(part.parameter_name.clone())
                        .or_default()
                        .push(capture_index);
                    segments.push(PatternSegment::Capture(capture_index));
                    captures.push(part);
                }
            }
        }

        // Stable sort keeps text order among equal occurrences.
        for indices in by_parameter.values_mut() {
            indices.sort_by_key(|&i| captures[i].occurrence);
        }

        // Each rule parses on its own, but group names can still collide
        // across rules or with the `lk_cN` groups of the composite.
        let composite_expr = composite_expression(&segments, &captures);
        regex_syntax::Parser::new()
            .parse(&composite_expr)
            .map_err(|e| {
                KeyError::PatternSyntax(format!(
                    "rules of pattern '{text}' do not combine into a valid regex: {e}"
                ))
            })?;

        Ok(Self {
            text: text.to_string(),
            segments,
            captures,
            by_identifier,
            by_parameter,
            composite_expr,
            composite: OnceLock::new(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Literal and parameter segments in text order.
    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Parameter parts; position equals capture index.
    pub fn captures(&self) -> &[CapturePart] {
        &self.captures
    }

    pub fn capture(&self, capture_index: usize) -> &CapturePart {
        &self.captures[capture_index]
    }

    pub fn capture_count(&self) -> usize {
        self.captures.len()
    }

    pub fn part_by_identifier(&self, identifier: &str) -> Option<&CapturePart> {
        self.by_identifier
            .get(identifier)
            .map(|&i| &self.captures[i])
    }

    /// Capture indices of the parts for `parameter_name`, ordered by occurrence.
    pub fn parts_for(&self, parameter_name: &str) -> Option<&[usize]> {
        self.by_parameter.get(parameter_name).map(Vec::as_slice)
    }

    /// Every parameter name with its ordered capture indices.
    pub fn parameter_groups(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.by_parameter
            .iter()
            .map(|(name, indices)| (name.as_str(), indices.as_slice()))
    }

    pub fn has_parameter(&self, parameter_name: &str) -> bool {
        self.by_parameter.contains_key(parameter_name)
    }

    /// The composite regex for flat-string matching, built on first use.
    ///
    /// Concurrent first callers block on a single build and all observe
    /// its result.
    pub fn composite_regex(&self) -> Result<&CompositeRegex> {
        self.composite
            .get_or_init(|| self.build_composite())
            .as_ref()
            .map_err(|e| e.clone())
    }

    fn build_composite(&self) -> Result<CompositeRegex> {
        let expr = &self.composite_expr;
        tracing::debug!(pattern = %self.text, regex = %expr, "building composite regex");

        let regex = Regex::new(expr).map_err(|e| {
            KeyError::PatternSyntax(format!("pattern '{}' yields an invalid regex: {}", self.text, e))
        })?;

        let mut groups = vec![0; self.captures.len()];
        for (group, name) in regex.capture_names().enumerate() {
            let Some(name) = name else { continue };
            if let Some(index) = name
                .strip_prefix("lk_c")
                .and_then(|n| n.parse::<usize>().ok())
            {
                if index < groups.len() && name == group_name(index) {
                    groups[index] = group;
                }
            }
        }

        Ok(CompositeRegex { regex, groups })
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.segments == other.segments
            && sequence_eq(&self.captures, &other.captures, |a, b| a == b)
    }
}

impl Eq for CompiledPattern {}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// `^` + escaped literals + one `(?:PREFIX(?P<lk_cN>RULE)POSTFIX)` per part,
/// optional parts suffixed with `?`, + `$`.
fn composite_expression(segments: &[PatternSegment], captures: &[CapturePart]) -> String {
    let mut expr = String::from("^");
    for segment in segments {
        match segment {
            PatternSegment::Literal(literal) => expr.push_str(&regex::escape(literal)),
            PatternSegment::Capture(index) => {
                let part = &captures[*index];
                expr.push_str("(?:");
                expr.push_str(&regex::escape(&part.prefix));
                expr.push_str("(?P<");
                expr.push_str(&group_name(*index));
                expr.push('>');
                match &part.effective_rule {
                    Some(rule) => {
                        expr.push_str("(?:");
                        expr.push_str(rule);
                        expr.push(')');
                    }
                    None => expr.push_str(".+?"),
                }
                expr.push(')');
                expr.push_str(&regex::escape(&part.postfix));
                expr.push(')');
                if !part.required {
                    expr.push('?');
                }
            }
        }
    }
    expr.push('$');
    expr
}

/// Split `Section_1` / `Section_n` / `Section` into name and occurrence.
fn split_identifier(text: &str, identifier: &str) -> Result<(String, Occurrence)> {
    if let Some((name, suffix)) = identifier.rsplit_once('_') {
        if !name.is_empty() {
            if suffix == "n" {
                return Ok((name.to_string(), Occurrence::Last));
            }
            if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
                let index = suffix.parse::<u32>().map_err(|_| {
                    KeyError::PatternSyntax(format!(
                        "occurrence index of '{identifier}' is out of range in pattern '{text}'"
                    ))
                })?;
                return Ok((name.to_string(), Occurrence::Index(index)));
            }
        }
    }
    Ok((identifier.to_string(), Occurrence::Last))
}

fn build_part(
    text: &str,
    token: ParameterToken,
    capture_index: usize,
    segment_index: usize,
    infos: &ParameterInfos,
) -> Result<CapturePart> {
    let (parameter_name, occurrence) = split_identifier(text, &token.identifier)?;

    let effective_rule = token
        .rule
        .clone()
        .or_else(|| infos.default_rule(&parameter_name).map(str::to_string));

    let matcher = match &effective_rule {
        Some(rule) => Some(Regex::new(&format!("^(?:{rule})$")).map_err(|e| {
            KeyError::PatternSyntax(format!(
                "invalid rule for '{}' at position {} in pattern '{}': {}",
                token.identifier, token.position, text, e
            ))
        })?),
        None => None,
    };

    Ok(CapturePart {
        identifier: token.identifier,
        parameter_name,
        occurrence,
        required: token.required,
        prefix: token.prefix,
        postfix: token.postfix,
        capture_index,
        segment_index,
        inline_rule: token.rule,
        effective_rule,
        matcher,
    })
}
