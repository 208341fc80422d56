//! Known parameter names and their identity/matching metadata.

use super::Classification;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Pseudo parameter name a pattern uses to accept any section-like parameter.
pub const ANY_SECTION: &str = "anysection";

/// Parameter names that fall back to a pattern's `anysection` parts when the
/// pattern has no parts of their own.
pub const SECTION_PARAMETERS: [&str; 5] = ["Section", "Location", "Type", "Resource", "Assembly"];

pub const CULTURE: &str = "Culture";
pub const ASSEMBLY: &str = "Assembly";
pub const RESOURCE: &str = "Resource";
pub const TYPE: &str = "Type";
pub const LOCATION: &str = "Location";
pub const SECTION: &str = "Section";
pub const KEY: &str = "Key";

/// Default rule for culture names such as `fi`, `en-US` or `sr-Latn-RS`.
pub const CULTURE_RULE: &str = "[a-z]{2,8}(?:-[A-Za-z0-9]{1,8})*";

pub fn is_section_like(parameter_name: &str) -> bool {
    SECTION_PARAMETERS.contains(&parameter_name)
}

/// Metadata for one parameter name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    #[serde(default)]
    pub classification: Classification,
    /// Regex a value must satisfy when a pattern part has no inline rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_rule: Option<String>,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, classification: Classification) -> Self {
        Self {
            name: name.into(),
            classification,
            default_rule: None,
        }
    }

    pub fn with_default_rule(mut self, rule: impl Into<String>) -> Self {
        self.default_rule = Some(rule.into());
        self
    }
}

/// Registry of [`ParameterInfo`]s.
///
/// Names not present in the registry are treated as canonical and carry no
/// default rule.
///
/// # Examples
///
/// ```rust
/// use lexical_keys::{Classification, ParameterInfos};
///
/// let infos = ParameterInfos::global();
/// assert_eq!(infos.classification("Culture"), Classification::NonCanonical);
/// assert_eq!(infos.classification("Section"), Classification::Canonical);
/// assert_eq!(infos.classification("Unknown"), Classification::Canonical);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterInfos {
    parameters: Vec<ParameterInfo>,
}

impl ParameterInfos {
    /// Empty registry: every name is canonical, no default rules.
    pub fn empty() -> Self {
        Self {
            parameters: Vec::new(),
        }
    }

    /// The shared, read-only default registry.
    pub fn global() -> &'static ParameterInfos {
        static GLOBAL: OnceLock<ParameterInfos> = OnceLock::new();
        GLOBAL.get_or_init(ParameterInfos::default)
    }

    pub fn get(&self, name: &str) -> Option<&ParameterInfo> {
        self.parameters.iter().find(|info| info.name == name)
    }

    pub fn classification(&self, name: &str) -> Classification {
        self.get(name)
            .map(|info| info.classification)
            .unwrap_or(Classification::Canonical)
    }

    pub fn default_rule(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|info| info.default_rule.as_deref())
    }

    /// Insert or replace the info for `info.name`.
    pub fn insert(&mut self, info: ParameterInfo) {
        match self.parameters.iter_mut().find(|p| p.name == info.name) {
            Some(existing) => *existing = info,
            None => self.parameters.push(info),
        }
    }

    pub fn with(mut self, info: ParameterInfo) -> Self {
        self.insert(info);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterInfo> {
        self.parameters.iter()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl Default for ParameterInfos {
    fn default() -> Self {
        Self::empty()
            .with(ParameterInfo::new(CULTURE, Classification::NonCanonical).with_default_rule(CULTURE_RULE))
            .with(ParameterInfo::new(ASSEMBLY, Classification::NonCanonical))
            .with(ParameterInfo::new(TYPE, Classification::NonCanonical))
            .with(ParameterInfo::new(RESOURCE, Classification::Canonical))
            .with(ParameterInfo::new(LOCATION, Classification::Canonical))
            .with(ParameterInfo::new(SECTION, Classification::Canonical))
            .with(ParameterInfo::new(KEY, Classification::Canonical))
    }
}
