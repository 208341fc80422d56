//! Immutable structured keys.
//!
//! A [`Key`] is a handle to the tail of a singly-linked chain of [`KeyPart`]s.
//! Each part names one parameter occurrence (`Culture = "fi"`,
//! `Section = "Errors"`, `Key = "Success"`) and links to the part before it.
//! Chains are persistent: appending allocates one new part pointing at the
//! shared previous part, so any number of keys can share a tail and be read
//! from any number of threads.
//!
//! ```rust
//! use lexical_keys::Key;
//!
//! let controller = Key::root().culture("fi").type_("ConsoleApp1.MyController");
//! let success = controller.key("Success");
//! let failure = controller.key("Failure");
//!
//! assert_eq!(success.to_string(), "Culture:fi:Type:ConsoleApp1.MyController:Key:Success");
//! assert!(success.previous().unwrap().ptr_eq(failure.previous().unwrap()));
//! ```

pub mod format;
pub mod parameters;

pub use parameters::{ParameterInfo, ParameterInfos};

use crate::error::{KeyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// How a parameter participates in key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Position in the chain is significant (nested sections, the key itself).
    #[default]
    Canonical,
    /// Only presence and value matter (culture, type, assembly).
    NonCanonical,
}

/// One named parameter occurrence in a key chain.
pub struct KeyPart {
    name: Arc<str>,
    value: Arc<str>,
    previous: Option<Key>,
    classification: Classification,
    /// Default-comparer hash; zero means not yet computed.
    hash_cache: AtomicU64,
}

impl KeyPart {
    pub fn parameter_name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Shared handle to the value, for callers that keep it past the key.
    pub fn value_arc(&self) -> &Arc<str> {
        &self.value
    }

    pub fn previous(&self) -> Option<&Key> {
        self.previous.as_ref()
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn is_canonical(&self) -> bool {
        self.classification == Classification::Canonical
    }

    /// Root sentinels carry an empty parameter name and are skipped by every
    /// consumer.
    pub fn is_root(&self) -> bool {
        self.name.is_empty()
    }

    /// Walk from this part back to the root, this part first.
    pub fn walk(&self) -> Walk<'_> {
        Walk { next: Some(self) }
    }

    /// Non-root parts of the given classification, in link order.
    pub fn parts_of(&self, classification: Classification) -> impl Iterator<Item = &KeyPart> {
        self.walk()
            .filter(move |part| !part.is_root() && part.classification == classification)
    }

    pub fn canonical_parts(&self) -> impl Iterator<Item = &KeyPart> {
        self.parts_of(Classification::Canonical)
    }

    pub fn non_canonical_parts(&self) -> impl Iterator<Item = &KeyPart> {
        self.parts_of(Classification::NonCanonical)
    }

    /// Number of non-root parts in the chain.
    pub fn len(&self) -> usize {
        self.walk().filter(|part| !part.is_root()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value of the left-most (tail-most) occurrence of `name` with a
    /// non-empty value.
    pub fn find(&self, name: &str) -> Option<&str> {
        self.walk()
            .find(|part| part.parameter_name() == name && !part.value.is_empty())
            .map(KeyPart::value)
    }

    pub(crate) fn cached_hash(&self) -> Option<u64> {
        match self.hash_cache.load(Ordering::Acquire) {
            0 => None,
            hash => Some(hash),
        }
    }

    /// Racing writers store the same value, so a plain store is enough.
    pub(crate) fn store_hash(&self, hash: u64) -> u64 {
        let hash = if hash == 0 { 1 } else { hash };
        self.hash_cache.store(hash, Ordering::Release);
        hash
    }
}

impl fmt::Debug for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPart")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("classification", &self.classification)
            .finish()
    }
}

impl Drop for KeyPart {
    // Unlink uniquely owned ancestors iteratively so very long chains do not
    // recurse once per part.
    fn drop(&mut self) {
        let mut next = self.previous.take();
        while let Some(Key(part)) = next {
            match Arc::try_unwrap(part) {
                Ok(mut owned) => next = owned.previous.take(),
                Err(_) => break,
            }
        }
    }
}

/// Cheaply cloneable handle to the tail [`KeyPart`] of a chain.
#[derive(Clone)]
pub struct Key(Arc<KeyPart>);

impl Key {
    /// A root sentinel: empty parameter name and value.
    pub fn root() -> Key {
        Key::link(None, Arc::from(""), Arc::from(""), Classification::Canonical)
    }

    /// Start a chain with a single part.
    ///
    /// # Errors
    /// [`KeyError::InvalidArgument`] when `parameter_name` is empty.
    pub fn new(
        parameter_name: impl Into<Arc<str>>,
        value: impl Into<Arc<str>>,
        classification: Classification,
    ) -> Result<Key> {
        Self::checked_link(None, parameter_name.into(), value.into(), classification)
    }

    /// Compose a new part onto this chain. `self` is left untouched.
    ///
    /// # Errors
    /// [`KeyError::InvalidArgument`] when `parameter_name` is empty; the empty
    /// name is reserved for root sentinels.
    pub fn append(
        &self,
        parameter_name: impl Into<Arc<str>>,
        value: impl Into<Arc<str>>,
        classification: Classification,
    ) -> Result<Key> {
        Self::checked_link(
            Some(self.clone()),
            parameter_name.into(),
            value.into(),
            classification,
        )
    }

    /// Append a parameter classified by the global [`ParameterInfos`].
    pub fn parameter(&self, parameter_name: &str, value: impl Into<Arc<str>>) -> Result<Key> {
        self.parameter_with(ParameterInfos::global(), parameter_name, value)
    }

    /// Append a parameter classified by `infos`.
    pub fn parameter_with(
        &self,
        infos: &ParameterInfos,
        parameter_name: &str,
        value: impl Into<Arc<str>>,
    ) -> Result<Key> {
        self.append(parameter_name, value, infos.classification(parameter_name))
    }

    pub fn culture(&self, value: impl Into<Arc<str>>) -> Key {
        self.known(parameters::CULTURE, value, Classification::NonCanonical)
    }

    pub fn assembly(&self, value: impl Into<Arc<str>>) -> Key {
        self.known(parameters::ASSEMBLY, value, Classification::NonCanonical)
    }

    /// `Type` parameter (`type` is a keyword).
    pub fn type_(&self, value: impl Into<Arc<str>>) -> Key {
        self.known(parameters::TYPE, value, Classification::NonCanonical)
    }

    pub fn resource(&self, value: impl Into<Arc<str>>) -> Key {
        self.known(parameters::RESOURCE, value, Classification::Canonical)
    }

    pub fn location(&self, value: impl Into<Arc<str>>) -> Key {
        self.known(parameters::LOCATION, value, Classification::Canonical)
    }

    pub fn section(&self, value: impl Into<Arc<str>>) -> Key {
        self.known(parameters::SECTION, value, Classification::Canonical)
    }

    pub fn key(&self, value: impl Into<Arc<str>>) -> Key {
        self.known(parameters::KEY, value, Classification::Canonical)
    }

    /// Whether both handles point at the same part.
    pub fn ptr_eq(&self, other: &Key) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn known(
        &self,
        parameter_name: &'static str,
        value: impl Into<Arc<str>>,
        classification: Classification,
    ) -> Key {
        Key::link(
            Some(self.clone()),
            Arc::from(parameter_name),
            value.into(),
            classification,
        )
    }

    fn checked_link(
        previous: Option<Key>,
        name: Arc<str>,
        value: Arc<str>,
        classification: Classification,
    ) -> Result<Key> {
        if name.is_empty() {
            return Err(KeyError::InvalidArgument(
                "parameter name must not be empty".to_string(),
            ));
        }
        Ok(Key::link(previous, name, value, classification))
    }

    fn link(
        previous: Option<Key>,
        name: Arc<str>,
        value: Arc<str>,
        classification: Classification,
    ) -> Key {
        Key(Arc::new(KeyPart {
            name,
            value,
            previous,
            classification,
            hash_cache: AtomicU64::new(0),
        }))
    }
}

impl Deref for Key {
    type Target = KeyPart;

    fn deref(&self) -> &KeyPart {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({self})")
    }
}

/// Iterator from a part back to the root.
#[derive(Clone)]
pub struct Walk<'a> {
    next: Option<&'a KeyPart>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a KeyPart;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.previous.as_deref();
        Some(current)
    }
}

impl std::iter::FusedIterator for Walk<'_> {}
