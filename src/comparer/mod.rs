//! Key identity: equality and hashing over key chains.
//!
//! A [`KeyComparer`] is composed from two kinds of components:
//!
//! - [`CanonicalComparer`]s are applied link by link to the canonical-only
//!   walks of both keys, so the position of a canonical parameter matters.
//! - [`NonCanonicalComparer`]s see whole chains and decide their own notion of
//!   the relevant parameter set, so order does not matter.
//!
//! The [default comparer](KeyComparer::default_comparer) pairs
//! [`ParameterNameValueComparer`] with [`NonCanonicalParametersComparer`] and
//! is what `Key`'s `PartialEq` and `Hash` implementations use.
//!
//! ```rust
//! use lexical_keys::{Key, KeyComparer};
//!
//! let comparer = KeyComparer::default_comparer();
//! let a = Key::root().culture("fi").type_("X");
//! let b = Key::root().type_("X").culture("fi");
//! assert!(comparer.equals(&a, &b));
//! assert_eq!(comparer.hash(&a), comparer.hash(&b));
//!
//! let ab = Key::root().section("A").section("B");
//! let ba = Key::root().section("B").section("A");
//! assert!(!comparer.equals(&ab, &ba));
//! ```

pub mod components;

pub use components::{
    NonCanonicalParametersComparer, ParameterNameValueComparer, ParameterValueComparer,
};

use crate::collections::sequence_hash;
use crate::error::{KeyError, Result};
use crate::key::{Key, KeyPart};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

/// Compares two canonical parts occupying the same position.
pub trait CanonicalComparer: fmt::Debug + Send + Sync {
    fn equals(&self, x: &KeyPart, y: &KeyPart) -> bool;
    fn hash(&self, part: &KeyPart) -> u64;
}

/// Compares two whole chains with set semantics.
///
/// Hashes are combined with XOR, so a component's hash must not depend on
/// parameter order.
pub trait NonCanonicalComparer: fmt::Debug + Send + Sync {
    fn equals(&self, x: &Key, y: &Key) -> bool;
    fn hash(&self, key: &Key) -> u64;
}

/// Composable equality/hash strategy over key chains.
///
/// Configure with [`add_canonical`](Self::add_canonical) and
/// [`add_non_canonical`](Self::add_non_canonical), then [`seal`](Self::seal)
/// before sharing; a sealed comparer refuses further configuration.
#[derive(Debug, Default)]
pub struct KeyComparer {
    canonical: Vec<Arc<dyn CanonicalComparer>>,
    non_canonical: Vec<Arc<dyn NonCanonicalComparer>>,
    sealed: bool,
    /// Only the default comparer may read and write the per-part hash cache.
    uses_part_cache: bool,
}

impl KeyComparer {
    /// Empty, unsealed comparer. With no components every key is equal.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared, sealed default comparer.
    pub fn default_comparer() -> &'static KeyComparer {
        static DEFAULT: OnceLock<KeyComparer> = OnceLock::new();
        DEFAULT.get_or_init(|| {
            let mut comparer = KeyComparer {
                canonical: vec![Arc::new(ParameterNameValueComparer)],
                non_canonical: vec![Arc::new(NonCanonicalParametersComparer)],
                sealed: false,
                uses_part_cache: true,
            };
            comparer.seal();
            comparer
        })
    }

    pub fn add_canonical(&mut self, component: Arc<dyn CanonicalComparer>) -> Result<&mut Self> {
        self.ensure_unsealed()?;
        self.canonical.push(component);
        Ok(self)
    }

    pub fn add_non_canonical(
        &mut self,
        component: Arc<dyn NonCanonicalComparer>,
    ) -> Result<&mut Self> {
        self.ensure_unsealed()?;
        self.non_canonical.push(component);
        Ok(self)
    }

    /// Freeze the configuration. Idempotent.
    pub fn seal(&mut self) -> &mut Self {
        if !self.sealed {
            tracing::debug!(
                canonical = self.canonical.len(),
                non_canonical = self.non_canonical.len(),
                "sealing key comparer"
            );
        }
        self.sealed = true;
        self
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn canonical_components(&self) -> &[Arc<dyn CanonicalComparer>] {
        &self.canonical
    }

    pub fn non_canonical_components(&self) -> &[Arc<dyn NonCanonicalComparer>] {
        &self.non_canonical
    }

    fn ensure_unsealed(&self) -> Result<()> {
        if self.sealed {
            return Err(KeyError::InvalidOperation(
                "key comparer is sealed and can no longer be configured".to_string(),
            ));
        }
        Ok(())
    }

    pub fn equals(&self, x: &Key, y: &Key) -> bool {
        if x.ptr_eq(y) {
            return true;
        }
        if self.non_canonical.iter().any(|c| !c.equals(x, y)) {
            return false;
        }

        let mut xs = x.canonical_parts();
        let mut ys = y.canonical_parts();
        loop {
            match (xs.next(), ys.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) => {
                    if self.canonical.iter().any(|c| !c.equals(a, b)) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }

    pub fn hash(&self, key: &Key) -> u64 {
        if self.uses_part_cache {
            if let Some(hash) = key.cached_hash() {
                return hash;
            }
        }

        let non_canonical = self
            .non_canonical
            .iter()
            .fold(0u64, |acc, c| acc ^ NonCanonicalComparer::hash(&**c, key));

        let canonical = sequence_hash(
            key.canonical_parts().flat_map(|part| {
                self.canonical
                    .iter()
                    .map(move |c| CanonicalComparer::hash(&**c, part))
            }),
            |hash| hash,
        );

        let hash = non_canonical ^ canonical;
        if self.uses_part_cache {
            key.store_hash(hash)
        } else {
            hash
        }
    }

    /// Null-aware equality: `None` equals only `None`.
    pub fn equals_opt(&self, x: Option<&Key>, y: Option<&Key>) -> bool {
        match (x, y) {
            (None, None) => true,
            (Some(x), Some(y)) => self.equals(x, y),
            _ => false,
        }
    }

    /// Null-aware hash: `None` hashes to zero.
    pub fn hash_opt(&self, key: Option<&Key>) -> u64 {
        key.map_or(0, |key| self.hash(key))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Key) -> bool {
        KeyComparer::default_comparer().equals(self, other)
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(KeyComparer::default_comparer().hash(self));
    }
}
