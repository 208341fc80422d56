//! Element-wise equality and hashing over sequences.

use std::hash::Hasher;

pub(crate) const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
pub(crate) const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Compare two sequences element by element with a custom predicate.
///
/// Sequences of different length are never equal.
pub fn sequence_eq<A, B, I, J, F>(a: I, b: J, mut eq: F) -> bool
where
    I: IntoIterator<Item = A>,
    J: IntoIterator<Item = B>,
    F: FnMut(A, B) -> bool,
{
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) => {
                if !eq(x, y) {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

/// Order-sensitive FNV-style hash of a sequence, each element hashed by `hash`.
pub fn sequence_hash<T, I, F>(items: I, mut hash: F) -> u64
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> u64,
{
    items.into_iter().fold(FNV_OFFSET, |acc, item| {
        (acc ^ hash(item)).wrapping_mul(FNV_PRIME)
    })
}

/// FNV-1a over the bytes of a string.
///
/// Deterministic across processes, unlike `std`'s randomized hasher; key hash
/// codes can be logged and compared between runs.
pub fn fnv1a(text: &str) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in text.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// [`Hasher`] adapter over FNV-1a, used for the short string keys of
/// internal maps.
#[derive(Debug, Clone, Copy)]
pub struct FnvHasher(u64);

impl Default for FnvHasher {
    fn default() -> Self {
        Self(FNV_OFFSET)
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 ^= u64::from(*byte);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }
}
