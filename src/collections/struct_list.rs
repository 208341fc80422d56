//! Inline-first ordered sequence.

use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

/// Ordered sequence that keeps its first `N` elements inline and spills the
/// rest to the heap.
///
/// Key chains are short in practice (culture, type, a few sections, key), so
/// the hot matching and name-building paths collect them into a
/// `StructList<_, 16>` without touching the allocator.
///
/// # Examples
///
/// ```rust
/// use lexical_keys::collections::StructList;
///
/// let mut list: StructList<u32, 2> = StructList::new();
/// list.push(3);
/// list.push(1);
/// list.push(2); // spills to the heap
/// list.sort_by(|a, b| a.cmp(b));
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
/// assert!(list.spilled());
/// ```
pub struct StructList<T, const N: usize> {
    items: SmallVec<[T; N]>,
}

impl<T, const N: usize> StructList<T, N> {
    pub fn new() -> Self {
        Self {
            items: SmallVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether elements have been moved past the inline capacity.
    pub fn spilled(&self) -> bool {
        self.items.spilled()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }

    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    /// Stable in-place insertion sort.
    ///
    /// Lists here hold a handful of elements; the sort never allocates.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        for i in 1..self.items.len() {
            let mut j = i;
            while j > 0 && compare(&self.items[j - 1], &self.items[j]) == Ordering::Greater {
                self.items.swap(j - 1, j);
                j -= 1;
            }
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn contains_by<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.items.iter().any(predicate)
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.to_vec()
    }
}

impl<T, const N: usize> Default for StructList<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for StructList<T, N> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for StructList<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for StructList<T, N> {
    fn eq(&self, other: &Self) -> bool {
        super::sequence_eq(self.iter(), other.iter(), |a, b| a == b)
    }
}

impl<T: Eq, const N: usize> Eq for StructList<T, N> {}

impl<T, const N: usize> Extend<T> for StructList<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T, const N: usize> FromIterator<T> for StructList<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a StructList<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
