//! Low-allocation collection helpers used on the matching hot paths.
//!
//! - [`StructList`] - inline-first ordered sequence with in-place sort
//! - [`sequence_eq`] / [`sequence_hash`] - element-wise equality and hashing
//! - [`fnv1a`] - deterministic string hashing for key identity

pub mod equality;
pub mod struct_list;

pub use equality::{fnv1a, sequence_eq, sequence_hash, FnvHasher};
pub use struct_list::StructList;

pub(crate) use equality::FNV_PRIME;
