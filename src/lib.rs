//! Finite groups from Cayley tables
//!
//! This crate checks whether a finite set with a binary operation forms a group and derives its
//! structure: identity, inverses, element orders, generators and all proper non-trivial
//! subgroups.
//!
//! A [`Group`] can be built from an operation ([`Group::from_operation`]), from a ready-made
//! table ([`Group::from_cayley_table`]), from a set of permutations under composition
//! ([`perm::generate_group`]) or from continuous values compared up to a tolerance
//! ([`Group::from_operation_with_tolerance`]).
//!
//! Associativity is never checked. Only small groups are practical for the subgroup search.
pub mod equality;
pub mod error;
pub mod group;
pub mod perm;
pub mod table;

pub use error::{Diagnostic, Error};
pub use group::Group;

/// Permutation image.
///
/// Permutations act on {0, ..., n-1}, represented as `u32` values.
pub type El = u32;

/// A Cayley table in `table[a][b]` layout, see [`table`].
pub type Table<T> = Vec<Vec<T>>;
