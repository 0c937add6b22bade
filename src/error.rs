//! Construction failures and non-fatal diagnostics.
use thiserror::Error;

use crate::El;

/// Hard failures that prevent a [`Group`][crate::group::Group] from being constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The product of two elements is not equal to any element of the sequence.
    #[error("product of elements {left} and {right} does not match any element")]
    NoMatchingElement {
        /// Index of the first operand.
        left: usize,
        /// Index of the second operand.
        right: usize,
    },
    /// Composing two permutations produced a permutation outside of the given set.
    #[error("composition of permutations {left} and {right} is {image:?}, which is not in the set")]
    OperationNotClosed {
        /// Index of the permutation applied last.
        left: usize,
        /// Index of the permutation applied first.
        right: usize,
        /// Images of the composed permutation.
        image: Vec<El>,
    },
    /// The table or permutation list does not have one entry per element.
    #[error("expected {elements} entries to match the elements, found {table}")]
    LengthMismatch { elements: usize, table: usize },
    /// A table row has the wrong length.
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// Conditions noticed while deriving group structure that do not stop construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Repeatedly multiplying an element by itself did not reach the identity before
    /// returning to the element (or exhausting the group). The recorded order is the step
    /// count at which the walk was abandoned.
    ///
    /// This only happens for tables that pass the closure and inverse checks without being
    /// associative.
    InconsistentOrderWalk { element: usize, steps: usize },
}
