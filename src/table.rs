//! Building Cayley tables.
//!
//! A table is stored as `table[a][b]`, holding the product of the elements at index `a` and `b`
//! (`a` operating on `b`). Written out by hand a table is usually laid out as `[row][column]`, with
//! the first operand selecting the column; [`transpose`] converts between the two layouts.
use approx::AbsDiffEq;

use crate::equality::{Equivalence, Tolerance};
use crate::error::Error;
use crate::Table;

/// Apply an operation to every ordered pair of elements.
///
/// The results are not checked for membership, that happens when a
/// [`Group`][crate::group::Group] is built from the table.
pub fn build_from_operation<T, U, F>(elements: &[T], mut op: F) -> Table<U>
where
    F: FnMut(&T, &T) -> U,
{
    let mut table = Vec::with_capacity(elements.len());
    for a in elements {
        let mut products = Vec::with_capacity(elements.len());
        for b in elements {
            products.push(op(a, b));
        }
        table.push(products);
    }
    table
}

/// Apply an operation to every ordered pair of elements and replace each result by the first
/// element that is equivalent to it.
///
/// Fails with [`Error::NoMatchingElement`] as soon as a result matches no element.
pub fn build_matching<T, U, F, Q>(
    elements: &[T],
    mut op: F,
    equivalence: &Q,
) -> Result<Table<T>, Error>
where
    T: Clone,
    F: FnMut(&T, &T) -> U,
    Q: Equivalence<T, U> + ?Sized,
{
    let mut table = Vec::with_capacity(elements.len());
    for (left, a) in elements.iter().enumerate() {
        let mut products = Vec::with_capacity(elements.len());
        for (right, b) in elements.iter().enumerate() {
            let value = op(a, b);
            match elements.iter().find(|el| equivalence.equivalent(el, &value)) {
                Some(el) => products.push(el.clone()),
                None => {
                    log::warn!(
                        "product of elements {} and {} matches no element, aborting table build",
                        left,
                        right
                    );
                    return Err(Error::NoMatchingElement { left, right });
                }
            }
        }
        table.push(products);
    }
    Ok(table)
}

/// [`build_matching`] with equality up to `tolerance` in every component.
pub fn build_with_tolerance<T, U, F>(
    elements: &[T],
    op: F,
    tolerance: T::Epsilon,
) -> Result<Table<T>, Error>
where
    T: AbsDiffEq<U> + Clone,
    T::Epsilon: Clone,
    F: FnMut(&T, &T) -> U,
{
    build_matching(elements, op, &Tolerance(tolerance))
}

/// Swap rows and columns of a square table.
///
/// Converts a table written as `[row][column]` into the `[a][b]` layout used by
/// [`Group`][crate::group::Group], and back.
///
/// Panics when the table is not square.
pub fn transpose<T: Clone>(table: &[Vec<T>]) -> Table<T> {
    (0..table.len())
        .map(|i| table.iter().map(|row| row[i].clone()).collect())
        .collect()
}
