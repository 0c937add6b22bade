//! Deciding when two elements are the same.
//!
//! Elements with a meaningful `PartialEq` are compared with [`Exact`]. Continuous values, like
//! floating point matrices, rarely reproduce exactly under an operation and are compared with
//! [`Tolerance`] instead, which accepts values whose components all lie within the tolerance of
//! each other.
use std::fmt;

use approx::AbsDiffEq;

/// An equality notion between an element of type `A` and a value of type `B`.
pub trait Equivalence<A, B = A>
where
    A: ?Sized,
    B: ?Sized,
{
    /// Whether `value` should be considered equal to `element`.
    fn equivalent(&self, element: &A, value: &B) -> bool;
}

/// Native equality via `PartialEq`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Exact;

impl<A, B> Equivalence<A, B> for Exact
where
    A: PartialEq<B> + ?Sized,
    B: ?Sized,
{
    fn equivalent(&self, element: &A, value: &B) -> bool {
        element == value
    }
}

/// Equality up to an absolute tolerance, via [`AbsDiffEq`].
///
/// For structured values every component has to be within the tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance<E>(pub E);

impl<A, B, E> Equivalence<A, B> for Tolerance<E>
where
    A: AbsDiffEq<B, Epsilon = E> + ?Sized,
    B: ?Sized,
    E: Clone,
{
    fn equivalent(&self, element: &A, value: &B) -> bool {
        element.abs_diff_eq(value, self.0.clone())
    }
}

/// Whether `a` and `b` differ by at most `tolerance` in every component.
pub fn is_approx_eq<A, B>(a: &A, b: &B, tolerance: A::Epsilon) -> bool
where
    A: AbsDiffEq<B> + ?Sized,
    B: ?Sized,
{
    a.abs_diff_eq(b, tolerance)
}

/// A value with a display name.
///
/// Comparisons only look at the value, formatting only shows the name. A labeled element also
/// compares against bare values, so an operation can return a plain value that is then matched
/// against the labeled elements.
#[derive(Clone, Debug)]
pub struct Labeled<T> {
    name: String,
    value: T,
}

impl<T> Labeled<T> {
    pub fn new(name: impl Into<String>, value: T) -> Labeled<T> {
        Labeled {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: PartialEq> PartialEq for Labeled<T> {
    fn eq(&self, other: &Labeled<T>) -> bool {
        self.value == other.value
    }
}

impl<T: PartialEq> PartialEq<T> for Labeled<T> {
    fn eq(&self, other: &T) -> bool {
        self.value == *other
    }
}

impl<T: AbsDiffEq> AbsDiffEq for Labeled<T> {
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Labeled<T>, epsilon: T::Epsilon) -> bool {
        self.value.abs_diff_eq(&other.value, epsilon)
    }
}

impl<T: AbsDiffEq> AbsDiffEq<T> for Labeled<T> {
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &T, epsilon: T::Epsilon) -> bool {
        self.value.abs_diff_eq(other, epsilon)
    }
}

impl<T> fmt::Display for Labeled<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_tolerance_is_inclusive() {
        assert!(is_approx_eq(&1.0f64, &1.25, 0.25));
        assert!(is_approx_eq(&1.25f64, &1.0, 0.25));
        assert!(!is_approx_eq(&1.0f64, &1.5, 0.25));
        assert!(Tolerance(0.0).equivalent(&3.0f64, &3.0));
    }

    #[test]
    fn slices_need_every_component_within_tolerance() {
        let a = [1.0f64, 2.0, 3.0];
        let close = [1.01f64, 1.99, 3.0];
        // The sum of the differences is small, but one component is far off.
        let one_off = [1.0f64, 2.0, 3.2];

        assert!(Tolerance(0.05).equivalent(&a[..], &close[..]));
        assert!(!Tolerance(0.05).equivalent(&a[..], &one_off[..]));
    }

    #[test]
    fn exact_uses_partial_eq() {
        assert!(Exact.equivalent(&4u32, &4u32));
        assert!(!Exact.equivalent(&4u32, &5u32));
        assert!(!Exact.equivalent(&1.0f64, &1.0000001));
    }

    #[test]
    fn labeled_compares_values_and_shows_names() {
        let a = Labeled::new("a", 0.5f64);
        let b = Labeled::new("b", 0.5f64);
        let c = Labeled::new("c", 0.75f64);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a == 0.5);
        assert!(Tolerance(0.3).equivalent(&a, &c));
        assert!(Tolerance(0.3).equivalent(&a, &0.7));
        assert!(!Tolerance(0.1).equivalent(&a, &0.7));

        assert_eq!(format!("{}", c), "c");
        assert_eq!(c.name(), "c");
        assert_eq!(*c.value(), 0.75);
    }
}
