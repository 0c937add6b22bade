//! Permutations of finite sets and the groups they form under composition.
use std::fmt;

use crate::error::Error;
use crate::group::Group;
use crate::El;

/// A permutation of {0, ..., n-1}, stored as the images of 0..n.
///
/// Anything that can be viewed as a slice of images (`Vec<El>`, arrays, `Perm`) can be passed to
/// [`generate_group`]; `Perm` adds a checked constructor and cycle notation.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Perm {
    images: Vec<El>,
}

impl Perm {
    /// The identity permutation of {0, ..., n-1}.
    pub fn identity(n: usize) -> Perm {
        assert!(n <= El::MAX as usize);
        Perm {
            images: (0..n as El).collect(),
        }
    }

    /// Create a permutation from a vector containing the images of 0..n.
    ///
    /// Returns None if the vector does not correspond to a permutation.
    pub fn from_vec(images: Vec<El>) -> Option<Perm> {
        let mut seen = vec![false; images.len()];

        for &p_i in images.iter() {
            let p_i = p_i as usize;
            if p_i >= images.len() || seen[p_i] {
                return None;
            }
            seen[p_i] = true;
        }

        Some(Perm { images })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[El] {
        &self.images
    }

    /// Image of an element. Elements past the end are fixed.
    pub fn apply(&self, el: El) -> El {
        self.images.get(el as usize).cloned().unwrap_or(el)
    }

    /// The permutation applying `first` and then `self`.
    pub fn compose(&self, first: &Perm) -> Perm {
        Perm {
            images: compose(&self.images, &first.images),
        }
    }

    /// The proper cycles of this permutation, each starting at its smallest element.
    pub fn cycles(&self) -> Vec<Vec<El>> {
        let mut seen = vec![false; self.images.len()];
        let mut cycles = vec![];

        for start in 0..self.images.len() {
            if seen[start] || self.images[start] as usize == start {
                continue;
            }
            let mut cycle = vec![];
            let mut pos = start as El;
            while !seen[pos as usize] {
                seen[pos as usize] = true;
                cycle.push(pos);
                pos = self.apply(pos);
            }
            cycles.push(cycle);
        }

        cycles
    }
}

/// Composition of two image sequences: apply `first`, then `last`.
///
/// The result has `first`'s length. Images outside of `last` are fixed.
pub fn compose(last: &[El], first: &[El]) -> Vec<El> {
    first
        .iter()
        .map(|&el| last.get(el as usize).cloned().unwrap_or(el))
        .collect()
}

impl AsRef<[El]> for Perm {
    fn as_ref(&self) -> &[El] {
        &self.images
    }
}

impl From<Perm> for Vec<El> {
    fn from(perm: Perm) -> Vec<El> {
        perm.images
    }
}

impl fmt::Display for Perm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cycles = self.cycles();
        if cycles.is_empty() {
            return f.write_str("()");
        }
        for cycle in cycles {
            let mut first = true;
            for el in cycle {
                f.write_str(if first { "(" } else { " " })?;
                first = false;
                fmt::Display::fmt(&el, f)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Perm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Build the group formed by a set of permutations under composition.
///
/// `labels[i]` names `permutations[i]`. The table entry for `(i, j)` is the label of the
/// permutation applying `permutations[j]` first and `permutations[i]` second. The permutations
/// are expected to be distinct images of 0..n; this is not checked.
///
/// Fails with [`Error::OperationNotClosed`] for the first pair whose composition is not among
/// the permutations.
pub fn generate_group<L, P>(labels: Vec<L>, permutations: &[P]) -> Result<Group<L>, Error>
where
    L: Clone + PartialEq,
    P: AsRef<[El]>,
{
    if labels.len() != permutations.len() {
        return Err(Error::LengthMismatch {
            elements: labels.len(),
            table: permutations.len(),
        });
    }

    let mut table = Vec::with_capacity(labels.len());
    for (left, last) in permutations.iter().enumerate() {
        let mut products = Vec::with_capacity(labels.len());
        for (right, first) in permutations.iter().enumerate() {
            let image = compose(last.as_ref(), first.as_ref());
            match permutations.iter().position(|p| p.as_ref() == &image[..]) {
                Some(k) => products.push(labels[k].clone()),
                None => {
                    log::warn!(
                        "composition of permutations {} and {} is {:?}, which is not in the set",
                        left,
                        right,
                        image
                    );
                    return Err(Error::OperationNotClosed { left, right, image });
                }
            }
        }
        table.push(products);
    }

    Group::from_cayley_table(labels, table)
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn random_perm<S>(size: S) -> impl Strategy<Value = Perm>
    where
        S: Strategy<Value = El>,
    {
        size.prop_map(|v| (0..v).collect::<Vec<_>>())
            .prop_shuffle()
            .prop_map(|vec| Perm::from_vec(vec).unwrap())
    }

    fn square_symmetries() -> Vec<Vec<El>> {
        vec![
            vec![0, 1, 2, 3],
            vec![1, 2, 3, 0],
            vec![2, 3, 0, 1],
            vec![3, 0, 1, 2],
            vec![3, 2, 1, 0],
            vec![1, 0, 3, 2],
            vec![0, 3, 2, 1],
            vec![2, 1, 0, 3],
        ]
    }

    #[test]
    fn fmt_perms() {
        assert_eq!(format!("{}", Perm::identity(3)), "()");
        assert_eq!(
            format!("{}", Perm::from_vec(vec![4, 1, 5, 2, 3, 0]).unwrap()),
            "(0 4 3 2 5)"
        );
        assert_eq!(
            format!("{:?}", Perm::from_vec(vec![2, 3, 1, 0, 5, 4]).unwrap()),
            "(0 2 1 3)(4 5)"
        );
    }

    #[test]
    fn from_vec_rejects_non_permutations() {
        assert!(Perm::from_vec(vec![0, 2]).is_none());
        assert!(Perm::from_vec(vec![1, 1]).is_none());
        assert!(Perm::from_vec(vec![]).is_some());
    }

    #[test]
    fn composition_order() {
        let a = Perm::from_vec(vec![1, 0, 2, 3]).unwrap();
        let b = Perm::from_vec(vec![2, 3, 0, 1]).unwrap();

        // Apply b, then a.
        assert_eq!(a.compose(&b).images(), &[2, 3, 1, 0]);
        // Apply a, then b.
        assert_eq!(b.compose(&a).images(), &[3, 2, 0, 1]);
    }

    #[test]
    fn symmetries_of_a_square() {
        let labels: Vec<char> = "eabcdfgh".chars().collect();
        let group = generate_group(labels, &square_symmetries()).unwrap();

        assert!(group.is_valid());
        assert_eq!(group.order(), 8);
        assert_eq!(group.identity(), Some(&'e'));
        assert_eq!(group.element_orders(), Some(&[1, 4, 2, 4, 2, 2, 2, 2][..]));
        assert!(!group.is_cyclic());
        assert!(!group.is_abelian());
        assert_eq!(group.inverse(&'a'), Some(&'c'));

        let subgroups = group.subgroups();
        let sizes: Vec<usize> = subgroups.iter().map(|g| g.order()).collect();
        assert_eq!(sizes, vec![2, 2, 2, 2, 2, 4, 4, 4]);
        assert_eq!(subgroups[5].elements(), &['e', 'a', 'b', 'c']);
    }

    #[test]
    fn perms_as_elements() {
        let perms: Vec<Perm> = square_symmetries()
            .into_iter()
            .map(|images| Perm::from_vec(images).unwrap())
            .collect();
        let group = generate_group(perms.clone(), &perms).unwrap();
        assert_eq!(group.identity(), Some(&Perm::identity(4)));
        assert_eq!(group.order_of(&perms[1]), Some(4));
    }

    #[test_log::test]
    fn not_closed() {
        let perms: Vec<Vec<El>> = vec![vec![0, 1, 2], vec![1, 2, 0]];
        let result = generate_group(vec!["e", "r"], &perms);
        assert_eq!(
            result.unwrap_err(),
            Error::OperationNotClosed {
                left: 1,
                right: 1,
                image: vec![2, 0, 1],
            }
        );
    }

    #[test]
    fn labels_must_match_permutations() {
        let perms: Vec<Vec<El>> = vec![vec![0, 1], vec![1, 0]];
        assert_eq!(
            generate_group(vec!['e'], &perms).unwrap_err(),
            Error::LengthMismatch {
                elements: 1,
                table: 2
            }
        );
    }

    #[test]
    fn symmetric_group_on_three_points() {
        let perms: Vec<Vec<El>> = vec![
            vec![0, 1, 2],
            vec![1, 0, 2],
            vec![0, 2, 1],
            vec![2, 1, 0],
            vec![1, 2, 0],
            vec![2, 0, 1],
        ];
        let group = generate_group((0..6).collect(), &perms).unwrap();
        assert!(group.is_valid());
        assert_eq!(group.element_orders(), Some(&[1, 2, 2, 2, 3, 3][..]));
        assert_eq!(group.subgroups().len(), 4);
    }

    proptest! {
        #[test]
        fn cyclic_powers_form_a_group(perm in random_perm(1..9u32)) {
            let mut powers = vec![Perm::identity(perm.len())];
            loop {
                let next = perm.compose(&powers[powers.len() - 1]);
                if next == powers[0] {
                    break;
                }
                powers.push(next);
            }

            let group = generate_group(powers.clone(), &powers).unwrap();
            prop_assert!(group.is_valid());
            prop_assert!(group.is_cyclic());
            prop_assert_eq!(group.order_of(&perm), Some(powers.len()));
        }

        #[test]
        fn compose_with_inverse(perm in random_perm(0..100u32)) {
            let mut inverse = vec![0; perm.len()];
            for (i, &p_i) in perm.images().iter().enumerate() {
                inverse[p_i as usize] = i as El;
            }
            let inverse = Perm::from_vec(inverse).unwrap();

            prop_assert_eq!(perm.compose(&inverse), Perm::identity(perm.len()));
            prop_assert_eq!(inverse.compose(&perm), Perm::identity(perm.len()));
        }

        #[test]
        fn cycles_cover_support(perm in random_perm(0..100u32)) {
            let moved = (0..perm.len() as El).filter(|&el| perm.apply(el) != el).count();
            let in_cycles: usize = perm.cycles().iter().map(|c| c.len()).sum();
            prop_assert_eq!(moved, in_cycles);
        }
    }
}
