//! Finite groups given by Cayley tables.
use std::fmt;

use approx::AbsDiffEq;
use itertools::Itertools;
use num_integer::Integer;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::equality::{Equivalence, Exact};
use crate::error::{Diagnostic, Error};
use crate::table::{build_from_operation, build_with_tolerance};
use crate::Table;

/// Structure that is only defined when the table describes a group.
#[derive(Clone, Debug)]
struct Structure {
    orders: Vec<usize>,
    generators: Vec<usize>,
}

/// A finite set of elements together with a Cayley table.
///
/// Construction checks the group axioms that can be read off the table: a (right) identity,
/// closure and an inverse for every element. Associativity is not checked, it is assumed to follow
/// from how the table was produced.
///
/// A `Group` is also returned for tables that fail the checks. In that case [`is_valid`] is false
/// and only the axiom flags and the raw table are available; element orders and generators are
/// only computed for valid groups.
///
/// All derived data is computed once during construction.
///
/// [`is_valid`]: Group::is_valid
#[derive(Clone, Debug)]
pub struct Group<T> {
    elements: Vec<T>,
    table: Table<T>,
    // Index into `elements` of every table cell, `None` for cells that are not an element.
    products: Vec<Vec<Option<usize>>>,
    identity: Option<usize>,
    closed: bool,
    invertible: bool,
    structure: Option<Structure>,
    diagnostics: Vec<Diagnostic>,
}

impl<T: Clone + PartialEq> Group<T> {
    /// Build the table by applying `op` to every ordered pair of elements.
    ///
    /// Results that are not among `elements` make the group fail the closure check.
    pub fn from_operation<F>(elements: Vec<T>, op: F) -> Group<T>
    where
        F: FnMut(&T, &T) -> T,
    {
        let table = build_from_operation(&elements, op);
        Group::from_square_table(elements, table, &Exact)
    }

    /// Use a table given in `table[a][b]` layout.
    ///
    /// See [`transpose`][crate::table::transpose] for tables written as `[row][column]`.
    pub fn from_cayley_table(elements: Vec<T>, table: Table<T>) -> Result<Group<T>, Error> {
        Group::from_cayley_table_with(elements, table, &Exact)
    }

    /// Build the table by applying `op` to every ordered pair of elements, replacing each result
    /// by the first element within `tolerance` of it.
    ///
    /// Fails with [`Error::NoMatchingElement`] when a result is not close to any element.
    pub fn from_operation_with_tolerance<U, F>(
        elements: Vec<T>,
        op: F,
        tolerance: T::Epsilon,
    ) -> Result<Group<T>, Error>
    where
        T: AbsDiffEq<U>,
        T::Epsilon: Clone,
        F: FnMut(&T, &T) -> U,
    {
        let table = build_with_tolerance(&elements, op, tolerance)?;
        Ok(Group::from_square_table(elements, table, &Exact))
    }
}

impl<T: Clone> Group<T> {
    /// Use a table given in `table[a][b]` layout, deciding membership of table cells with
    /// `equivalence`.
    pub fn from_cayley_table_with<Q>(
        elements: Vec<T>,
        table: Table<T>,
        equivalence: &Q,
    ) -> Result<Group<T>, Error>
    where
        Q: Equivalence<T> + ?Sized,
    {
        if table.len() != elements.len() {
            return Err(Error::LengthMismatch {
                elements: elements.len(),
                table: table.len(),
            });
        }
        if let Some((row, products)) = table
            .iter()
            .enumerate()
            .find(|(_, products)| products.len() != elements.len())
        {
            return Err(Error::NotSquare {
                row,
                len: products.len(),
                expected: elements.len(),
            });
        }
        Ok(Group::from_square_table(elements, table, equivalence))
    }

    fn from_square_table<Q>(elements: Vec<T>, table: Table<T>, equivalence: &Q) -> Group<T>
    where
        Q: Equivalence<T> + ?Sized,
    {
        let products = table
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| elements.iter().position(|el| equivalence.equivalent(el, cell)))
                    .collect()
            })
            .collect();
        Group::from_products(elements, table, products)
    }

    /// All proper, non-trivial subgroups.
    ///
    /// This is a brute force search over all subsets whose size divides the group order (by
    /// Lagrange's theorem no other sizes can occur). The trivial subgroup and the group itself
    /// are not included. Subgroups are returned by increasing size, subsets of the same size in
    /// lexicographic order of element indices.
    ///
    /// The search is exponential in the group order and only practical for small groups.
    pub fn subgroups(&self) -> Vec<Group<T>> {
        let order = self.order();
        let mut subgroups = vec![];

        for size in 1..=Integer::div_ceil(&order, &2) {
            if !Integer::is_multiple_of(&order, &size) {
                continue;
            }
            log::debug!("searching subgroups of size {} out of {}", size, order);

            for subset in (0..order).combinations(size) {
                if size == 1 && Some(subset[0]) == self.identity {
                    continue;
                }
                let candidate = self.restrict(&subset);
                if candidate.is_valid() {
                    log::trace!("found subgroup {:?}", subset);
                    subgroups.push(candidate);
                }
            }
        }

        subgroups
    }

    /// The table restricted to a subset of element indices.
    fn restrict(&self, subset: &[usize]) -> Group<T> {
        let elements = subset.iter().map(|&a| self.elements[a].clone()).collect();
        let table = subset
            .iter()
            .map(|&a| subset.iter().map(|&b| self.table[a][b].clone()).collect())
            .collect();
        let products = subset
            .iter()
            .map(|&a| {
                subset
                    .iter()
                    .map(|&b| {
                        self.products[a][b].and_then(|p| subset.iter().position(|&el| el == p))
                    })
                    .collect()
            })
            .collect();
        Group::from_products(elements, table, products)
    }
}

impl<T> Group<T> {
    fn from_products(
        elements: Vec<T>,
        table: Table<T>,
        products: Vec<Vec<Option<usize>>>,
    ) -> Group<T> {
        let mut group = Group {
            elements,
            table,
            products,
            identity: None,
            closed: false,
            invertible: false,
            structure: None,
            diagnostics: vec![],
        };

        group.identity = group.find_identity();
        group.closed = group.products.iter().flatten().all(Option::is_some);
        group.invertible = match group.identity {
            Some(identity) => group
                .products
                .iter()
                .all(|row| row.contains(&Some(identity))),
            None => false,
        };

        if let Some(identity) = group.identity.filter(|_| group.closed && group.invertible) {
            group.structure = Some(group.derive_structure(identity));
        }

        group
    }

    /// The first element whose column reproduces the element sequence.
    fn find_identity(&self) -> Option<usize> {
        (0..self.order()).find(|&e| (0..self.order()).all(|a| self.products[a][e] == Some(a)))
    }

    fn derive_structure(&mut self, identity: usize) -> Structure {
        let mut orders = Vec::with_capacity(self.order());
        for el in 0..self.order() {
            let order = match self.order_walk(el, identity) {
                Ok(order) => order,
                Err(diagnostic) => {
                    log::warn!("{:?}: the table is probably not associative", diagnostic);
                    let Diagnostic::InconsistentOrderWalk { steps, .. } = diagnostic;
                    self.diagnostics.push(diagnostic);
                    steps
                }
            };
            orders.push(order);
        }

        let generators = (0..self.order())
            .filter(|&el| orders[el] == self.order())
            .collect();

        Structure { orders, generators }
    }

    /// Multiply `el` by itself on the right until the identity is reached.
    fn order_walk(&self, el: usize, identity: usize) -> Result<usize, Diagnostic> {
        let mut power = el;
        let mut steps = 1;
        while power != identity {
            steps += 1;
            match self.products[power][el] {
                Some(next) if next != el && steps <= self.order() => power = next,
                _ => return Err(Diagnostic::InconsistentOrderWalk { element: el, steps }),
            }
        }
        Ok(steps)
    }

    /// Number of elements.
    pub fn order(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// The table in `table[a][b]` layout.
    pub fn table(&self) -> &[Vec<T>] {
        &self.table
    }

    pub fn identity(&self) -> Option<&T> {
        self.identity.map(|e| &self.elements[e])
    }

    pub fn identity_index(&self) -> Option<usize> {
        self.identity
    }

    /// Whether every table cell is an element.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether every row of the table contains the identity.
    pub fn is_invertible(&self) -> bool {
        self.invertible
    }

    /// Whether there is an identity, the table is closed and every element has an inverse.
    pub fn is_valid(&self) -> bool {
        self.structure.is_some()
    }

    /// Order of each element, in element sequence order. `None` for invalid groups.
    pub fn element_orders(&self) -> Option<&[usize]> {
        self.structure.as_ref().map(|s| &s.orders[..])
    }

    /// Elements generating the whole group. `None` for invalid groups.
    pub fn generators(&self) -> Option<Vec<&T>> {
        self.structure
            .as_ref()
            .map(|s| s.generators.iter().map(|&el| &self.elements[el]).collect())
    }

    /// Whether the group is valid and generated by a single element.
    pub fn is_cyclic(&self) -> bool {
        self.structure
            .as_ref()
            .map_or(false, |s| !s.generators.is_empty())
    }

    /// Whether the table is closed and symmetric.
    pub fn is_abelian(&self) -> bool {
        self.closed
            && (0..self.order())
                .all(|a| (a..self.order()).all(|b| self.products[a][b] == self.products[b][a]))
    }

    /// Non-fatal conditions noticed while deriving the group structure.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl<T: PartialEq> Group<T> {
    pub fn index_of(&self, el: &T) -> Option<usize> {
        self.elements.iter().position(|x| x == el)
    }

    /// The table cell for `a` operating on `b`.
    pub fn product(&self, a: &T, b: &T) -> Option<&T> {
        Some(&self.table[self.index_of(a)?][self.index_of(b)?])
    }

    /// Order of a single element. `None` for invalid groups or unknown elements.
    pub fn order_of(&self, el: &T) -> Option<usize> {
        let index = self.index_of(el)?;
        self.element_orders().map(|orders| orders[index])
    }

    /// The element `y` with `el * y` equal to the identity.
    pub fn inverse(&self, el: &T) -> Option<&T> {
        let identity = self.identity?;
        let inverse = self.products[self.index_of(el)?]
            .iter()
            .position(|&p| p == Some(identity))?;
        Some(&self.elements[inverse])
    }

    /// A power of an element.
    ///
    /// Negative exponents are powers of the inverse. The exponent is reduced modulo the order of
    /// the element, so this takes at most that many table lookups. `None` for invalid groups or
    /// unknown elements.
    pub fn pow<E>(&self, el: &T, exponent: E) -> Option<&T>
    where
        E: Integer + ToPrimitive + FromPrimitive,
    {
        let base = self.index_of(el)?;
        let order = self.element_orders()?[base];
        let reduced = exponent.mod_floor(&E::from_usize(order)?).to_usize()?;

        let mut power = self.identity?;
        for _ in 0..reduced {
            power = self.products[power][base]?;
        }
        Some(&self.elements[power])
    }
}

impl<T> Group<T>
where
    T: fmt::Display + Clone,
{
    fn format_table(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut rows = vec![];
        rows.push(
            std::iter::once(".".to_string())
                .chain(self.elements.iter().map(|el| el.to_string()))
                .collect::<Vec<_>>(),
        );
        // Rows list the second operand, columns the first.
        for (b, el) in self.elements.iter().enumerate() {
            rows.push(
                std::iter::once(el.to_string())
                    .chain(self.table.iter().map(|products| products[b].to_string()))
                    .collect(),
            );
        }
        format_rows(f, &rows)
    }
}

fn format_rows(f: &mut fmt::Formatter, rows: &[Vec<String>]) -> fmt::Result {
    let width = rows.iter().flatten().map(|s| s.chars().count()).max();
    let width = width.unwrap_or(0);
    for row in rows {
        let line = row.iter().map(|s| format!("{:>1$}", s, width)).join(" ");
        writeln!(f, "{}", line)?;
    }
    Ok(())
}

fn format_list<'a, T: fmt::Display + 'a>(items: impl IntoIterator<Item = &'a T>) -> String {
    format!("[{}]", items.into_iter().join(", "))
}

impl<T> fmt::Display for Group<T>
where
    T: fmt::Display + Clone + PartialEq,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let structure = match self.structure {
            Some(ref structure) => structure,
            None => {
                writeln!(f, "Not a group")?;
                writeln!(f, "Closed: {}", self.closed)?;
                writeln!(f, "Invertible: {}", self.invertible)?;
                match self.identity() {
                    Some(identity) => writeln!(f, "Identity: {}", identity)?,
                    None => writeln!(f, "Identity: none")?,
                }
                return self.format_table(f);
            }
        };

        writeln!(f, "Group of order {}", self.order())?;
        if let Some(identity) = self.identity() {
            writeln!(f, "Identity: {}", identity)?;
        }
        self.format_table(f)?;

        let orders: Vec<String> = std::iter::once("order".to_string())
            .chain(structure.orders.iter().map(|o| o.to_string()))
            .collect();
        let inverses: Vec<String> = std::iter::once("inverse".to_string())
            .chain(self.elements.iter().map(|el| match self.inverse(el) {
                Some(inverse) => inverse.to_string(),
                None => "-".to_string(),
            }))
            .collect();
        let header: Vec<String> = std::iter::once("element".to_string())
            .chain(self.elements.iter().map(|el| el.to_string()))
            .collect();
        format_rows(f, &[header, orders, inverses])?;

        writeln!(
            f,
            "Generators: {}",
            format_list(structure.generators.iter().map(|&el| &self.elements[el]))
        )?;
        writeln!(f, "Cyclic: {}", self.is_cyclic())?;
        writeln!(f, "Subgroups:")?;
        for subgroup in self.subgroups() {
            writeln!(f, "{}", format_list(subgroup.elements()))?;
        }
        Ok(())
    }
}
