//! Working and snapshot cell sets.
//!
//! [`CellGroup`] is the mutable working set used while stepping a generation.
//! [`CellPattern`] is the immutable snapshot: ordered, hashable and usable as
//! a map key, so two transforms can be compared by the pattern they produce.

use alloc::collections::btree_set::{self, BTreeSet};

use crate::matrix::CellAddress;

/// Mutable, unordered set of living cells.
pub type CellGroup<const D: usize> = hashbrown::HashSet<CellAddress<D>>;

/// Immutable snapshot of a set of cell addresses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPattern<const D: usize> {
    cells: BTreeSet<CellAddress<D>>,
}

impl<const D: usize> CellPattern<D> {
    /// An empty pattern.
    pub fn new() -> Self {
        Self { cells: BTreeSet::new() }
    }

    /// Number of distinct addresses.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` when the pattern holds no addresses.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `true` when `address` is part of the pattern.
    pub fn contains(&self, address: &CellAddress<D>) -> bool {
        self.cells.contains(address)
    }

    /// Addresses in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, CellAddress<D>> {
        self.cells.iter()
    }

    /// Copy into a working set.
    pub fn to_group(&self) -> CellGroup<D> {
        self.cells.iter().copied().collect()
    }

    /// Copy the addresses into plain vectors, for reporting.
    pub fn to_rows_vec(&self) -> alloc::vec::Vec<alloc::vec::Vec<i64>> {
        self.cells.iter().map(|cell| cell.to_vec()).collect()
    }
}

impl<const D: usize> FromIterator<CellAddress<D>> for CellPattern<D> {
    fn from_iter<I: IntoIterator<Item = CellAddress<D>>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

impl<'a, const D: usize> IntoIterator for &'a CellPattern<D> {
    type Item = &'a CellAddress<D>;
    type IntoIter = btree_set::Iter<'a, CellAddress<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl<const D: usize> From<&CellGroup<D>> for CellPattern<D> {
    fn from(group: &CellGroup<D>) -> Self {
        group.iter().copied().collect()
    }
}

/// Bounding box of a set of cells: `(minimum corner, maximum corner)`.
///
/// Returns `None` for an empty set.
pub fn extent<'a, const D: usize, I>(cells: I) -> Option<(CellAddress<D>, CellAddress<D>)>
where
    I: IntoIterator<Item = &'a CellAddress<D>>,
{
    let mut iter = cells.into_iter();
    let first = iter.next()?;
    let (mut low, mut high) = (*first, *first);
    for cell in iter {
        for d in 0..D {
            low[d] = low[d].min(cell[d]);
            high[d] = high[d].max(cell[d]);
        }
    }
    Some((low, high))
}

/// `address + offset`, or `None` when a coordinate leaves the `i64` lattice.
pub fn offset_address<const D: usize>(
    address: &CellAddress<D>,
    offset: &CellAddress<D>,
) -> Option<CellAddress<D>> {
    let mut moved = *address;
    for (m, o) in moved.iter_mut().zip(offset.iter()) {
        *m = m.checked_add(*o)?;
    }
    Some(moved)
}

/// Move every cell by `offset`. Cells that would leave the lattice are dropped.
pub fn translate<'a, const D: usize, I>(cells: I, offset: &CellAddress<D>) -> CellPattern<D>
where
    I: IntoIterator<Item = &'a CellAddress<D>>,
{
    cells
        .into_iter()
        .filter_map(|cell| offset_address(cell, offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_collapses_duplicates_and_orders() {
        let p: CellPattern<2> = [[1, 0], [0, 0], [1, 0]].into_iter().collect();
        assert_eq!(p.len(), 2);
        let ordered: alloc::vec::Vec<_> = p.iter().copied().collect();
        assert_eq!(ordered, alloc::vec![[0, 0], [1, 0]]);
    }

    #[test]
    fn test_pattern_equality_ignores_insertion_order() {
        let a: CellPattern<2> = [[3, 4], [-1, 2]].into_iter().collect();
        let b: CellPattern<2> = [[-1, 2], [3, 4]].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_extent() {
        let cells = [[0, 5], [-3, 2], [4, -1]];
        assert_eq!(extent(cells.iter()), Some(([-3, -1], [4, 5])));
        let none: [[i64; 2]; 0] = [];
        assert_eq!(extent(none.iter()), None);
    }

    #[test]
    fn test_translate() {
        let cells = [[0, 0], [1, 0]];
        let moved = translate(cells.iter(), &[2, -3]);
        let expected: CellPattern<2> = [[2, -3], [3, -3]].into_iter().collect();
        assert_eq!(moved, expected);
    }

    #[test]
    fn test_translate_drops_cells_off_the_lattice() {
        let cells = [[i64::MAX, 0], [0, 0]];
        let moved = translate(cells.iter(), &[1, 0]);
        let expected: CellPattern<2> = [[1, 0]].into_iter().collect();
        assert_eq!(moved, expected);
        assert_eq!(offset_address(&[i64::MIN, 5], &[-1, 0]), None);
        assert_eq!(offset_address(&[i64::MIN, 5], &[1, -5]), Some([i64::MIN + 1, 0]));
    }

    #[test]
    fn test_group_round_trip() {
        let mut group = CellGroup::<2>::new();
        group.insert([1, 1]);
        group.insert([2, 2]);
        let pattern = CellPattern::from(&group);
        assert_eq!(pattern.to_group(), group);
    }
}
