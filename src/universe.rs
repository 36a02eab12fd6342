//! Immutable automaton configuration: neighbourhood, propagation rules and
//! the geometry helpers that act on cells and transform matrices.
//!
//! A [`Universe`] is validated once at construction and never changes. The
//! engine and the automaton share one instance through `Arc`.
//!
//! # Invariants
//!
//! - The neighbourhood holds at least 2 distinct addresses, never the origin,
//!   and is symmetric: for every member `n`, `-n` is also a member.
//! - Rule counts are unique and lie in `0..=|neighbourhood|`.
//! - Birth never includes 0.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use tracing::trace;

use crate::cells::{self, CellGroup, CellPattern};
use crate::error::{RuleKind, UniverseError};
use crate::matrix::{CellAddress, Matrix};
use crate::rule::RuleSpec;

/// Angle comparisons in the rotation check tolerate this many degrees.
const ANGLE_EPSILON: f64 = 1e-9;

/// Neighbourhood plus survival and birth rules for a `D`-dimensional lattice.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Universe<const D: usize> {
    neighbourhood: CellPattern<D>,
    survival: BTreeSet<usize>,
    birth: BTreeSet<usize>,
}

impl<const D: usize> Universe<D> {
    /// Validate and build a universe.
    ///
    /// Neighbourhood addresses are raw coordinate slices, each checked against
    /// `D`. Checks run in a fixed order so the first failure is reported:
    /// dimensionality, uniqueness, population, origin, symmetry, then the
    /// survival and birth counts.
    pub fn new<I, A, S, B>(neighbourhood: I, survival: S, birth: B) -> Result<Self, UniverseError>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<[i64]>,
        S: IntoIterator<Item = usize>,
        B: IntoIterator<Item = usize>,
    {
        if D == 0 {
            return Err(UniverseError::NoCoordinates);
        }
        let supplied: Vec<CellAddress<D>> = neighbourhood
            .into_iter()
            .map(|address| to_address::<D>(address.as_ref()))
            .collect::<Result<_, _>>()?;
        let hood: CellPattern<D> = supplied.iter().copied().collect();
        if hood.len() != supplied.len() {
            return Err(UniverseError::DuplicateNeighbour {
                supplied: supplied.len(),
                unique: hood.len(),
            });
        }
        if hood.len() < 2 {
            return Err(UniverseError::TooFewNeighbours { count: hood.len() });
        }
        if hood.contains(&[0; D]) {
            return Err(UniverseError::OriginInNeighbourhood);
        }
        for address in &hood {
            let mirror = address.map(|c| -c);
            if !hood.contains(&mirror) {
                return Err(UniverseError::AsymmetricNeighbour { address: address.to_vec() });
            }
        }

        let population = hood.len();
        let survival = rule_set(RuleKind::Survival, survival, population)?;
        let birth = rule_set(RuleKind::Birth, birth, population)?;
        if birth.contains(&0) {
            return Err(UniverseError::ZeroBirthCount);
        }
        Ok(Self { neighbourhood: hood, survival, birth })
    }

    /// Build a universe from a `B…/S…` rulestring.
    pub fn from_rulestring<I, A>(neighbourhood: I, rulestring: &str) -> Result<Self, UniverseError>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<[i64]>,
    {
        let rule: RuleSpec = rulestring.parse()?;
        Self::new(neighbourhood, rule.survival, rule.birth)
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    /// Number of coordinates per address.
    pub fn dimensions(&self) -> usize {
        D
    }

    /// Offsets from a cell to each of its neighbours.
    pub fn neighbourhood(&self) -> &CellPattern<D> {
        &self.neighbourhood
    }

    /// Number of neighbours each cell has.
    pub fn neighbourhood_population(&self) -> usize {
        self.neighbourhood.len()
    }

    /// Live neighbour counts that keep a cell alive.
    pub fn survival_rules(&self) -> &BTreeSet<usize> {
        &self.survival
    }

    /// Live neighbour counts that spawn a new cell.
    pub fn birth_rules(&self) -> &BTreeSet<usize> {
        &self.birth
    }

    /// The `D`×`D` identity matrix.
    pub fn identity_matrix(&self) -> Matrix<D> {
        Matrix::identity()
    }

    /// The rules as a [`RuleSpec`], counts ascending.
    pub fn rule_spec(&self) -> RuleSpec {
        RuleSpec {
            birth: self.birth.iter().copied().collect(),
            survival: self.survival.iter().copied().collect(),
        }
    }

    // ─── Addresses and matrices ─────────────────────────────────────────────

    /// Every neighbour address of `address`. Neighbours beyond the `i64`
    /// lattice do not exist.
    pub fn neighbours(&self, address: &CellAddress<D>) -> CellPattern<D> {
        cells::translate(self.neighbourhood.iter(), address)
    }

    /// Check a raw coordinate slice and convert it to an address.
    pub fn validate_address(&self, address: &[i64]) -> Result<CellAddress<D>, UniverseError> {
        to_address(address)
    }

    /// `true` when `address` has exactly one coordinate per dimension.
    pub fn is_universe_address(&self, address: &[i64]) -> bool {
        address.len() == D
    }

    /// Check raw rows and convert them to a matrix.
    ///
    /// Each row must be a universe address and there must be `D` rows.
    pub fn validate_matrix<R: AsRef<[i64]>>(&self, rows: &[R]) -> Result<Matrix<D>, UniverseError> {
        let mut out = [[0i64; D]; D];
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != D {
                return Err(UniverseError::MatrixRowWidth {
                    row: index,
                    expected: D,
                    actual: row.len(),
                });
            }
        }
        if rows.len() != D {
            return Err(UniverseError::MatrixRowCount { expected: D, rows: rows.len() });
        }
        for (dst, row) in out.iter_mut().zip(rows.iter()) {
            dst.copy_from_slice(row.as_ref());
        }
        Ok(Matrix::from_rows(out))
    }

    /// Transform one vector: `matrix·vector`. Coordinates wrap on overflow;
    /// see [`Matrix::checked_apply`].
    pub fn vector_dot_product(&self, vector: &CellAddress<D>, matrix: &Matrix<D>) -> CellAddress<D> {
        matrix.apply(vector)
    }

    /// Transform every cell; addresses that coincide collapse.
    pub fn cell_group_transform<'a, I>(&self, cells: I, matrix: &Matrix<D>) -> CellPattern<D>
    where
        I: IntoIterator<Item = &'a CellAddress<D>>,
    {
        cells.into_iter().map(|cell| matrix.apply(cell)).collect()
    }

    /// Transform every cell, or `None` if any image leaves the `i64` lattice.
    pub fn checked_cell_group_transform<'a, I>(
        &self,
        cells: I,
        matrix: &Matrix<D>,
    ) -> Option<CellPattern<D>>
    where
        I: IntoIterator<Item = &'a CellAddress<D>>,
    {
        cells.into_iter().map(|cell| matrix.checked_apply(cell)).collect()
    }

    /// Move every cell by `offset`. Cells pushed off the lattice are dropped.
    pub fn cell_group_translate<'a, I>(&self, cells: I, offset: &CellAddress<D>) -> CellPattern<D>
    where
        I: IntoIterator<Item = &'a CellAddress<D>>,
    {
        cells::translate(cells, offset)
    }

    /// Compose two transforms: the product `a·b`, which applies `b` first.
    /// Entries wrap on overflow; see [`Matrix::checked_compose`].
    pub fn matrix_transform(&self, a: &Matrix<D>, b: &Matrix<D>) -> Matrix<D> {
        a.compose(b)
    }

    /// Check whether raw rows form a 2-D rotation about the origin.
    ///
    /// Structurally invalid rows are an error. Any other dimensionality, and
    /// any entry outside `[-1, 1]`, is simply not a rotation.
    pub fn is_rotation_matrix<R: AsRef<[i64]>>(&self, rows: &[R]) -> Result<bool, UniverseError> {
        let matrix = self.validate_matrix(rows)?;
        if D != 2 {
            return Ok(false);
        }
        let flat: Vec<f64> = matrix.rows().iter().flatten().map(|&v| v as f64).collect();
        let [m00, m01, m10, m11] = flat.as_slice() else {
            return Ok(false);
        };
        if flat.iter().any(|v| libm::fabs(*v) > 1.0) {
            return Ok(false);
        }
        let degrees = |radians: f64| radians.to_degrees();
        let diagonal = (degrees(libm::acos(*m00)), degrees(libm::acos(*m11)));
        let off_diagonal = (degrees(libm::asin(-*m01)), degrees(libm::asin(*m10)));
        let same = |a: f64, b: f64| libm::fabs(a - b) < ANGLE_EPSILON;
        let (high, low) = if diagonal.0 >= off_diagonal.0 {
            (diagonal.0, off_diagonal.0)
        } else {
            (off_diagonal.0, diagonal.0)
        };
        Ok(same(diagonal.0, diagonal.1)
            && same(off_diagonal.0, off_diagonal.1)
            && (same(diagonal.0, off_diagonal.0) || same(high - 180.0, low)))
    }

    // ─── Propagation ────────────────────────────────────────────────────────

    fn live_neighbours(&self, address: &CellAddress<D>, cells: &CellGroup<D>) -> usize {
        self.neighbourhood
            .iter()
            .filter_map(|offset| cells::offset_address(address, offset))
            .filter(|neighbour| cells.contains(neighbour))
            .count()
    }

    /// Compute the next generation. `cells` is left untouched.
    ///
    /// A living cell survives when its live neighbour count is a survival
    /// count. Every empty neighbour of a living cell is a birth candidate and
    /// comes alive when its live neighbour count is a birth count.
    pub fn step(&self, cells: &CellGroup<D>) -> CellGroup<D> {
        let mut next = CellGroup::new();
        let mut candidates = CellGroup::new();
        for cell in cells {
            if self.survival.contains(&self.live_neighbours(cell, cells)) {
                next.insert(*cell);
            }
            candidates.extend(self.neighbours(cell).iter().filter(|n| !cells.contains(*n)));
        }
        let survivors = next.len();
        for candidate in &candidates {
            if self.birth.contains(&self.live_neighbours(candidate, cells)) {
                next.insert(*candidate);
            }
        }
        trace!(
            living = cells.len(),
            survivors,
            candidates = candidates.len(),
            born = next.len() - survivors,
            "universe step"
        );
        next
    }
}

fn to_address<const D: usize>(address: &[i64]) -> Result<CellAddress<D>, UniverseError> {
    address.try_into().map_err(|_| UniverseError::DimensionMismatch {
        expected: D,
        actual: address.len(),
    })
}

fn rule_set<I>(rule: RuleKind, counts: I, population: usize) -> Result<BTreeSet<usize>, UniverseError>
where
    I: IntoIterator<Item = usize>,
{
    let supplied: Vec<usize> = counts.into_iter().collect();
    let unique: BTreeSet<usize> = supplied.iter().copied().collect();
    if unique.len() != supplied.len() {
        return Err(UniverseError::DuplicateRuleCount {
            rule,
            supplied: supplied.len(),
            unique: unique.len(),
        });
    }
    if let Some(&count) = unique.iter().find(|&&c| c > population) {
        return Err(UniverseError::RuleCountOutOfRange { rule, count, population });
    }
    Ok(unique)
}
