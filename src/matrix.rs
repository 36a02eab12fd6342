//! Integer cell addresses and square transform matrices.
//!
//! A [`Matrix`] acts on a [`CellAddress`] by row·vector dot products, so
//! applying `m` to `v` is the standard product `m·v`. Composition follows the
//! same convention: [`Matrix::compose`] returns `self·rhs`, the transform that
//! applies `rhs` first and `self` second.
//!
//! Entries are arbitrary `i64`, so products can leave the representable
//! range. [`Matrix::checked_apply`] and [`Matrix::checked_compose`] report that
//! as `None`; [`Matrix::apply`] and [`Matrix::compose`] wrap.

use alloc::vec::Vec;

/// A cell location: one integer coordinate per universe dimension.
pub type CellAddress<const D: usize> = [i64; D];

/// Dot product of two equal-length integer vectors, `None` on overflow.
pub fn dot<const D: usize>(a: &[i64; D], b: &[i64; D]) -> Option<i64> {
    a.iter()
        .zip(b.iter())
        .try_fold(0i64, |sum, (x, y)| sum.checked_add(x.checked_mul(*y)?))
}

fn wrapping_dot<const D: usize>(a: &[i64; D], b: &[i64; D]) -> i64 {
    a.iter()
        .zip(b.iter())
        .fold(0i64, |sum, (x, y)| sum.wrapping_add(x.wrapping_mul(*y)))
}

/// Square `D`×`D` integer matrix, stored row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Matrix<const D: usize> {
    rows: [[i64; D]; D],
}

impl<const D: usize> Matrix<D> {
    /// Wrap `D` rows of `D` coordinates.
    pub const fn from_rows(rows: [[i64; D]; D]) -> Self {
        Self { rows }
    }

    /// The identity matrix.
    pub fn identity() -> Self {
        let mut rows = [[0i64; D]; D];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 1;
        }
        Self { rows }
    }

    /// Reflection across the hyperplane orthogonal to `axis`.
    ///
    /// Returns `None` when `axis >= D`.
    pub fn reflection(axis: usize) -> Option<Self> {
        if axis >= D {
            return None;
        }
        let mut m = Self::identity();
        m.rows[axis][axis] = -1;
        Some(m)
    }

    /// Quarter turn in the plane spanned by axes `from` and `to`, carrying
    /// the `from` unit vector onto the `to` unit vector.
    ///
    /// In 2-D, `quarter_turn(0, 1)` is `((0, -1), (1, 0))`. Returns `None` for
    /// equal or out-of-range axes.
    pub fn quarter_turn(from: usize, to: usize) -> Option<Self> {
        if from == to || from >= D || to >= D {
            return None;
        }
        let mut m = Self::identity();
        m.rows[from][from] = 0;
        m.rows[to][to] = 0;
        m.rows[to][from] = 1;
        m.rows[from][to] = -1;
        Some(m)
    }

    /// Borrow the rows.
    pub fn rows(&self) -> &[[i64; D]; D] {
        &self.rows
    }

    /// Copy the rows into plain vectors, for reporting.
    pub fn to_rows_vec(&self) -> Vec<Vec<i64>> {
        self.rows.iter().map(|row| row.to_vec()).collect()
    }

    /// `true` when this is the identity matrix.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Transform a vector: `self·v`, or `None` if a coordinate overflows.
    pub fn checked_apply(&self, v: &CellAddress<D>) -> Option<CellAddress<D>> {
        let mut out = [0i64; D];
        for (o, row) in out.iter_mut().zip(self.rows.iter()) {
            *o = dot(row, v)?;
        }
        Some(out)
    }

    /// Transform a vector: `self·v`, wrapping on overflow.
    pub fn apply(&self, v: &CellAddress<D>) -> CellAddress<D> {
        let mut out = [0i64; D];
        for (o, row) in out.iter_mut().zip(self.rows.iter()) {
            *o = wrapping_dot(row, v);
        }
        out
    }

    /// Standard matrix product `self·rhs`, or `None` if an entry overflows.
    ///
    /// `C[i][j] = Σₖ self[i][k] · rhs[k][j]`, computed as each row of `self`
    /// against each row of `rhsᵗ`.
    pub fn checked_compose(&self, rhs: &Self) -> Option<Self> {
        let columns = rhs.transpose();
        let mut rows = [[0i64; D]; D];
        for (out_row, row) in rows.iter_mut().zip(self.rows.iter()) {
            for (c, column) in out_row.iter_mut().zip(columns.rows.iter()) {
                *c = dot(row, column)?;
            }
        }
        Some(Self { rows })
    }

    /// Standard matrix product `self·rhs`, wrapping on overflow.
    pub fn compose(&self, rhs: &Self) -> Self {
        let columns = rhs.transpose();
        let mut rows = [[0i64; D]; D];
        for (out_row, row) in rows.iter_mut().zip(self.rows.iter()) {
            for (c, column) in out_row.iter_mut().zip(columns.rows.iter()) {
                *c = wrapping_dot(row, column);
            }
        }
        Self { rows }
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        let mut rows = [[0i64; D]; D];
        for (i, row) in self.rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                rows[j][i] = value;
            }
        }
        Self { rows }
    }

    /// Determinant, by fraction-free (Bareiss) elimination.
    ///
    /// Symmetry transforms of a lattice neighbourhood have determinant ±1.
    /// `None` when the result or an intermediate does not fit.
    pub fn determinant(&self) -> Option<i64> {
        if D == 0 {
            return Some(1);
        }
        let mut m = [[0i128; D]; D];
        for (dst, src) in m.iter_mut().zip(self.rows.iter()) {
            for (d, &s) in dst.iter_mut().zip(src.iter()) {
                *d = i128::from(s);
            }
        }
        let mut sign: i128 = 1;
        let mut previous: i128 = 1;
        for k in 0..D {
            if m[k][k] == 0 {
                match (k + 1..D).find(|&i| m[i][k] != 0) {
                    Some(pivot) => {
                        m.swap(k, pivot);
                        sign = -sign;
                    }
                    None => return Some(0),
                }
            }
            for i in k + 1..D {
                for j in k + 1..D {
                    let cross = m[i][j]
                        .checked_mul(m[k][k])?
                        .checked_sub(m[i][k].checked_mul(m[k][j])?)?;
                    m[i][j] = cross.checked_div(previous)?;
                }
            }
            previous = m[k][k];
        }
        i64::try_from(sign.checked_mul(m[D - 1][D - 1])?).ok()
    }
}

impl<const D: usize> From<[[i64; D]; D]> for Matrix<D> {
    fn from(rows: [[i64; D]; D]) -> Self {
        Self::from_rows(rows)
    }
}
