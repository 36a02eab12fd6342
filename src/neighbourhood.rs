//! Standard lattice neighbourhoods for any dimensionality.

use alloc::vec::Vec;

use crate::matrix::CellAddress;

/// Moore neighbourhood: every offset in `{-1, 0, 1}ᴰ` except the origin.
///
/// `3ᴰ − 1` addresses: 2 in 1-D, 8 in 2-D, 26 in 3-D.
pub fn moore<const D: usize>() -> Vec<CellAddress<D>> {
    let mut out = Vec::new();
    let mut offset = [-1i64; D];
    loop {
        if offset.iter().any(|&c| c != 0) {
            out.push(offset);
        }
        // odometer over -1..=1 per axis
        let mut axis = 0;
        while axis < D {
            if offset[axis] < 1 {
                offset[axis] += 1;
                break;
            }
            offset[axis] = -1;
            axis += 1;
        }
        if axis == D {
            return out;
        }
    }
}

/// Von Neumann neighbourhood: the `2·D` unit offsets `±eᵢ`.
pub fn von_neumann<const D: usize>() -> Vec<CellAddress<D>> {
    let mut out = Vec::with_capacity(2 * D);
    for axis in 0..D {
        for sign in [-1i64, 1] {
            let mut offset = [0i64; D];
            offset[axis] = sign;
            out.push(offset);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moore_sizes() {
        assert_eq!(moore::<1>().len(), 2);
        assert_eq!(moore::<2>().len(), 8);
        assert_eq!(moore::<3>().len(), 26);
    }

    #[test]
    fn test_moore_2d_contents() {
        let hood = moore::<2>();
        for x in -1..=1i64 {
            for y in -1..=1i64 {
                assert_eq!(hood.contains(&[x, y]), (x, y) != (0, 0));
            }
        }
    }

    #[test]
    fn test_von_neumann() {
        let hood = von_neumann::<3>();
        assert_eq!(hood.len(), 6);
        assert!(hood.contains(&[0, 0, -1]));
        assert!(hood.contains(&[1, 0, 0]));
        assert!(!hood.contains(&[1, 1, 0]));
    }
}
