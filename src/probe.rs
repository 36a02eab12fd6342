//! Probe Set Builder: the canonical fingerprint used to tell transforms apart.
//!
//! Two matrices are treated as the same symmetry operation iff they map the
//! probe set to the same [`CellPattern`]. Prime coordinates make accidental
//! coincidences between distinct transforms impossible for the small integer
//! matrices that act on a lattice neighbourhood.

use crate::cells::CellPattern;
use crate::matrix::CellAddress;

/// The first sixteen primes, in ascending order.
pub const PROBE_PRIMES: [i64; 16] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];

/// Chunk [`PROBE_PRIMES`] into `⌊16 / D⌋` consecutive `D`-tuples.
///
/// Leftover primes are dropped. Empty when `D == 0` or `D > 16`.
pub fn probe_set<const D: usize>() -> CellPattern<D> {
    if D == 0 {
        return CellPattern::new();
    }
    PROBE_PRIMES
        .chunks_exact(D)
        .map(|chunk| {
            let mut cell: CellAddress<D> = [0; D];
            cell.copy_from_slice(chunk);
            cell
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_1d_uses_every_prime() {
        let probe = probe_set::<1>();
        assert_eq!(probe.len(), 16);
        assert!(probe.contains(&[2]));
        assert!(probe.contains(&[53]));
    }

    #[test]
    fn test_probe_2d() {
        let probe = probe_set::<2>();
        assert_eq!(probe.len(), 8);
        assert!(probe.contains(&[2, 3]));
        assert!(probe.contains(&[5, 7]));
        assert!(probe.contains(&[47, 53]));
        assert!(!probe.contains(&[3, 5]));
    }

    #[test]
    fn test_probe_drops_leftover_primes() {
        let probe = probe_set::<3>();
        let expected: CellPattern<3> = [
            [2, 3, 5],
            [7, 11, 13],
            [17, 19, 23],
            [29, 31, 37],
            [41, 43, 47],
        ]
        .into_iter()
        .collect();
        assert_eq!(probe, expected);
        assert!(!probe.iter().any(|cell| cell.contains(&53)));
    }

    #[test]
    fn test_probe_degenerate_dimensions() {
        assert!(probe_set::<0>().is_empty());
        assert_eq!(probe_set::<16>().len(), 1);
        assert!(probe_set::<17>().is_empty());
    }
}
