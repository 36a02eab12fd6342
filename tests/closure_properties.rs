//! Property-based tests for matrix composition and the closure engine.
//!
//! Generators are drawn from the symmetries of the square and registered in
//! random subsets and orders; the engine's invariants must hold regardless.

use std::sync::Arc;

use proptest::prelude::*;
use ndlife_core::neighbourhood::moore;
use ndlife_core::{Matrix, TransformClosure, Universe};

// =============================================================================
// Helpers
// =============================================================================

const GENERATORS: [(&str, [[i64; 2]; 2]); 4] = [
    ("rotate90", [[0, -1], [1, 0]]),
    ("horizontal", [[-1, 0], [0, 1]]),
    ("vertical", [[1, 0], [0, -1]]),
    ("diagonal", [[0, 1], [1, 0]]),
];

fn life() -> Arc<Universe<2>> {
    Arc::new(Universe::new(moore::<2>(), [2, 3], [3]).unwrap())
}

fn generators() -> impl Strategy<Value = Vec<(&'static str, [[i64; 2]; 2])>> {
    proptest::sample::subsequence(GENERATORS.to_vec(), 1..=4).prop_shuffle()
}

fn small_matrix() -> impl Strategy<Value = [[i64; 2]; 2]> {
    prop::array::uniform2(prop::array::uniform2(-9i64..=9))
}

fn unit_matrix() -> impl Strategy<Value = [[i64; 2]; 2]> {
    prop::array::uniform2(prop::array::uniform2(-1i64..=1))
}

fn bijective(engine: &TransformClosure<&'static str, 2>) -> bool {
    engine.index_to_transform().len() == engine.transform_to_index().len()
        && engine
            .index_to_transform()
            .iter()
            .all(|(index, matrix)| engine.index_of(matrix) == Some(index))
}

// =============================================================================
// Composition Properties
// =============================================================================

proptest! {
    /// I·X = X = X·I
    #[test]
    fn prop_identity_composition(rows in small_matrix()) {
        let universe = life();
        let x = Matrix::from_rows(rows);
        let i = universe.identity_matrix();
        prop_assert_eq!(universe.matrix_transform(&i, &x), x);
        prop_assert_eq!(universe.matrix_transform(&x, &i), x);
    }

    /// (a·b)·c = a·(b·c)
    #[test]
    fn prop_composition_associative(a in small_matrix(), b in small_matrix(), c in small_matrix()) {
        let (a, b, c) = (Matrix::from_rows(a), Matrix::from_rows(b), Matrix::from_rows(c));
        prop_assert_eq!(a.compose(&b).compose(&c), a.compose(&b.compose(&c)));
    }

    /// det(a·b) = det(a)·det(b)
    #[test]
    fn prop_determinant_multiplicative(a in small_matrix(), b in small_matrix()) {
        let (a, b) = (Matrix::from_rows(a), Matrix::from_rows(b));
        let product = a.determinant().zip(b.determinant()).map(|(x, y)| x * y);
        prop_assert_eq!(a.compose(&b).determinant(), product);
    }
}

// =============================================================================
// Closure Properties
// =============================================================================

proptest! {
    /// Any registration order of any generator subset keeps the maps inverse
    /// and every stored matrix faithful to its pattern.
    #[test]
    fn prop_registration_keeps_invariants(chosen in generators()) {
        let mut engine = TransformClosure::new(life());
        for (name, rows) in &chosen {
            let length = engine.add_transform_cycle(*name, rows).unwrap();
            prop_assert_eq!(engine.cycle_length(name), Some(length));
        }
        if chosen.len() >= 2 {
            engine.generate_closure().unwrap();
        }
        prop_assert!(bijective(&engine));
        for (pattern, index) in engine.patterns() {
            if index.is_identity() {
                continue;
            }
            let matrix = engine.transform(index).unwrap();
            let image = engine.universe().cell_group_transform(engine.probe().iter(), matrix);
            prop_assert_eq!(&image, pattern);
        }
    }

    /// The closed group depends only on which generators were chosen.
    #[test]
    fn prop_closure_independent_of_order(chosen in generators()) {
        prop_assume!(chosen.len() >= 2);
        let mut shuffled = TransformClosure::new(life());
        for (name, rows) in &chosen {
            shuffled.add_transform_cycle(*name, rows).unwrap();
        }
        shuffled.generate_closure().unwrap();

        let mut sorted_chosen = chosen.clone();
        sorted_chosen.sort();
        let mut sorted = TransformClosure::new(life());
        for (name, rows) in &sorted_chosen {
            sorted.add_transform_cycle(*name, rows).unwrap();
        }
        sorted.generate_closure().unwrap();

        prop_assert_eq!(shuffled.transform_set(), sorted.transform_set());
        prop_assert!(shuffled.transform_set().len() <= 7);
    }

    /// A rejected candidate leaves the engine exactly as it was.
    #[test]
    fn prop_failed_registration_is_atomic(rows in unit_matrix()) {
        let mut engine = TransformClosure::new(life());
        engine.add_transform_cycle("rotate90", &GENERATORS[0].1).unwrap();
        let cycles = engine.cycles().clone();
        let forward = engine.index_to_transform().clone();
        let patterns = engine.patterns().clone();
        if engine.add_transform_cycle("candidate", &rows).is_err() {
            prop_assert_eq!(engine.cycles(), &cycles);
            prop_assert_eq!(engine.index_to_transform(), &forward);
            prop_assert_eq!(engine.patterns(), &patterns);
        }
        prop_assert!(bijective(&engine));
    }
}
