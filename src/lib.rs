//! # ndlife-core
//!
//! N-dimensional life-like cellular automata, and the symmetry group of their
//! neighbourhoods.
//!
//! ---
//!
//! A [`Universe`] fixes the rules: which offsets count as neighbours and which
//! live-neighbour counts keep a cell alive or spawn a new one. Conway's Life is
//! the 2-D Moore neighbourhood under `B3/S23`; the same machinery runs in one
//! dimension or in six.
//!
//! The rotations and reflections that map the neighbourhood onto itself leave
//! the rules unchanged, so a pattern and its mirror image evolve identically.
//! [`TransformClosure`] finds that symmetry group: register a few generator
//! matrices and it expands each into its cycle of powers, then combines cycles
//! until every reachable transform is known. Matrices are told apart by the
//! pattern they produce from a fixed set of prime-coordinate probe cells.
//!
//! ## The pipeline
//!
//! ```text
//! neighbourhood + RuleSpec → Universe ──Arc──┬──→ Automaton (generation, iteration)
//!                                             │          ↑
//!                 generators ──→ TransformClosure ───────┘
//!                                  └─ cycles → combinations → closure
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`matrix`] | [`Matrix`], [`CellAddress`] | Integer vectors and square matrices: apply, compose, transpose, determinant |
//! | [`cells`] | [`CellPattern`], [`CellGroup`] | Hashable snapshot and mutable working cell sets |
//! | [`neighbourhood`] | [`neighbourhood::moore`] | Moore and von Neumann neighbourhoods for any dimension |
//! | [`rule`] | [`RuleSpec`] | `B…/S…` rulestring parsing and rendering |
//! | [`universe`] | [`Universe`] | Validated configuration, neighbour lookup, one generation step |
//! | [`probe`] | [`probe::probe_set`] | Prime-coordinate fingerprint set |
//! | [`sequence`] | [`TransformSequence`], [`CycleKey`], [`CompositePath`] | Keys for stored transforms |
//! | [`closure`] | [`TransformClosure`], [`ClosureConfig`] | Generator cycles, combinations and full group closure |
//! | [`automaton`] | [`Automaton`] | Living generation driven by a shared universe |
//! | [`error`] | [`UniverseError`], [`TransformError`] | Structured failures |
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use ndlife_core::{neighbourhood, Automaton, Universe};
//!
//! let universe = Universe::<2>::from_rulestring(neighbourhood::moore::<2>(), "B3/S23").unwrap();
//! let mut life: Automaton<&str, 2> = Automaton::new(Arc::new(universe));
//! life.merge_cells([[0i64, 0], [1, 0], [2, 0]]).unwrap();
//! life.step();
//! assert!(life.generation().contains(&[1, -1]));
//! assert!(life.generation().contains(&[1, 1]));
//! ```
//!
//! ## `no_std`
//!
//! The crate is `#![no_std]` by default and needs only `alloc`. The `std`
//! feature switches `thiserror` and `tracing` to their `std` builds.
//!
//! ## License
//!
//! Business Source License 1.1.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod matrix;
pub mod cells;
pub mod neighbourhood;
pub mod rule;
pub mod universe;
pub mod probe;
pub mod sequence;
pub mod closure;
pub mod automaton;
pub mod error;

pub use automaton::Automaton;
pub use cells::{CellGroup, CellPattern};
pub use closure::{ClosureConfig, TransformClosure};
pub use error::{RuleKind, RuleParseError, TransformError, UniverseError};
pub use matrix::{CellAddress, Matrix};
pub use rule::RuleSpec;
pub use sequence::{CompositePath, CycleKey, CycleName, TransformSequence};
pub use universe::Universe;
