//! Symmetry-transform closure engine.
//!
//! [`TransformClosure`] collects the matrices that map a universe's
//! neighbourhood onto itself. Each named generator is expanded into its full
//! cycle of powers. Cycles are then combined to discover every further
//! transform reachable by composition.
//!
//! # Telling transforms apart
//!
//! Two matrices count as the same operation iff they map the probe set
//! ([`crate::probe`]) to the same pattern. The probe image is the fingerprint:
//! every stored transform owns exactly one pattern, and the identity owns the
//! probe itself.
//!
//! # Expanding a generator
//!
//! A generator `M` is first checked against the neighbourhood and the known
//! fingerprints. Its powers `M, M², M³ …` are then walked alongside the probe
//! images they produce. The walk ends when the image returns to the probe,
//! and at that step the matrix power must be exactly `I`. That step number
//! is the cycle length `L`. Steps `1..L` are staged as they go and written
//! only after the walk closes, so a failure anywhere leaves nothing behind.
//!
//! A walk that runs past [`ClosureConfig::max_cycle_length`] fails with
//! [`TransformError::CycleNotClosed`]. So does a walk whose powers or images
//! overflow `i64`, since such a matrix cannot be of finite order within the
//! lattice.
//!
//! # Combining cycles
//!
//! One combination pass takes every stored transform `W` and every other
//! named cycle with generator `G`, and walks `G·W, G²·W …` through the cycle.
//! Each probe image not yet known becomes a composite, keyed by the set of
//! `(source, step)` paths that reached it. Composites are gathered in a
//! scratch map and written together once the pass has validated them all.
//! [`TransformClosure::generate_closure`] repeats passes until one finds
//! nothing new.
//!
//! # Invariants
//!
//! - `cycles` always holds `Identity → 0` and `patterns` always holds
//!   `probe → identity`.
//! - `index_to_transform` and `transform_to_index` are exact inverses.
//! - Every stored matrix maps the probe set to the pattern recorded for it.
//! - A call that returns `Err` leaves every map unchanged.

use alloc::collections::BTreeSet;
use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::cells::CellPattern;
use crate::error::TransformError;
use crate::matrix::Matrix;
use crate::probe::probe_set;
use crate::sequence::{CompositePath, CycleKey, CycleName, TransformSequence};
use crate::universe::Universe;

// ─── Config ─────────────────────────────────────────────────────────────────

/// Bounds on the closure engine's search loops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClosureConfig {
    /// Longest generator cycle accepted, in steps.
    /// Default: 10. Lattice symmetries in a handful of dimensions cycle well
    /// within this.
    pub max_cycle_length: u32,

    /// Combination passes [`TransformClosure::generate_closure`] may run
    /// before giving up.
    /// Default: 16.
    pub max_closure_passes: u32,
}

impl Default for ClosureConfig {
    fn default() -> Self {
        Self {
            max_cycle_length: 10,
            max_closure_passes: 16,
        }
    }
}

// ─── Transform Closure ──────────────────────────────────────────────────────

/// Registry of named transform cycles and their generated combinations.
#[derive(Clone, Debug)]
pub struct TransformClosure<K: CycleName, const D: usize> {
    universe: Arc<Universe<D>>,
    config: ClosureConfig,
    probe: CellPattern<D>,
    cycles: HashMap<CycleKey<K>, u32>,
    index_to_transform: HashMap<TransformSequence<K>, Matrix<D>>,
    transform_to_index: HashMap<Matrix<D>, TransformSequence<K>>,
    patterns: HashMap<CellPattern<D>, TransformSequence<K>>,
}

/// One transform ready to commit.
struct Staged<K, const D: usize> {
    index: TransformSequence<K>,
    matrix: Matrix<D>,
    pattern: CellPattern<D>,
}

/// A `(source, cycle step)` composition path.
type PathPair<K> = (TransformSequence<K>, TransformSequence<K>);

impl<K: CycleName, const D: usize> TransformClosure<K, D> {
    /// Empty engine with [`ClosureConfig::default`].
    pub fn new(universe: Arc<Universe<D>>) -> Self {
        Self::with_config(universe, ClosureConfig::default())
    }

    /// Empty engine with explicit search bounds.
    pub fn with_config(universe: Arc<Universe<D>>, config: ClosureConfig) -> Self {
        let probe = probe_set::<D>();
        let mut cycles = HashMap::new();
        cycles.insert(CycleKey::Identity, 0);
        let mut patterns = HashMap::new();
        patterns.insert(probe.clone(), TransformSequence::identity());
        Self {
            universe,
            config,
            probe,
            cycles,
            index_to_transform: HashMap::new(),
            transform_to_index: HashMap::new(),
            patterns,
        }
    }

    // ─── Queries ────────────────────────────────────────────────────────────

    /// Cycle lengths. Identity and composites are stored with length 0.
    pub fn cycles(&self) -> &HashMap<CycleKey<K>, u32> {
        &self.cycles
    }

    /// Every stored non-identity transform by index.
    pub fn index_to_transform(&self) -> &HashMap<TransformSequence<K>, Matrix<D>> {
        &self.index_to_transform
    }

    /// Inverse of [`index_to_transform`](Self::index_to_transform).
    pub fn transform_to_index(&self) -> &HashMap<Matrix<D>, TransformSequence<K>> {
        &self.transform_to_index
    }

    /// Probe images and the index that first produced each.
    pub fn patterns(&self) -> &HashMap<CellPattern<D>, TransformSequence<K>> {
        &self.patterns
    }

    /// The probe set used to fingerprint transforms.
    pub fn probe(&self) -> &CellPattern<D> {
        &self.probe
    }

    /// The shared universe.
    pub fn universe(&self) -> &Arc<Universe<D>> {
        &self.universe
    }

    /// Search bounds in force.
    pub fn config(&self) -> &ClosureConfig {
        &self.config
    }

    /// Length of a named cycle.
    pub fn cycle_length(&self, name: &K) -> Option<u32> {
        self.cycles.get(&CycleKey::Named(name.clone())).copied()
    }

    /// The matrix stored under `index`.
    pub fn transform(&self, index: &TransformSequence<K>) -> Option<&Matrix<D>> {
        self.index_to_transform.get(index)
    }

    /// Where `matrix` is stored, if anywhere.
    pub fn index_of(&self, matrix: &Matrix<D>) -> Option<&TransformSequence<K>> {
        self.transform_to_index.get(matrix)
    }

    /// Number of stored non-identity transforms.
    pub fn transform_count(&self) -> usize {
        self.index_to_transform.len()
    }

    /// Every stored matrix, without key information.
    ///
    /// Two engines holding the same group compare equal here regardless of
    /// the names and order their generators were registered under.
    pub fn transform_set(&self) -> BTreeSet<Matrix<D>> {
        self.index_to_transform.values().copied().collect()
    }

    fn image(&self, cells: &CellPattern<D>, matrix: &Matrix<D>) -> Option<CellPattern<D>> {
        self.universe.checked_cell_group_transform(cells.iter(), matrix)
    }

    fn named_cycles(&self) -> Vec<(K, u32)> {
        let mut named: Vec<(K, u32)> = self
            .cycles
            .iter()
            .filter_map(|(key, &length)| key.name().map(|name| (name.clone(), length)))
            .collect();
        named.sort();
        named
    }

    // ─── Generator cycles ───────────────────────────────────────────────────

    /// Register a generator and every power of it up to the identity.
    ///
    /// Returns the cycle length `L`: `Mᴸ = I`, with steps `1..L` stored.
    /// All steps are staged first and committed only once the cycle closes.
    pub fn add_transform_cycle<R: AsRef<[i64]>>(
        &mut self,
        name: K,
        generator_rows: &[R],
    ) -> Result<u32, TransformError<K>> {
        let generator = self.universe.validate_matrix(generator_rows)?;
        let hood = self.universe.neighbourhood();
        let image = self.image(hood, &generator).ok_or_else(|| TransformError::Overflow {
            index: TransformSequence::base(name.clone()),
            matrix: generator.to_rows_vec(),
        })?;
        if image != *hood {
            return Err(TransformError::NotAutomorphism {
                matrix: generator.to_rows_vec(),
                image: image.to_rows_vec(),
            });
        }
        let not_closed = |name: &K| TransformError::CycleNotClosed {
            name: name.clone(),
            steps: self.config.max_cycle_length,
            matrix: generator.to_rows_vec(),
        };
        let first = self.image(&self.probe, &generator).ok_or_else(|| not_closed(&name))?;
        if first == self.probe {
            return Err(TransformError::IdentityEquivalent { matrix: generator.to_rows_vec() });
        }
        if self.cycles.contains_key(&CycleKey::Named(name.clone())) {
            return Err(TransformError::DuplicateCycle { name });
        }
        let base = TransformSequence::base(name.clone());
        if self.index_to_transform.contains_key(&base) {
            return Err(TransformError::BaseIndexInUse { index: base });
        }
        if let Some(existing) = self.transform_to_index.get(&generator) {
            return Err(TransformError::MatrixRegistered {
                name,
                existing: existing.clone(),
                matrix: generator.to_rows_vec(),
            });
        }
        if let Some(existing) = self.patterns.get(&first) {
            return Err(TransformError::EquivalentRegistered {
                name,
                existing: existing.clone(),
                matrix: generator.to_rows_vec(),
            });
        }

        let identity = Matrix::identity();
        let mut staged: Vec<Staged<K, D>> = Vec::new();
        let mut staged_patterns: HashMap<CellPattern<D>, TransformSequence<K>> = HashMap::new();
        let mut staged_matrices: HashMap<Matrix<D>, TransformSequence<K>> = HashMap::new();
        let mut index = base;
        let mut power = identity;
        let mut pattern = first;
        let length = loop {
            if index.step() > self.config.max_cycle_length {
                return Err(not_closed(&name));
            }
            power = generator.checked_compose(&power).ok_or_else(|| not_closed(&name))?;
            if pattern == self.probe {
                if power != identity {
                    return Err(TransformError::ClosureMismatch {
                        name,
                        steps: index.step(),
                        matrix: power.to_rows_vec(),
                    });
                }
                break index.step();
            }
            if let Some(existing) =
                self.patterns.get(&pattern).or_else(|| staged_patterns.get(&pattern))
            {
                return Err(TransformError::PatternCollision { index, existing: existing.clone() });
            }
            if power == identity {
                return Err(TransformError::PrematureIdentity { index });
            }
            if self.image(&self.probe, &power).as_ref() != Some(&pattern) {
                return Err(TransformError::CompositionMismatch {
                    index,
                    matrix: power.to_rows_vec(),
                });
            }
            if let Some(existing) =
                self.transform_to_index.get(&power).or_else(|| staged_matrices.get(&power))
            {
                return Err(TransformError::TransformCollision {
                    index,
                    existing: existing.clone(),
                    matrix: power.to_rows_vec(),
                });
            }
            if self.index_to_transform.contains_key(&index) {
                return Err(TransformError::IndexInUse { index });
            }
            trace!(cycle = ?name, step = index.step(), "staged cycle step");
            staged_patterns.insert(pattern.clone(), index.clone());
            staged_matrices.insert(power, index.clone());
            let next_pattern = self.image(&pattern, &generator).ok_or_else(|| not_closed(&name))?;
            let next_index = index.next().ok_or_else(|| not_closed(&name))?;
            staged.push(Staged { index, matrix: power, pattern });
            pattern = next_pattern;
            index = next_index;
        };

        debug!(cycle = ?name, length, stored = staged.len(), "transform cycle committed");
        self.cycles.insert(CycleKey::Named(name), length);
        self.commit(staged);
        Ok(length)
    }

    fn commit(&mut self, staged: Vec<Staged<K, D>>) {
        for Staged { index, matrix, pattern } in staged {
            self.patterns.insert(pattern, index.clone());
            self.transform_to_index.insert(matrix, index.clone());
            self.index_to_transform.insert(index, matrix);
        }
    }

    // ─── Combinations ───────────────────────────────────────────────────────

    /// One combination pass: apply every other cycle's powers after every
    /// known transform and register each newly reached pattern.
    ///
    /// Returns the number of composites added. Safe to call repeatedly; a
    /// pass that reaches nothing new adds nothing.
    pub fn generate_combination_transforms(&mut self) -> Result<usize, TransformError<K>> {
        if self.index_to_transform.is_empty() {
            return Err(TransformError::NoTransforms);
        }
        let named = self.named_cycles();
        if let [(only, _)] = named.as_slice() {
            return Err(TransformError::SingleCycle { name: only.clone() });
        }

        let mut combinations: HashMap<CellPattern<D>, (Matrix<D>, BTreeSet<PathPair<K>>)> =
            HashMap::new();
        for (source_pattern, source) in &self.patterns {
            if source.is_identity() {
                continue;
            }
            let source_matrix = self
                .index_to_transform
                .get(source)
                .ok_or_else(|| TransformError::MissingTransform { index: source.clone() })?;
            for (name, length) in &named {
                if *length < 2 || source.cycle().name() == Some(name) {
                    continue;
                }
                let base = TransformSequence::base(name.clone());
                let generator = self
                    .index_to_transform
                    .get(&base)
                    .ok_or_else(|| TransformError::MissingTransform { index: base.clone() })?;
                let mut work_pattern = source_pattern.clone();
                let mut work = *source_matrix;
                let overflow = || TransformError::Overflow {
                    index: source.clone(),
                    matrix: generator.to_rows_vec(),
                };
                for step in 1..*length {
                    work_pattern = self.image(&work_pattern, generator).ok_or_else(overflow)?;
                    work = generator.checked_compose(&work).ok_or_else(overflow)?;
                    if self.patterns.contains_key(&work_pattern) {
                        continue;
                    }
                    if let Some(existing) = self.transform_to_index.get(&work) {
                        return Err(TransformError::CompositeTransformInUse {
                            existing: existing.clone(),
                            matrix: work.to_rows_vec(),
                        });
                    }
                    if self.image(&self.probe, &work).as_ref() != Some(&work_pattern) {
                        return Err(TransformError::CompositionMismatch {
                            index: source.clone(),
                            matrix: work.to_rows_vec(),
                        });
                    }
                    let via = TransformSequence::new(CycleKey::Named(name.clone()), step)?;
                    let (matrix, paths) = combinations
                        .entry(work_pattern.clone())
                        .or_insert_with(|| (work, BTreeSet::new()));
                    if *matrix != work {
                        return Err(TransformError::CompositeDivergence {
                            source_index: source.clone(),
                            matrix: work.to_rows_vec(),
                        });
                    }
                    paths.insert((source.clone(), via));
                }
            }
        }

        let mut staged = Vec::with_capacity(combinations.len());
        for (pattern, (matrix, paths)) in combinations {
            let path = CompositePath::from(paths);
            let index = TransformSequence::composite(path.clone());
            if self.cycles.contains_key(&CycleKey::Composite(path))
                || self.index_to_transform.contains_key(&index)
            {
                return Err(TransformError::CompositeKeyInUse { index });
            }
            if let Some(existing) = self.transform_to_index.get(&matrix) {
                return Err(TransformError::CompositeTransformInUse {
                    existing: existing.clone(),
                    matrix: matrix.to_rows_vec(),
                });
            }
            if let Some(existing) = self.patterns.get(&pattern) {
                return Err(TransformError::CompositePatternInUse { existing: existing.clone() });
            }
            staged.push(Staged { index, matrix, pattern });
        }

        let added = staged.len();
        for entry in &staged {
            if let CycleKey::Composite(path) = entry.index.cycle() {
                debug!(matrix = ?entry.matrix.rows(), paths = path.len(), "composite transform found");
                self.cycles.insert(CycleKey::Composite(path.clone()), 0);
            }
        }
        self.commit(staged);
        Ok(added)
    }

    /// Run combination passes until one finds nothing new.
    ///
    /// Returns the total number of composites added. On failure, including
    /// running out of passes, the engine is restored to its state before the
    /// call.
    pub fn generate_closure(&mut self) -> Result<usize, TransformError<K>> {
        let saved = self.clone();
        let mut total = 0;
        for pass in 1..=self.config.max_closure_passes {
            let added = match self.generate_combination_transforms() {
                Ok(added) => added,
                Err(err) => {
                    *self = saved;
                    return Err(err);
                }
            };
            debug!(pass, added, total = self.transform_count(), "closure pass");
            if added == 0 {
                return Ok(total);
            }
            total += added;
        }
        let passes = self.config.max_closure_passes;
        *self = saved;
        Err(TransformError::ClosureNotReached { passes })
    }
}
