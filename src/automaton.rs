//! A running automaton: shared universe, its symmetry closure, and the
//! current generation of living cells.

use alloc::sync::Arc;
use alloc::vec::Vec;

use tracing::debug;

use crate::cells::{self, CellGroup, CellPattern};
use crate::closure::{ClosureConfig, TransformClosure};
use crate::error::{TransformError, UniverseError};
use crate::matrix::CellAddress;
use crate::sequence::CycleName;
use crate::universe::Universe;

/// Living cells evolving under one [`Universe`].
///
/// Starts empty at iteration 0.
#[derive(Clone, Debug)]
pub struct Automaton<K: CycleName, const D: usize> {
    universe: Arc<Universe<D>>,
    transforms: TransformClosure<K, D>,
    generation: CellGroup<D>,
    iteration: u64,
}

impl<K: CycleName, const D: usize> Automaton<K, D> {
    /// Empty automaton with the default closure bounds.
    pub fn new(universe: Arc<Universe<D>>) -> Self {
        Self::with_config(universe, ClosureConfig::default())
    }

    /// Empty automaton with explicit closure bounds.
    pub fn with_config(universe: Arc<Universe<D>>, config: ClosureConfig) -> Self {
        Self {
            transforms: TransformClosure::with_config(Arc::clone(&universe), config),
            universe,
            generation: CellGroup::new(),
            iteration: 0,
        }
    }

    /// Add one living cell. Returns `false` when it was already alive.
    pub fn merge_cell(&mut self, address: &[i64]) -> Result<bool, UniverseError> {
        let cell = self.universe.validate_address(address)?;
        Ok(self.generation.insert(cell))
    }

    /// Add several living cells.
    ///
    /// Every address is validated before any is inserted. Returns the number
    /// of cells that were not already alive.
    pub fn merge_cells<I, A>(&mut self, addresses: I) -> Result<usize, UniverseError>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<[i64]>,
    {
        let cells: Vec<CellAddress<D>> = addresses
            .into_iter()
            .map(|address| self.universe.validate_address(address.as_ref()))
            .collect::<Result<_, _>>()?;
        let before = self.generation.len();
        self.generation.extend(cells);
        Ok(self.generation.len() - before)
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        self.generation = self.universe.step(&self.generation);
        self.iteration += 1;
        debug!(iteration = self.iteration, population = self.generation.len(), "generation");
    }

    /// Advance `count` generations.
    pub fn steps(&mut self, count: u64) {
        for _ in 0..count {
            self.step();
        }
    }

    // ─── Transforms ─────────────────────────────────────────────────────────

    /// Register a symmetry generator cycle. See
    /// [`TransformClosure::add_transform_cycle`].
    pub fn add_transform<R: AsRef<[i64]>>(
        &mut self,
        name: K,
        rows: &[R],
    ) -> Result<u32, TransformError<K>> {
        self.transforms.add_transform_cycle(name, rows)
    }

    /// One combination pass over the registered cycles.
    pub fn generate_combinations(&mut self) -> Result<usize, TransformError<K>> {
        self.transforms.generate_combination_transforms()
    }

    /// The symmetry closure engine.
    pub fn transforms(&self) -> &TransformClosure<K, D> {
        &self.transforms
    }

    // ─── Properties ─────────────────────────────────────────────────────────

    /// Snapshot of the living cells.
    pub fn generation(&self) -> CellPattern<D> {
        CellPattern::from(&self.generation)
    }

    /// The living cells, unordered.
    pub fn generation_cells(&self) -> &CellGroup<D> {
        &self.generation
    }

    /// Generations stepped so far.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Override the iteration counter.
    pub fn set_iteration(&mut self, iteration: u64) {
        self.iteration = iteration;
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.generation.len()
    }

    /// Coordinates per address.
    pub fn dimensions(&self) -> usize {
        self.universe.dimensions()
    }

    /// Neighbour offsets.
    pub fn neighbourhood(&self) -> &CellPattern<D> {
        self.universe.neighbourhood()
    }

    /// Neighbours per cell.
    pub fn neighbourhood_size(&self) -> usize {
        self.universe.neighbourhood_population()
    }

    /// Bounding box of the living cells, `None` when empty.
    pub fn generation_extent(&self) -> Option<(CellAddress<D>, CellAddress<D>)> {
        cells::extent(self.generation.iter())
    }

    /// The shared universe.
    pub fn universe(&self) -> &Arc<Universe<D>> {
        &self.universe
    }
}
