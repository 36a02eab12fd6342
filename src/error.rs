//! Error types for universe construction, rulestrings and the transform closure.
//!
//! Every variant carries the data needed to build a precise diagnostic:
//! expected against actual dimension, the offending address or count, the
//! matrix that failed a check and the index it collided with.

use alloc::string::String;
use alloc::vec::Vec;

use crate::sequence::TransformSequence;

/// Which of the two propagation rules a count belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Neighbour counts that keep a living cell alive.
    Survival,
    /// Neighbour counts that spawn a cell into an empty address.
    Birth,
}

impl core::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Survival => f.write_str("survival"),
            Self::Birth => f.write_str("birth"),
        }
    }
}

/// Failure parsing a `B…/S…` rulestring.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleParseError {
    /// The string has no `B` section.
    #[error("rulestring {0:?} has no birth (B) section")]
    MissingBirth(String),

    /// The string has no `S` section.
    #[error("rulestring {0:?} has no survival (S) section")]
    MissingSurvival(String),

    /// A section started with something other than `B` or `S`, or repeated one.
    #[error("unexpected rulestring section {0:?}")]
    UnexpectedSection(String),

    /// A neighbour count could not be read as an unsigned integer.
    #[error("invalid neighbour count {0:?}")]
    InvalidCount(String),
}

/// Failure constructing a [`Universe`](crate::universe::Universe) or validating
/// an address or matrix against it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UniverseError {
    /// The universe would have zero dimensions.
    #[error("universe addresses need at least one coordinate")]
    NoCoordinates,

    /// An address does not have one coordinate per universe dimension.
    #[error("address has {actual} coordinates, universe has {expected} dimensions")]
    DimensionMismatch {
        /// Universe dimensionality.
        expected: usize,
        /// Coordinates supplied.
        actual: usize,
    },

    /// The neighbourhood repeats an address.
    #[error("neighbourhood addresses are not unique: {supplied} supplied, {unique} unique")]
    DuplicateNeighbour {
        /// Addresses supplied.
        supplied: usize,
        /// Distinct addresses among them.
        unique: usize,
    },

    /// Fewer than two neighbours cannot be symmetric.
    #[error("neighbourhood holds {count} addresses; at least 2 are required")]
    TooFewNeighbours {
        /// Distinct addresses supplied.
        count: usize,
    },

    /// The origin is listed as its own neighbour.
    #[error("the universe origin is not a valid neighbourhood address")]
    OriginInNeighbourhood,

    /// A neighbour whose mirror image through the origin is missing.
    #[error("neighbour {address:?} has no symmetric address in the neighbourhood")]
    AsymmetricNeighbour {
        /// The neighbour without a counterpart.
        address: Vec<i64>,
    },

    /// A rule lists the same count twice.
    #[error("{rule} rule counts are not unique: {supplied} supplied, {unique} unique")]
    DuplicateRuleCount {
        /// The offending rule.
        rule: RuleKind,
        /// Counts supplied.
        supplied: usize,
        /// Distinct counts among them.
        unique: usize,
    },

    /// A rule count larger than the neighbourhood.
    #[error("{rule} rule count {count} is not between 0 and {population}")]
    RuleCountOutOfRange {
        /// The offending rule.
        rule: RuleKind,
        /// The count.
        count: usize,
        /// Neighbourhood population.
        population: usize,
    },

    /// Zero-neighbour births would fill the whole empty universe.
    #[error("zero is not a valid birth rule count")]
    ZeroBirthCount,

    /// A matrix whose row count differs from the universe dimensionality.
    #[error("matrix contains {rows} rows, universe has {expected} dimensions")]
    MatrixRowCount {
        /// Universe dimensionality.
        expected: usize,
        /// Rows supplied.
        rows: usize,
    },

    /// A matrix row that is not a universe address.
    #[error("matrix row {row} has {actual} coordinates, universe has {expected} dimensions")]
    MatrixRowWidth {
        /// Zero-based row index.
        row: usize,
        /// Universe dimensionality.
        expected: usize,
        /// Coordinates in the row.
        actual: usize,
    },

    /// The rulestring could not be parsed.
    #[error(transparent)]
    Rule(#[from] RuleParseError),
}

/// Failure registering or combining symmetry transforms.
///
/// Generic over the caller's cycle name so payloads keep typed keys. Matrices
/// and patterns are carried as plain rows for reporting.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransformError<K> {
    /// The raw matrix is structurally invalid for the universe.
    #[error(transparent)]
    Universe(#[from] UniverseError),

    /// A step number that does not fit the cycle kind.
    #[error("step {step} is not valid for a {kind} cycle")]
    InvalidStep {
        /// Human readable cycle kind.
        kind: &'static str,
        /// The rejected step.
        step: u32,
    },

    /// Transforming the neighbourhood did not reproduce it.
    #[error("transformation of neighbourhood with {matrix:?} is not the neighbourhood: {image:?}")]
    NotAutomorphism {
        /// The candidate matrix.
        matrix: Vec<Vec<i64>>,
        /// Neighbourhood image under the matrix.
        image: Vec<Vec<i64>>,
    },

    /// Applying the matrix pushes a coordinate past the `i64` range.
    #[error("{index:?} transform {matrix:?} overflows the lattice coordinates")]
    Overflow {
        /// The index being checked or the source being extended.
        index: TransformSequence<K>,
        /// The matrix applied.
        matrix: Vec<Vec<i64>>,
    },

    /// The matrix leaves the probe set unchanged.
    #[error("transform {matrix:?} matches the identity matrix")]
    IdentityEquivalent {
        /// The candidate matrix.
        matrix: Vec<Vec<i64>>,
    },

    /// A cycle with this name already exists.
    #[error("cycle identifier {name:?} already in use")]
    DuplicateCycle {
        /// The repeated name.
        name: K,
    },

    /// The generator index for this name is already stored.
    #[error("base cycle index {index:?} already in use")]
    BaseIndexInUse {
        /// The occupied index.
        index: TransformSequence<K>,
    },

    /// The exact matrix is already stored under another index.
    #[error("{name:?} transform matches {existing:?}: {matrix:?}")]
    MatrixRegistered {
        /// The requested cycle name.
        name: K,
        /// Where the matrix is stored.
        existing: TransformSequence<K>,
        /// The matrix.
        matrix: Vec<Vec<i64>>,
    },

    /// A different matrix with the same probe pattern is already stored.
    #[error("{name:?} transform {matrix:?} produces the same pattern as {existing:?}")]
    EquivalentRegistered {
        /// The requested cycle name.
        name: K,
        /// Index producing the same pattern.
        existing: TransformSequence<K>,
        /// The matrix.
        matrix: Vec<Vec<i64>>,
    },

    /// A cycle step reproduced an already known pattern.
    #[error("pattern for {index:?} matches {existing:?}")]
    PatternCollision {
        /// The step being expanded.
        index: TransformSequence<K>,
        /// Index that first produced the pattern.
        existing: TransformSequence<K>,
    },

    /// A matrix power became the identity before the pattern cycled.
    #[error("transformation for {index:?} matches the identity matrix")]
    PrematureIdentity {
        /// The step being expanded.
        index: TransformSequence<K>,
    },

    /// A composed matrix does not reproduce the pattern built by stepwise application.
    #[error("{index:?} transform {matrix:?} does not produce the same result as its sequential operations")]
    CompositionMismatch {
        /// The index or first composition path involved.
        index: TransformSequence<K>,
        /// The composed matrix.
        matrix: Vec<Vec<i64>>,
    },

    /// A composed matrix is already stored under another index.
    #[error("index {existing:?} already matches transform {matrix:?} needed by {index:?}")]
    TransformCollision {
        /// The step being expanded.
        index: TransformSequence<K>,
        /// Where the matrix is stored.
        existing: TransformSequence<K>,
        /// The matrix.
        matrix: Vec<Vec<i64>>,
    },

    /// A cycle step index is already stored.
    #[error("cycle index {index:?} already in use")]
    IndexInUse {
        /// The occupied index.
        index: TransformSequence<K>,
    },

    /// The generator did not return to the probe set within the step bound.
    #[error("cycle {name:?} did not wrap to the beginning within {steps} steps starting from {matrix:?}")]
    CycleNotClosed {
        /// The cycle name.
        name: K,
        /// The step bound.
        steps: u32,
        /// The generator.
        matrix: Vec<Vec<i64>>,
    },

    /// The pattern cycled but the accumulated matrix is not the identity.
    #[error("pattern for {name:?} ended at step {steps} before transform cycled: {matrix:?}")]
    ClosureMismatch {
        /// The cycle name.
        name: K,
        /// Steps taken.
        steps: u32,
        /// The accumulated matrix.
        matrix: Vec<Vec<i64>>,
    },

    /// Combination requested before any transform was added.
    #[error("no transforms have been added yet; nothing to base generated transforms on")]
    NoTransforms,

    /// Combination requested with a single cycle.
    #[error("only a single transform cycle {name:?} exists; nothing to base combinations on")]
    SingleCycle {
        /// The only cycle.
        name: K,
    },

    /// A new pattern was reached with a matrix that is already stored.
    #[error("new pattern with old transform {matrix:?} (stored at {existing:?})")]
    CompositeTransformInUse {
        /// Where the matrix is stored.
        existing: TransformSequence<K>,
        /// The matrix.
        matrix: Vec<Vec<i64>>,
    },

    /// Two composition paths reach one pattern with different matrices.
    #[error("existing pattern reached with new transform {matrix:?} from {source_index:?}")]
    CompositeDivergence {
        /// Source of the diverging path.
        source_index: TransformSequence<K>,
        /// The diverging matrix.
        matrix: Vec<Vec<i64>>,
    },

    /// A generated composite key is already a cycle key or index.
    #[error("generated combined key already in use: {index:?}")]
    CompositeKeyInUse {
        /// The generated index.
        index: TransformSequence<K>,
    },

    /// A generated composite pattern is already known.
    #[error("generated pattern already in use by {existing:?}")]
    CompositePatternInUse {
        /// Index that produced the pattern.
        existing: TransformSequence<K>,
    },

    /// A stored pattern has no stored matrix.
    #[error("no transform stored for {index:?}")]
    MissingTransform {
        /// The dangling index.
        index: TransformSequence<K>,
    },

    /// Repeated combination passes kept finding new transforms.
    #[error("closure still growing after {passes} combination passes")]
    ClosureNotReached {
        /// Passes run.
        passes: u32,
    },
}
