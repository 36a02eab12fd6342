//! Keys for stored transforms.
//!
//! A [`TransformSequence`] names one stored matrix: the cycle it belongs to
//! plus the step within that cycle. Generated composites are keyed by every
//! composition path that reaches them, collected into an order-independent
//! [`CompositePath`].

use alloc::collections::btree_set::{self, BTreeSet};
use core::fmt::Debug;
use core::hash::Hash;

use crate::error::TransformError;

/// Bound for caller-supplied cycle names.
///
/// Blanket-implemented for every type that is cloneable, hashable, ordered
/// and printable: `&'static str`, `String`, integers, small enums.
pub trait CycleName: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> CycleName for T {}

// ─── Cycle Key ──────────────────────────────────────────────────────────────

/// Which cycle a transform belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CycleKey<K> {
    /// The identity sentinel.
    Identity,
    /// A generator cycle registered by the caller.
    Named(K),
    /// A transform discovered by combining cycles.
    Composite(CompositePath<K>),
}

impl<K> CycleKey<K> {
    /// Short label used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Named(_) => "named",
            Self::Composite(_) => "composite",
        }
    }

    /// The caller's name, for a named cycle.
    pub fn name(&self) -> Option<&K> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }
}

// ─── Transform Sequence ─────────────────────────────────────────────────────

/// `(cycle, step)` index of a stored transform.
///
/// Identity is always step 0, named cycles count from 1 (the generator itself)
/// and composites are stored at step 1.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransformSequence<K> {
    cycle: CycleKey<K>,
    step: u32,
}

impl<K: CycleName> TransformSequence<K> {
    /// Build an index, checking the step against the cycle kind.
    pub fn new(cycle: CycleKey<K>, step: u32) -> Result<Self, TransformError<K>> {
        let valid = match cycle {
            CycleKey::Identity => step == 0,
            CycleKey::Named(_) => step >= 1,
            CycleKey::Composite(_) => step == 1,
        };
        if !valid {
            return Err(TransformError::InvalidStep { kind: cycle.kind(), step });
        }
        Ok(Self { cycle, step })
    }

    /// The identity sentinel `(Identity, 0)`.
    pub fn identity() -> Self {
        Self { cycle: CycleKey::Identity, step: 0 }
    }

    /// Step 1 of a named cycle: the generator.
    pub fn base(name: K) -> Self {
        Self { cycle: CycleKey::Named(name), step: 1 }
    }

    /// The stored index of a generated composite.
    pub fn composite(path: CompositePath<K>) -> Self {
        Self { cycle: CycleKey::Composite(path), step: 1 }
    }

    /// The cycle this index belongs to.
    pub fn cycle(&self) -> &CycleKey<K> {
        &self.cycle
    }

    /// Position within the cycle.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// `true` for the identity sentinel.
    pub fn is_identity(&self) -> bool {
        matches!(self.cycle, CycleKey::Identity)
    }

    /// The following step of a named cycle.
    ///
    /// `None` for identity and composites, which have no successor.
    pub fn next(&self) -> Option<Self> {
        match &self.cycle {
            CycleKey::Named(_) => Some(Self {
                cycle: self.cycle.clone(),
                step: self.step.checked_add(1)?,
            }),
            _ => None,
        }
    }
}

// ─── Composite Path ─────────────────────────────────────────────────────────

/// Every `(source, cycle step)` pair that composes to one generated transform.
///
/// Backed by an ordered set, so two path sets built in different
/// enumeration orders compare and hash equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositePath<K>(BTreeSet<(TransformSequence<K>, TransformSequence<K>)>);

impl<K: CycleName> CompositePath<K> {
    /// The composition paths, in order.
    pub fn paths(&self) -> btree_set::Iter<'_, (TransformSequence<K>, TransformSequence<K>)> {
        self.0.iter()
    }

    /// Number of distinct paths.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no path is recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `true` when `source` followed by `step` is one of the paths.
    pub fn contains(&self, source: &TransformSequence<K>, step: &TransformSequence<K>) -> bool {
        self.0.iter().any(|(s, c)| s == source && c == step)
    }
}

impl<K: CycleName> From<BTreeSet<(TransformSequence<K>, TransformSequence<K>)>> for CompositePath<K> {
    fn from(paths: BTreeSet<(TransformSequence<K>, TransformSequence<K>)>) -> Self {
        Self(paths)
    }
}

impl<K: CycleName> FromIterator<(TransformSequence<K>, TransformSequence<K>)> for CompositePath<K> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (TransformSequence<K>, TransformSequence<K>)>,
    {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &'static str, b: &'static str) -> (TransformSequence<&'static str>, TransformSequence<&'static str>) {
        (TransformSequence::base(a), TransformSequence::base(b))
    }

    #[test]
    fn test_new_validates_step() {
        assert!(TransformSequence::<&str>::new(CycleKey::Identity, 0).is_ok());
        assert_eq!(
            TransformSequence::<&str>::new(CycleKey::Identity, 1),
            Err(TransformError::InvalidStep { kind: "identity", step: 1 })
        );
        assert_eq!(
            TransformSequence::new(CycleKey::Named("rot"), 0),
            Err(TransformError::InvalidStep { kind: "named", step: 0 })
        );
        let seq = TransformSequence::new(CycleKey::Named("rot"), 3).unwrap();
        assert_eq!(seq.step(), 3);
        assert_eq!(seq.cycle().name(), Some(&"rot"));

        let path: CompositePath<&str> = [pair("h", "v")].into_iter().collect();
        assert!(TransformSequence::new(CycleKey::Composite(path.clone()), 1).is_ok());
        assert_eq!(
            TransformSequence::new(CycleKey::Composite(path), 2),
            Err(TransformError::InvalidStep { kind: "composite", step: 2 })
        );
    }

    #[test]
    fn test_next_advances_named_only() {
        let base = TransformSequence::base("rot");
        let next = base.next().unwrap();
        assert_eq!(next, TransformSequence::new(CycleKey::Named("rot"), 2).unwrap());
        assert_eq!(TransformSequence::<&str>::identity().next(), None);
        let path: CompositePath<&str> = [pair("h", "v")].into_iter().collect();
        assert_eq!(TransformSequence::composite(path).next(), None);
    }

    #[test]
    fn test_identity_sentinel() {
        let id = TransformSequence::<u8>::identity();
        assert!(id.is_identity());
        assert_eq!(id.step(), 0);
        assert!(!TransformSequence::base(1u8).is_identity());
    }

    #[test]
    fn test_composite_path_is_order_independent() {
        let a: CompositePath<&str> = [pair("h", "v"), pair("v", "h")].into_iter().collect();
        let b: CompositePath<&str> = [pair("v", "h"), pair("h", "v")].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert!(a.contains(&TransformSequence::base("v"), &TransformSequence::base("h")));
        assert!(!a.contains(&TransformSequence::base("v"), &TransformSequence::base("v")));
        assert_eq!(TransformSequence::composite(a), TransformSequence::composite(b));
    }
}
