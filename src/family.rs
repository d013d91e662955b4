//! Ordered container of continuation snapshots.
//!
//! A continuation solve emits one snapshot per step; the family keeps them in
//! solve order and the last element is the converged solution by contract.
//! Serialized transparently as the inner sequence.

use crate::model::Equilibrium;
use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::slice;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquilibriaFamily(pub Vec<Equilibrium>);

impl EquilibriaFamily {
    pub fn new(members: Vec<Equilibrium>) -> Self {
        Self(members)
    }

    /// Wrap a lone snapshot as a one-element family.
    ///
    /// Archives written after a non-continuation solve store a single
    /// equilibrium; this is the normalization that gives both document shapes
    /// the same access surface.
    pub fn from_single(equilibrium: Equilibrium) -> Self {
        Self(vec![equilibrium])
    }

    /// The converged (final) snapshot, `None` only for an empty family.
    pub fn last(&self) -> Option<&Equilibrium> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Equilibrium> {
        self.0.iter()
    }
}

impl Index<usize> for EquilibriaFamily {
    type Output = Equilibrium;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for EquilibriaFamily {
    type Item = Equilibrium;
    type IntoIter = std::vec::IntoIter<Equilibrium>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a EquilibriaFamily {
    type Item = &'a Equilibrium;
    type IntoIter = slice::Iter<'a, Equilibrium>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
