//! Symmetric, pair-keyed bond map construction.
//!
//! Atoms are addressed by their slot in the molecule's atom arena; original
//! ids are resolved exactly once, here, through an [`AtomIndex`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::error::Error;
use crate::model::molecule::RawMolecule;
use crate::model::types::{BondLabel, OriginalId};

/// Lookup from original atom id to arena slot for one molecule.
#[derive(Debug, Clone)]
pub struct AtomIndex {
    slots: HashMap<OriginalId, usize>,
}

impl AtomIndex {
    /// Indexes the atoms of `molecule`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateAtom`] if two atoms share an original id.
    pub fn build(molecule: &RawMolecule) -> Result<Self, Error> {
        let mut slots = HashMap::with_capacity(molecule.atoms.len());
        for (slot, atom) in molecule.atoms.iter().enumerate() {
            match slots.entry(atom.aid) {
                Entry::Occupied(_) => {
                    return Err(Error::DuplicateAtom {
                        molecule: molecule.id.clone(),
                        aid: atom.aid,
                    });
                }
                Entry::Vacant(v) => {
                    v.insert(slot);
                }
            }
        }
        Ok(Self { slots })
    }

    #[inline]
    pub fn slot(&self, aid: OriginalId) -> Option<usize> {
        self.slots.get(&aid).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// One directed entry `(from, to) -> label` of the bond map, by arena slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondEntry {
    pub from: usize,
    pub to: usize,
    pub label: BondLabel,
}

/// Directed bond entries of one molecule in insertion order.
///
/// Every raw bond contributes both orientations. Repeated raw bonds between
/// the same pair are kept as separate entries so that they surface as a
/// multigraph later instead of being silently merged.
#[derive(Debug, Clone, Default)]
pub struct BondMap {
    entries: Vec<BondEntry>,
}

impl BondMap {
    /// Builds the bond map for `molecule`, optionally injecting self-loops.
    ///
    /// # Errors
    ///
    /// - [`Error::DanglingBond`] if a bond names an undeclared atom.
    /// - [`Error::SelfLoopCollision`] if `self_loop` is set and the input
    ///   already bonds some atom to itself.
    pub fn build(
        molecule: &RawMolecule,
        index: &AtomIndex,
        self_loop: bool,
    ) -> Result<Self, Error> {
        let capacity = 2 * molecule.bonds.len() + if self_loop { index.len() } else { 0 };
        let mut entries = Vec::with_capacity(capacity);
        let mut has_real_diagonal = vec![false; molecule.atoms.len()];

        for bond in &molecule.bonds {
            let resolve = |aid: OriginalId| {
                index
                    .slot(aid)
                    .ok_or_else(|| Error::dangling_bond(&molecule.id, bond.aid1, bond.aid2, aid))
            };
            let i = resolve(bond.aid1)?;
            let j = resolve(bond.aid2)?;
            if i == j {
                has_real_diagonal[i] = true;
            }

            let label = bond.label();
            entries.push(BondEntry {
                from: i,
                to: j,
                label: label.clone(),
            });
            entries.push(BondEntry {
                from: j,
                to: i,
                label,
            });
        }

        if self_loop {
            for (slot, atom) in molecule.atoms.iter().enumerate() {
                if has_real_diagonal[slot] {
                    return Err(Error::SelfLoopCollision {
                        molecule: molecule.id.clone(),
                        aid: atom.aid,
                    });
                }
                entries.push(BondEntry {
                    from: slot,
                    to: slot,
                    label: BondLabel::self_loop(),
                });
            }
        }

        Ok(Self { entries })
    }

    #[inline]
    pub fn entries(&self) -> &[BondEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label of the first entry keyed `(from, to)`.
    pub fn label(&self, from: usize, to: usize) -> Option<&BondLabel> {
        self.entries
            .iter()
            .find(|e| e.from == from && e.to == to)
            .map(|e| &e.label)
    }

    /// Checks that every off-diagonal key has a mirror with the same label.
    pub fn is_symmetric(&self) -> bool {
        self.entries
            .iter()
            .filter(|e| e.from != e.to)
            .all(|e| self.label(e.to, e.from) == Some(&e.label))
    }
}
