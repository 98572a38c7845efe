//! Hydrogen bookkeeping and removal.
//!
//! Hydrogens are folded into per-atom counts on their heavy neighbors. The
//! fold is only lossless when every hydrogen hangs off exactly one heavy atom
//! and carries no charge; both conditions are verified rather than assumed.

use super::adjacency::Adjacency;
use super::error::Error;
use crate::model::molecule::RawMolecule;
use crate::model::types::OriginalId;

/// A surviving heavy atom before reindexing, still addressed by arena slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeavyRecord {
    pub slot: usize,
    pub original: OriginalId,
    pub number: u8,
    pub charge: i32,
    pub n_hydro: usize,
}

/// Result of hydrogen collapse for one molecule.
#[derive(Debug, Clone)]
pub struct Collapsed {
    /// Heavy atoms in arena order.
    pub heavy: Vec<HeavyRecord>,
    /// Hydrogen mask indexed by arena slot.
    pub hydrogen: Vec<bool>,
    /// Number of hydrogen atoms removed.
    pub removed: usize,
}

impl Collapsed {
    #[inline]
    pub fn is_hydrogen(&self, slot: usize) -> bool {
        self.hydrogen[slot]
    }
}

/// Counts hydrogen neighbors per heavy atom and drops the hydrogens.
///
/// # Errors
///
/// - [`Error::HydrogenCountMismatch`] if the per-atom counts do not add up to
///   the number of hydrogen atoms in the record.
/// - [`Error::ChargedHydrogen`] if any hydrogen has a nonzero charge.
pub fn collapse(molecule: &RawMolecule, adjacency: &Adjacency) -> Result<Collapsed, Error> {
    let hydrogen: Vec<bool> = molecule.atoms.iter().map(|a| a.is_hydrogen()).collect();
    let removed = hydrogen.iter().filter(|&&h| h).count();

    let heavy: Vec<HeavyRecord> = molecule
        .atoms
        .iter()
        .enumerate()
        .filter(|(slot, _)| !hydrogen[*slot])
        .map(|(slot, atom)| HeavyRecord {
            slot,
            original: atom.aid,
            number: atom.number,
            charge: atom.charge(),
            n_hydro: adjacency
                .neighbors(slot)
                .iter()
                .filter(|n| hydrogen[n.slot])
                .count(),
        })
        .collect();

    let attached: usize = heavy.iter().map(|h| h.n_hydro).sum();
    if attached != removed {
        return Err(Error::HydrogenCountMismatch {
            molecule: molecule.id.clone(),
            hydrogens: removed,
            attached,
        });
    }

    if let Some(atom) = molecule
        .atoms
        .iter()
        .find(|a| a.is_hydrogen() && a.charge() != 0)
    {
        return Err(Error::ChargedHydrogen {
            molecule: molecule.id.clone(),
            aid: atom.aid,
            charge: atom.charge(),
        });
    }

    Ok(Collapsed {
        heavy,
        hydrogen,
        removed,
    })
}
