use serde::{Deserialize, Serialize};

use super::types::{BondLabel, HeavyId, OriginalId};

/// Neighbor entry of a heavy atom: the neighbor's heavy id and the bond label.
pub type HeavyNeighbor = (HeavyId, BondLabel);

/// A non-hydrogen atom after hydrogen collapse and reindexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeavyAtom {
    /// New sequential id; equals the atom's position in its graph.
    pub id: HeavyId,
    /// Id of the atom in the raw record.
    pub original: OriginalId,
    pub number: u8,
    pub charge: i32,
    /// Number of hydrogens that were bonded to this atom before removal.
    pub n_hydro: usize,
    pub neighbors: Vec<HeavyNeighbor>,
}

impl HeavyAtom {
    pub fn neighbor_ids(&self) -> impl Iterator<Item = HeavyId> + '_ {
        self.neighbors.iter().map(|(id, _)| *id)
    }

    pub fn has_neighbor(&self, id: HeavyId, label: &BondLabel) -> bool {
        self.neighbors.iter().any(|(n, l)| *n == id && l == label)
    }
}

/// Hydrogen-free, reindexed molecular graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoleculeGraph {
    pub id: String,
    pub atoms: Vec<HeavyAtom>,
}

impl MoleculeGraph {
    pub fn new(id: impl Into<String>, atoms: Vec<HeavyAtom>) -> Self {
        Self {
            id: id.into(),
            atoms,
        }
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Number of directed edges, self-loops included.
    pub fn edge_count(&self) -> usize {
        self.atoms.iter().map(|a| a.neighbors.len()).sum()
    }

    pub fn atom(&self, id: HeavyId) -> Option<&HeavyAtom> {
        self.atoms.get(id.index())
    }

    pub fn hydrogen_total(&self) -> usize {
        self.atoms.iter().map(|a| a.n_hydro).sum()
    }

    pub fn labels(&self) -> impl Iterator<Item = &BondLabel> {
        self.atoms
            .iter()
            .flat_map(|a| a.neighbors.iter().map(|(_, label)| label))
    }
}

/// Flat, index-aligned array encoding of one molecule graph.
///
/// `atom_type` and `atom_feat` are indexed by heavy id. The three edge arrays
/// share one length; position `k` describes the directed edge
/// `bond_seg_i[k] -> bond_idx_j[k]` of type `bond_type[k]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedGraph {
    pub n_atom: usize,
    pub atom_type: Vec<u8>,
    /// `[atomic number, hydrogen count, charge]` per atom.
    pub atom_feat: Vec<[i32; 3]>,
    pub bond_type: Vec<u32>,
    pub bond_seg_i: Vec<usize>,
    pub bond_idx_j: Vec<usize>,
}

impl EncodedGraph {
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.bond_type.len()
    }
}
