use super::bond_map::BondMap;
use crate::model::types::BondLabel;

/// Neighbor of an atom in the raw adjacency, by arena slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
    pub slot: usize,
    pub label: BondLabel,
}

/// Per-atom neighbor lists indexed by arena slot.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    lists: Vec<Vec<Neighbor>>,
}

impl Adjacency {
    /// Groups bond-map entries by their source atom in a single pass.
    ///
    /// Each list keeps the order in which entries appear in the bond map.
    /// Atoms without any entry get an empty list.
    pub fn group(bond_map: &BondMap, atom_count: usize) -> Self {
        let mut lists = vec![Vec::new(); atom_count];
        for entry in bond_map.entries() {
            lists[entry.from].push(Neighbor {
                slot: entry.to,
                label: entry.label.clone(),
            });
        }
        Self { lists }
    }

    #[inline]
    pub fn neighbors(&self, slot: usize) -> &[Neighbor] {
        &self.lists[slot]
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.lists.len()
    }
}
