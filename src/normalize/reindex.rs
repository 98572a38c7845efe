use std::collections::HashSet;

use super::adjacency::Adjacency;
use super::error::Error;
use super::hydrogen::{Collapsed, HeavyRecord};
use crate::model::graph::{HeavyAtom, MoleculeGraph};
use crate::model::molecule::RawMolecule;
use crate::model::types::HeavyId;

/// Assigns contiguous heavy ids and rewrites neighbor lists into the new id
/// space.
///
/// Heavy ids follow ascending original id, so the result does not depend on
/// the order atoms were listed in the record. Edges touching a hydrogen are
/// dropped; self-loops survive.
///
/// # Errors
///
/// Returns [`Error::Multigraph`] if an atom ends up with two entries for the
/// same neighbor.
pub fn reindex(
    molecule: &RawMolecule,
    collapsed: &Collapsed,
    adjacency: &Adjacency,
) -> Result<MoleculeGraph, Error> {
    let mut order: Vec<&HeavyRecord> = collapsed.heavy.iter().collect();
    order.sort_by_key(|record| record.original);

    // slot -> heavy id; `None` for hydrogens
    let mut heavy_ids: Vec<Option<HeavyId>> = vec![None; molecule.atoms.len()];
    for (new_id, record) in order.iter().enumerate() {
        heavy_ids[record.slot] = Some(HeavyId(new_id));
    }

    let mut atoms = Vec::with_capacity(order.len());
    for (new_id, record) in order.into_iter().enumerate() {
        let mut seen = HashSet::new();
        let mut neighbors = Vec::new();

        for neighbor in adjacency.neighbors(record.slot) {
            if collapsed.is_hydrogen(neighbor.slot) {
                continue;
            }
            let Some(id) = heavy_ids[neighbor.slot] else {
                continue;
            };
            if !seen.insert(id) {
                return Err(Error::multigraph(
                    &molecule.id,
                    record.original,
                    molecule.atoms[neighbor.slot].aid,
                ));
            }
            neighbors.push((id, neighbor.label.clone()));
        }

        atoms.push(HeavyAtom {
            id: HeavyId(new_id),
            original: record.original,
            number: record.number,
            charge: record.charge,
            n_hydro: record.n_hydro,
            neighbors,
        });
    }

    Ok(MoleculeGraph::new(molecule.id.clone(), atoms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::RawAtom;
    use crate::model::molecule::RawBond;
    use crate::model::types::{BondLabel, OriginalId};
    use crate::normalize::bond_map::{AtomIndex, BondMap};
    use crate::normalize::hydrogen::collapse;

    fn run(mol: &RawMolecule, self_loop: bool) -> Result<MoleculeGraph, Error> {
        let index = AtomIndex::build(mol)?;
        let map = BondMap::build(mol, &index, self_loop)?;
        let adj = Adjacency::group(&map, mol.atoms.len());
        let collapsed = collapse(mol, &adj)?;
        reindex(mol, &collapsed, &adj)
    }

    /// Acetaldehyde with atoms listed out of id order and hydrogens interleaved.
    fn make_acetaldehyde() -> RawMolecule {
        let mut mol = RawMolecule::new("acetaldehyde");
        mol.atoms.push(RawAtom::new(7, 8));
        mol.atoms.push(RawAtom::new(2, 1));
        mol.atoms.push(RawAtom::new(5, 6));
        mol.atoms.push(RawAtom::new(3, 1));
        mol.atoms.push(RawAtom::new(4, 1));
        mol.atoms.push(RawAtom::new(1, 6));
        mol.atoms.push(RawAtom::new(6, 1));
        mol.bonds.push(RawBond::new(1, 5, 1));
        mol.bonds.push(RawBond::new(5, 7, 2));
        mol.bonds.push(RawBond::new(1, 2, 1));
        mol.bonds.push(RawBond::new(1, 3, 1));
        mol.bonds.push(RawBond::new(1, 4, 1));
        mol.bonds.push(RawBond::new(5, 6, 1));
        mol
    }

    #[test]
    fn assigns_ids_by_ascending_original_id() {
        let graph = run(&make_acetaldehyde(), true).unwrap();
        let originals: Vec<_> = graph.atoms.iter().map(|a| a.original).collect();
        assert_eq!(originals, vec![OriginalId(1), OriginalId(5), OriginalId(7)]);
        for (i, atom) in graph.atoms.iter().enumerate() {
            assert_eq!(atom.id, HeavyId(i));
        }
    }

    #[test]
    fn heavy_ids_are_a_bijection_onto_range() {
        let graph = run(&make_acetaldehyde(), true).unwrap();
        let mut ids: Vec<_> = graph.atoms.iter().map(|a| a.id.index()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..graph.atom_count()).collect::<Vec<_>>());
    }

    #[test]
    fn drops_hydrogen_edges_and_remaps_neighbors() {
        let graph = run(&make_acetaldehyde(), true).unwrap();
        let single = BondLabel::bond(1, 0);
        let double = BondLabel::bond(2, 0);
        let self_loop = BondLabel::self_loop();

        assert_eq!(
            graph.atoms[0].neighbors,
            vec![(HeavyId(1), single.clone()), (HeavyId(0), self_loop.clone())]
        );
        assert_eq!(
            graph.atoms[1].neighbors,
            vec![
                (HeavyId(0), single),
                (HeavyId(2), double.clone()),
                (HeavyId(1), self_loop.clone())
            ]
        );
        assert_eq!(
            graph.atoms[2].neighbors,
            vec![(HeavyId(1), double), (HeavyId(2), self_loop)]
        );
        assert_eq!(graph.atoms[0].n_hydro, 3);
        assert_eq!(graph.atoms[1].n_hydro, 1);
        assert_eq!(graph.atoms[2].n_hydro, 0);
    }

    #[test]
    fn neighbor_lists_are_symmetric() {
        let graph = run(&make_acetaldehyde(), false).unwrap();
        for atom in &graph.atoms {
            for (j, label) in &atom.neighbors {
                if *j != atom.id {
                    let other = graph.atom(*j).unwrap();
                    assert!(other.has_neighbor(atom.id, label));
                }
            }
        }
    }

    #[test]
    fn methane_fragment_collapses_to_single_self_looped_atom() {
        let mut mol = RawMolecule::new("ch2");
        mol.atoms.push(RawAtom::new(1, 6).with_charge(0));
        mol.atoms.push(RawAtom::new(2, 1).with_charge(0));
        mol.atoms.push(RawAtom::new(3, 1).with_charge(0));
        mol.bonds.push(RawBond::new(1, 2, 1));
        mol.bonds.push(RawBond::new(1, 3, 1));

        let graph = run(&mol, true).unwrap();
        assert_eq!(graph.atom_count(), 1);
        let carbon = &graph.atoms[0];
        assert_eq!(carbon.id, HeavyId(0));
        assert_eq!(carbon.number, 6);
        assert_eq!(carbon.n_hydro, 2);
        assert_eq!(carbon.charge, 0);
        assert_eq!(carbon.neighbors, vec![(HeavyId(0), BondLabel::self_loop())]);
    }

    #[test]
    fn repeated_heavy_bond_is_a_multigraph() {
        let mut mol = make_acetaldehyde();
        mol.bonds.push(RawBond::new(5, 1, 2));

        let result = run(&mol, true);
        assert!(matches!(
            result,
            Err(Error::Multigraph {
                aid: OriginalId(1),
                neighbor: OriginalId(5),
                ..
            })
        ));
    }

    #[test]
    fn real_self_bond_without_self_loops_is_a_multigraph() {
        let mut mol = make_acetaldehyde();
        mol.bonds.push(RawBond::new(7, 7, 1));

        let result = run(&mol, false);
        assert!(matches!(
            result,
            Err(Error::Multigraph {
                aid: OriginalId(7),
                neighbor: OriginalId(7),
                ..
            })
        ));
    }

    #[test]
    fn empty_molecule_yields_empty_graph() {
        let graph = run(&RawMolecule::new("empty"), true).unwrap();
        assert_eq!(graph.atom_count(), 0);
        assert_eq!(graph.id, "empty");
    }
}
