use super::error::Error;
use super::vocabulary::BondVocabulary;
use crate::model::graph::{EncodedGraph, MoleculeGraph};

/// Flattens `graph` into index-aligned arrays using `vocabulary` for bond
/// type codes.
///
/// Atom arrays follow heavy id order. Edges are emitted atom by atom in each
/// atom's neighbor-list order.
///
/// # Errors
///
/// - [`Error::MisalignedAtom`] if an atom's id differs from its position.
/// - [`Error::UnknownBondLabel`] if a label has no code in `vocabulary`.
pub fn encode(graph: &MoleculeGraph, vocabulary: &BondVocabulary) -> Result<EncodedGraph, Error> {
    let n_atom = graph.atom_count();
    let n_edge = graph.edge_count();

    let mut encoded = EncodedGraph {
        n_atom,
        atom_type: Vec::with_capacity(n_atom),
        atom_feat: Vec::with_capacity(n_atom),
        bond_type: Vec::with_capacity(n_edge),
        bond_seg_i: Vec::with_capacity(n_edge),
        bond_idx_j: Vec::with_capacity(n_edge),
    };

    for (i, atom) in graph.atoms.iter().enumerate() {
        if atom.id.index() != i {
            return Err(Error::MisalignedAtom {
                molecule: graph.id.clone(),
                position: i,
                id: atom.id.index(),
            });
        }

        encoded.atom_type.push(atom.number);
        encoded
            .atom_feat
            .push([i32::from(atom.number), atom.n_hydro as i32, atom.charge]);

        for (j, label) in &atom.neighbors {
            let code = vocabulary
                .code(label)
                .ok_or_else(|| Error::UnknownBondLabel {
                    molecule: graph.id.clone(),
                    label: label.clone(),
                })?;
            encoded.bond_type.push(code);
            encoded.bond_seg_i.push(i);
            encoded.bond_idx_j.push(j.index());
        }
    }

    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::HeavyAtom;
    use crate::model::types::{BondLabel, HeavyId, OriginalId};
    use crate::normalize::config::LabelOrder;

    fn make_formaldehyde() -> MoleculeGraph {
        let double = BondLabel::bond(2, 0);
        MoleculeGraph::new(
            "formaldehyde",
            vec![
                HeavyAtom {
                    id: HeavyId(0),
                    original: OriginalId(1),
                    number: 6,
                    charge: 0,
                    n_hydro: 2,
                    neighbors: vec![
                        (HeavyId(1), double.clone()),
                        (HeavyId(0), BondLabel::self_loop()),
                    ],
                },
                HeavyAtom {
                    id: HeavyId(1),
                    original: OriginalId(2),
                    number: 8,
                    charge: 0,
                    n_hydro: 0,
                    neighbors: vec![(HeavyId(0), double), (HeavyId(1), BondLabel::self_loop())],
                },
            ],
        )
    }

    #[test]
    fn encodes_atoms_and_edges_positionally() {
        let graph = make_formaldehyde();
        let vocab = BondVocabulary::build([&graph], LabelOrder::Sorted);
        let encoded = encode(&graph, &vocab).unwrap();

        assert_eq!(encoded.n_atom, 2);
        assert_eq!(encoded.atom_type, vec![6, 8]);
        assert_eq!(encoded.atom_feat, vec![[6, 2, 0], [8, 0, 0]]);
        assert_eq!(encoded.bond_type, vec![0, 1, 0, 1]);
        assert_eq!(encoded.bond_seg_i, vec![0, 0, 1, 1]);
        assert_eq!(encoded.bond_idx_j, vec![1, 0, 0, 1]);
    }

    #[test]
    fn edge_arrays_share_one_length() {
        let graph = make_formaldehyde();
        let vocab = BondVocabulary::build([&graph], LabelOrder::Sorted);
        let encoded = encode(&graph, &vocab).unwrap();

        assert_eq!(encoded.edge_count(), graph.edge_count());
        assert_eq!(encoded.bond_seg_i.len(), encoded.edge_count());
        assert_eq!(encoded.bond_idx_j.len(), encoded.edge_count());
    }

    #[test]
    fn encoding_is_deterministic() {
        let graph = make_formaldehyde();
        let vocab = BondVocabulary::build([&graph], LabelOrder::Sorted);
        assert_eq!(
            encode(&graph, &vocab).unwrap(),
            encode(&graph, &vocab).unwrap()
        );
    }

    #[test]
    fn carries_negative_charges_in_features() {
        let mut graph = make_formaldehyde();
        graph.atoms[1].charge = -1;
        let vocab = BondVocabulary::build([&graph], LabelOrder::Sorted);
        let encoded = encode(&graph, &vocab).unwrap();
        assert_eq!(encoded.atom_feat[1], [8, 0, -1]);
    }

    #[test]
    fn errors_on_label_missing_from_vocabulary() {
        let graph = make_formaldehyde();
        let vocab = BondVocabulary::from_codes([(BondLabel::self_loop(), 0)]).unwrap();

        let result = encode(&graph, &vocab);
        assert!(matches!(
            result,
            Err(Error::UnknownBondLabel { ref label, .. }) if label.as_str() == "2-0"
        ));
    }

    #[test]
    fn errors_on_misaligned_atom() {
        let mut graph = make_formaldehyde();
        graph.atoms.swap(0, 1);
        let vocab = BondVocabulary::build([&graph], LabelOrder::Sorted);

        let result = encode(&graph, &vocab);
        assert!(matches!(
            result,
            Err(Error::MisalignedAtom {
                position: 0,
                id: 1,
                ..
            })
        ));
    }
}
