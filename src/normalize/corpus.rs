//! Whole-corpus driver: parallel normalization, the vocabulary barrier, and
//! parallel encoding.
//!
//! Per-molecule work runs on the rayon pool. Results are always collected
//! back in input order before the [`FailurePolicy`] is applied, so the error
//! returned under [`FailurePolicy::Abort`] and the set of skipped molecules
//! under [`FailurePolicy::Skip`] do not depend on scheduling.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::config::{FailurePolicy, PrepConfig};
use super::encode::encode;
use super::error::Error;
use super::normalize;
use super::vocabulary::BondVocabulary;
use crate::model::graph::{EncodedGraph, MoleculeGraph};
use crate::model::molecule::RawMolecule;

/// Successful items of a corpus phase plus the molecules that were skipped.
///
/// Positions index into the slice the phase was run over.
#[derive(Debug, Default)]
pub struct PhaseOutcome<T> {
    pub items: Vec<T>,
    /// Input position of each entry in `items`.
    pub positions: Vec<usize>,
    /// Skipped entries with their input positions, ascending.
    pub failures: Vec<(usize, Error)>,
}

/// Output of a complete preparation run.
#[derive(Debug, Default)]
pub struct PreparedCorpus {
    /// Encoded graphs keyed by molecule id, in input order.
    pub encoded: Vec<(String, EncodedGraph)>,
    pub vocabulary: BondVocabulary,
    /// Molecules dropped under [`FailurePolicy::Skip`], in input order.
    pub failures: Vec<Error>,
    pub hydrogens_removed: usize,
}

/// Normalizes every molecule of the corpus in parallel.
///
/// # Errors
///
/// Under [`FailurePolicy::Abort`], returns the first failure in input order.
pub fn normalize_corpus(
    molecules: &[RawMolecule],
    config: &PrepConfig,
) -> Result<PhaseOutcome<MoleculeGraph>, Error> {
    let results: Vec<Result<MoleculeGraph, Error>> = molecules
        .par_iter()
        .map(|molecule| normalize(molecule, config))
        .collect();

    let outcome = apply_policy(results, config.policy)?;
    debug!(
        normalized = outcome.items.len(),
        skipped = outcome.failures.len(),
        "normalization phase finished"
    );
    Ok(outcome)
}

/// Encodes every graph in parallel against a finalized vocabulary.
///
/// # Errors
///
/// Under [`FailurePolicy::Abort`], returns the first failure in input order.
pub fn encode_corpus(
    graphs: &[MoleculeGraph],
    vocabulary: &BondVocabulary,
    policy: FailurePolicy,
) -> Result<PhaseOutcome<(String, EncodedGraph)>, Error> {
    let results: Vec<Result<(String, EncodedGraph), Error>> = graphs
        .par_iter()
        .map(|graph| encode(graph, vocabulary).map(|encoded| (graph.id.clone(), encoded)))
        .collect();

    let outcome = apply_policy(results, policy)?;
    debug!(
        encoded = outcome.items.len(),
        skipped = outcome.failures.len(),
        "encoding phase finished"
    );
    Ok(outcome)
}

/// Runs normalization, vocabulary construction, and encoding over a corpus.
///
/// When `vocabulary` is given it is used as-is instead of being built from
/// the corpus; labels it does not cover then surface as
/// [`Error::UnknownBondLabel`].
pub fn prepare(
    molecules: &[RawMolecule],
    config: &PrepConfig,
    vocabulary: Option<BondVocabulary>,
) -> Result<PreparedCorpus, Error> {
    let normalized = normalize_corpus(molecules, config)?;
    let graphs = normalized.items;
    let hydrogens_removed = graphs.iter().map(MoleculeGraph::hydrogen_total).sum();

    let vocabulary = match vocabulary {
        Some(vocabulary) => vocabulary,
        None => BondVocabulary::build(&graphs, config.label_order),
    };
    info!(labels = vocabulary.len(), "bond vocabulary ready");

    let encoded = encode_corpus(&graphs, &vocabulary, config.policy)?;

    // Encoding positions index into `graphs`; lift them back to corpus positions.
    let lifted = encoded
        .failures
        .into_iter()
        .map(|(pos, err)| (normalized.positions[pos], err));
    let failures = merge_by_position(normalized.failures, lifted);

    Ok(PreparedCorpus {
        encoded: encoded.items,
        vocabulary,
        failures,
        hydrogens_removed,
    })
}

fn apply_policy<T>(
    results: Vec<Result<T, Error>>,
    policy: FailurePolicy,
) -> Result<PhaseOutcome<T>, Error> {
    let mut outcome = PhaseOutcome {
        items: Vec::with_capacity(results.len()),
        positions: Vec::with_capacity(results.len()),
        failures: Vec::new(),
    };

    for (pos, result) in results.into_iter().enumerate() {
        match result {
            Ok(item) => {
                outcome.items.push(item);
                outcome.positions.push(pos);
            }
            Err(err) => match policy {
                FailurePolicy::Abort => return Err(err),
                FailurePolicy::Skip => {
                    warn!(molecule = err.molecule().unwrap_or("?"), "skipping molecule: {err}");
                    outcome.failures.push((pos, err));
                }
            },
        }
    }

    Ok(outcome)
}

/// Merges two position-sorted failure lists, dropping the positions.
fn merge_by_position(
    left: Vec<(usize, Error)>,
    right: impl IntoIterator<Item = (usize, Error)>,
) -> Vec<Error> {
    let mut right = right.into_iter().peekable();
    let mut merged = Vec::with_capacity(left.len());

    for (pos, err) in left {
        while let Some((_, next)) = right.next_if(|(other, _)| *other < pos) {
            merged.push(next);
        }
        merged.push(err);
    }
    merged.extend(right.map(|(_, err)| err));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::RawAtom;
    use crate::model::molecule::RawBond;
    use crate::model::types::BondLabel;
    use crate::normalize::config::LabelOrder;

    fn make_ethane(id: &str) -> RawMolecule {
        let mut mol = RawMolecule::new(id);
        mol.atoms.push(RawAtom::new(1, 6));
        mol.atoms.push(RawAtom::new(2, 6));
        for aid in 3..=8 {
            mol.atoms.push(RawAtom::new(aid, 1));
        }
        mol.bonds.push(RawBond::new(1, 2, 1));
        for aid in 3..=5 {
            mol.bonds.push(RawBond::new(1, aid, 1));
        }
        for aid in 6..=8 {
            mol.bonds.push(RawBond::new(2, aid, 1));
        }
        mol
    }

    fn make_ethylene(id: &str) -> RawMolecule {
        let mut mol = RawMolecule::new(id);
        mol.atoms.push(RawAtom::new(1, 6));
        mol.atoms.push(RawAtom::new(2, 6));
        mol.bonds.push(RawBond::new(1, 2, 2));
        mol
    }

    fn make_charged_hydrogen(id: &str) -> RawMolecule {
        let mut mol = make_ethane(id);
        mol.atoms[2] = RawAtom::new(3, 1).with_charge(1);
        mol
    }

    fn no_self_loops(policy: FailurePolicy) -> PrepConfig {
        PrepConfig {
            self_loop: false,
            policy,
            label_order: LabelOrder::Sorted,
        }
    }

    #[test]
    fn shared_labels_share_codes_across_molecules() {
        let corpus = vec![make_ethane("a"), make_ethane("b"), make_ethylene("c")];
        let prepared = prepare(&corpus, &no_self_loops(FailurePolicy::Abort), None).unwrap();

        assert_eq!(prepared.vocabulary.len(), 2);
        let single = prepared.vocabulary.code(&BondLabel::bond(1, 0)).unwrap();
        assert_eq!(prepared.encoded[0].1.bond_type, vec![single, single]);
        assert_eq!(prepared.encoded[1].1.bond_type, vec![single, single]);
        assert_ne!(prepared.encoded[2].1.bond_type[0], single);
    }

    #[test]
    fn output_preserves_input_order() {
        let corpus: Vec<_> = (0..32).map(|i| make_ethane(&format!("m{i}"))).collect();
        let prepared = prepare(&corpus, &PrepConfig::default(), None).unwrap();
        let ids: Vec<_> = prepared.encoded.iter().map(|(id, _)| id.as_str()).collect();
        let expected: Vec<_> = corpus.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, expected);
        assert_eq!(prepared.hydrogens_removed, 32 * 6);
    }

    #[test]
    fn abort_returns_first_failure_in_input_order() {
        let corpus = vec![
            make_ethane("ok"),
            make_charged_hydrogen("bad1"),
            make_charged_hydrogen("bad2"),
        ];
        let err = prepare(&corpus, &PrepConfig::default(), None).unwrap_err();
        assert_eq!(err.molecule(), Some("bad1"));
        assert!(err.is_data_assumption_violation());
    }

    #[test]
    fn skip_drops_failures_from_vocabulary_and_output() {
        let mut doubled = make_ethylene("multi");
        doubled.bonds.push(RawBond::new(2, 1, 3));
        let corpus = vec![
            make_charged_hydrogen("bad"),
            make_ethane("ok"),
            doubled,
        ];

        let prepared = prepare(&corpus, &no_self_loops(FailurePolicy::Skip), None).unwrap();
        assert_eq!(prepared.encoded.len(), 1);
        assert_eq!(prepared.encoded[0].0, "ok");
        assert_eq!(prepared.vocabulary.len(), 1);
        assert!(prepared.vocabulary.code(&BondLabel::bond(3, 0)).is_none());

        let failed: Vec<_> = prepared.failures.iter().map(|e| e.molecule()).collect();
        assert_eq!(failed, vec![Some("bad"), Some("multi")]);
        assert!(matches!(prepared.failures[1], Error::Multigraph { .. }));
    }

    #[test]
    fn skipped_molecules_keep_input_order_with_repeated_ids() {
        let mut dangling = make_ethane("dup");
        dangling.bonds.push(RawBond::new(1, 42, 1));
        let corpus = vec![make_ethane("dup"), make_charged_hydrogen("x"), dangling];

        let config = PrepConfig {
            policy: FailurePolicy::Skip,
            ..PrepConfig::default()
        };
        let prepared = prepare(&corpus, &config, None).unwrap();

        let failed: Vec<_> = prepared.failures.iter().map(|e| e.molecule()).collect();
        assert_eq!(failed, vec![Some("x"), Some("dup")]);
        assert!(matches!(prepared.failures[1], Error::DanglingBond { .. }));
        assert_eq!(prepared.encoded.len(), 1);
    }

    #[test]
    fn encoding_failures_interleave_with_normalization_failures() {
        let vocab = BondVocabulary::from_codes([(BondLabel::bond(1, 0), 0)]).unwrap();
        let corpus = vec![
            make_ethylene("unknown1"),
            make_charged_hydrogen("charged"),
            make_ethane("ok"),
            make_ethylene("unknown2"),
        ];

        let prepared =
            prepare(&corpus, &no_self_loops(FailurePolicy::Skip), Some(vocab)).unwrap();

        let failed: Vec<_> = prepared.failures.iter().map(|e| e.molecule()).collect();
        assert_eq!(failed, vec![Some("unknown1"), Some("charged"), Some("unknown2")]);
        assert!(matches!(prepared.failures[0], Error::UnknownBondLabel { .. }));
        assert!(matches!(prepared.failures[1], Error::ChargedHydrogen { .. }));
    }

    #[test]
    fn fixed_vocabulary_reports_unknown_labels() {
        let vocab = BondVocabulary::from_codes([(BondLabel::bond(1, 0), 0)]).unwrap();
        let corpus = vec![make_ethane("a"), make_ethylene("b")];

        let err = prepare(&corpus, &no_self_loops(FailurePolicy::Abort), Some(vocab.clone()))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownBondLabel { ref molecule, .. } if molecule == "b"));

        let prepared =
            prepare(&corpus, &no_self_loops(FailurePolicy::Skip), Some(vocab)).unwrap();
        assert_eq!(prepared.encoded.len(), 1);
        assert_eq!(prepared.failures.len(), 1);
        assert_eq!(prepared.vocabulary.len(), 1);
    }

    #[test]
    fn empty_corpus_prepares_cleanly() {
        let prepared = prepare(&[], &PrepConfig::default(), None).unwrap();
        assert!(prepared.encoded.is_empty());
        assert!(prepared.vocabulary.is_empty());
        assert!(prepared.failures.is_empty());
    }
}
