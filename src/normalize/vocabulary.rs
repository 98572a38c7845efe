//! Corpus-wide bond label vocabulary.

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Deserializer, Serialize};

use super::config::LabelOrder;
use super::error::Error;
use crate::model::graph::MoleculeGraph;
use crate::model::types::BondLabel;

/// Immutable mapping from [`BondLabel`] to integer code.
///
/// Codes are exactly `0..len()`. Entries are kept in code order, which is
/// also the order they serialize in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BondVocabulary {
    codes: IndexMap<BondLabel, u32>,
}

impl BondVocabulary {
    /// Collects every label used by `graphs` and assigns codes in `order`.
    pub fn build<'a>(
        graphs: impl IntoIterator<Item = &'a MoleculeGraph>,
        order: LabelOrder,
    ) -> Self {
        let labels: Vec<BondLabel> = match order {
            LabelOrder::Sorted => {
                let mut set = BTreeSet::new();
                for graph in graphs {
                    set.extend(graph.labels().cloned());
                }
                set.into_iter().collect()
            }
            LabelOrder::FirstSeen => {
                let mut seen = IndexSet::new();
                for graph in graphs {
                    for label in graph.labels() {
                        if !seen.contains(label) {
                            seen.insert(label.clone());
                        }
                    }
                }
                seen.into_iter().collect()
            }
        };

        let codes = labels
            .into_iter()
            .enumerate()
            .map(|(code, label)| (label, code as u32))
            .collect();
        Self { codes }
    }

    /// Wraps an existing label → code table after checking that codes form
    /// exactly `0..n`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVocabulary`] on an out-of-range or repeated code.
    pub fn from_codes(codes: impl IntoIterator<Item = (BondLabel, u32)>) -> Result<Self, Error> {
        let mut entries: Vec<(BondLabel, u32)> = codes.into_iter().collect();
        let n = entries.len();
        let mut taken = vec![false; n];
        for (label, code) in &entries {
            let slot = *code as usize;
            if slot >= n {
                return Err(Error::invalid_vocabulary(format!(
                    "code {code} for label '{label}' is outside 0..{n}"
                )));
            }
            if taken[slot] {
                return Err(Error::invalid_vocabulary(format!(
                    "code {code} is assigned to more than one label"
                )));
            }
            taken[slot] = true;
        }

        entries.sort_by_key(|(_, code)| *code);
        let codes: IndexMap<BondLabel, u32> = entries.into_iter().collect();
        if codes.len() != n {
            return Err(Error::invalid_vocabulary(
                "a label is assigned more than one code",
            ));
        }
        Ok(Self { codes })
    }

    #[inline]
    pub fn code(&self, label: &BondLabel) -> Option<u32> {
        self.codes.get(label).copied()
    }

    /// Label assigned to `code`.
    pub fn label(&self, code: u32) -> Option<&BondLabel> {
        self.codes.get_index(code as usize).map(|(label, _)| label)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&BondLabel, u32)> {
        self.codes.iter().map(|(label, code)| (label, *code))
    }
}

impl<'de> Deserialize<'de> for BondVocabulary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<BondLabel, u32>::deserialize(deserializer)?;
        Self::from_codes(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::HeavyAtom;
    use crate::model::types::{HeavyId, OriginalId};

    fn chain(id: &str, labels: &[&str]) -> MoleculeGraph {
        let n = labels.len() + 1;
        let mut atoms: Vec<HeavyAtom> = (0..n)
            .map(|i| HeavyAtom {
                id: HeavyId(i),
                original: OriginalId(i as u32 + 1),
                number: 6,
                charge: 0,
                n_hydro: 0,
                neighbors: Vec::new(),
            })
            .collect();
        for (i, label) in labels.iter().enumerate() {
            let label = BondLabel::from(*label);
            atoms[i].neighbors.push((HeavyId(i + 1), label.clone()));
            atoms[i + 1].neighbors.push((HeavyId(i), label));
        }
        MoleculeGraph::new(id, atoms)
    }

    #[test]
    fn shared_label_resolves_to_one_code() {
        let a = chain("a", &["1-0"]);
        let b = chain("b", &["1-0"]);
        let c = chain("c", &["2-0"]);

        let vocab = BondVocabulary::build([&a, &b, &c], LabelOrder::Sorted);
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.code(&BondLabel::from("1-0")), Some(0));
        assert_eq!(vocab.code(&BondLabel::from("2-0")), Some(1));
    }

    #[test]
    fn codes_cover_exact_range() {
        let graphs = [
            chain("a", &["2-0", "self"]),
            chain("b", &["1-0", "3-0", "1-6"]),
        ];
        for order in [LabelOrder::Sorted, LabelOrder::FirstSeen] {
            let vocab = BondVocabulary::build(&graphs, order);
            let mut codes: Vec<_> = vocab.iter().map(|(_, code)| code).collect();
            codes.sort_unstable();
            assert_eq!(codes, (0..vocab.len() as u32).collect::<Vec<_>>());
            for graph in &graphs {
                assert!(graph.labels().all(|l| vocab.code(l).is_some()));
            }
        }
    }

    #[test]
    fn sorted_order_is_lexicographic() {
        let graphs = [chain("a", &["self", "2-0", "1-0"])];
        let vocab = BondVocabulary::build(&graphs, LabelOrder::Sorted);
        let labels: Vec<_> = vocab.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["1-0", "2-0", "self"]);
    }

    #[test]
    fn first_seen_order_follows_corpus_scan() {
        let graphs = [chain("a", &["2-0"]), chain("b", &["1-0", "2-0"])];
        let vocab = BondVocabulary::build(&graphs, LabelOrder::FirstSeen);
        assert_eq!(vocab.label(0).map(BondLabel::as_str), Some("2-0"));
        assert_eq!(vocab.label(1).map(BondLabel::as_str), Some("1-0"));
        assert!(vocab.label(2).is_none());
    }

    #[test]
    fn build_is_deterministic() {
        let graphs = [chain("a", &["2-0", "1-0"]), chain("b", &["3-0"])];
        let first = BondVocabulary::build(&graphs, LabelOrder::Sorted);
        let second = BondVocabulary::build(&graphs, LabelOrder::Sorted);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_corpus_yields_empty_vocabulary() {
        let vocab = BondVocabulary::build(std::iter::empty(), LabelOrder::Sorted);
        assert!(vocab.is_empty());
    }

    #[test]
    fn serializes_as_object_in_code_order() {
        let graphs = [chain("a", &["2-0", "1-0"])];
        let vocab = BondVocabulary::build(&graphs, LabelOrder::Sorted);
        let json = serde_json::to_string(&vocab).unwrap();
        assert_eq!(json, r#"{"1-0":0,"2-0":1}"#);

        let back: BondVocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vocab);
    }

    #[test]
    fn from_codes_reorders_by_code() {
        let vocab = BondVocabulary::from_codes([
            (BondLabel::from("self"), 1),
            (BondLabel::from("1-0"), 0),
        ])
        .unwrap();
        assert_eq!(vocab.label(0).map(BondLabel::as_str), Some("1-0"));
        assert_eq!(vocab.code(&BondLabel::self_loop()), Some(1));
    }

    #[test]
    fn rejects_gaps_and_repeats() {
        let gap = BondVocabulary::from_codes([(BondLabel::from("1-0"), 1)]);
        assert!(matches!(gap, Err(Error::InvalidVocabulary(_))));

        let repeat = BondVocabulary::from_codes([
            (BondLabel::from("1-0"), 0),
            (BondLabel::from("2-0"), 0),
        ]);
        assert!(matches!(repeat, Err(Error::InvalidVocabulary(_))));

        let parsed: Result<BondVocabulary, _> = serde_json::from_str(r#"{"1-0": 3}"#);
        assert!(parsed.is_err());
    }
}
