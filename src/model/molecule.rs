use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::atom::RawAtom;
use super::types::{BondLabel, OriginalId};

/// Bond between two atoms of a raw molecule record, addressed by original id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBond {
    pub aid1: OriginalId,
    pub aid2: OriginalId,
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<u32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RawBond {
    pub fn new(aid1: u32, aid2: u32, order: u32) -> Self {
        Self {
            aid1: OriginalId(aid1),
            aid2: OriginalId(aid2),
            order,
            style: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_style(mut self, style: u32) -> Self {
        self.style = Some(style);
        self
    }

    #[inline]
    pub fn style(&self) -> u32 {
        self.style.unwrap_or(0)
    }

    pub fn label(&self) -> BondLabel {
        BondLabel::bond(self.order, self.style())
    }
}

/// A raw molecule: the atom arena and bond list of one input record.
///
/// The identifier comes from the record stream rather than the JSON body,
/// so it is skipped during (de)serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMolecule {
    #[serde(skip)]
    pub id: String,
    pub atoms: Vec<RawAtom>,
    pub bonds: Vec<RawBond>,
}

impl RawMolecule {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn hydrogen_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.is_hydrogen()).count()
    }
}

/// Attribute names observed across a corpus of raw records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSurvey {
    pub atom_keys: BTreeSet<String>,
    pub bond_keys: BTreeSet<String>,
    pub bond_labels: BTreeSet<BondLabel>,
}

impl AttributeSurvey {
    pub fn collect<'a>(molecules: impl IntoIterator<Item = &'a RawMolecule>) -> Self {
        let mut survey = Self::default();
        for molecule in molecules {
            for atom in &molecule.atoms {
                survey.atom_keys.insert("aid".to_string());
                survey.atom_keys.insert("number".to_string());
                if atom.charge.is_some() {
                    survey.atom_keys.insert("charge".to_string());
                }
                survey.atom_keys.extend(atom.extra.keys().cloned());
            }
            for bond in &molecule.bonds {
                survey.bond_keys.insert("aid1".to_string());
                survey.bond_keys.insert("aid2".to_string());
                survey.bond_keys.insert("order".to_string());
                if bond.style.is_some() {
                    survey.bond_keys.insert("style".to_string());
                }
                survey.bond_keys.extend(bond.extra.keys().cloned());
                survey.bond_labels.insert(bond.label());
            }
        }
        survey
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETHANOL_FRAGMENT: &str = r#"{
        "atoms": [
            {"aid": 1, "number": 8, "charge": 0},
            {"aid": 2, "number": 6},
            {"aid": 3, "number": 1, "x": 0.5}
        ],
        "bonds": [
            {"aid1": 1, "aid2": 2, "order": 1},
            {"aid1": 2, "aid2": 3, "order": 1, "style": 2}
        ]
    }"#;

    #[test]
    fn deserializes_record_body() {
        let mol: RawMolecule = serde_json::from_str(ETHANOL_FRAGMENT).unwrap();
        assert!(mol.id.is_empty());
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(mol.hydrogen_count(), 1);
        assert_eq!(mol.bonds[0].style(), 0);
        assert_eq!(mol.bonds[1].style(), 2);
    }

    #[test]
    fn bond_label_defaults_missing_style() {
        assert_eq!(RawBond::new(1, 2, 2).label().as_str(), "2-0");
        assert_eq!(RawBond::new(1, 2, 1).with_style(8).label().as_str(), "1-8");
    }

    #[test]
    fn survey_collects_attribute_names_and_labels() {
        let mol: RawMolecule = serde_json::from_str(ETHANOL_FRAGMENT).unwrap();
        let survey = AttributeSurvey::collect([&mol]);

        let atom_keys: Vec<_> = survey.atom_keys.iter().map(String::as_str).collect();
        assert_eq!(atom_keys, vec!["aid", "charge", "number", "x"]);

        let bond_keys: Vec<_> = survey.bond_keys.iter().map(String::as_str).collect();
        assert_eq!(bond_keys, vec!["aid1", "aid2", "order", "style"]);

        assert_eq!(survey.bond_labels.len(), 2);
    }

    #[test]
    fn survey_of_empty_corpus_is_empty() {
        let survey = AttributeSurvey::collect(std::iter::empty::<&RawMolecule>());
        assert_eq!(survey, AttributeSurvey::default());
    }
}
