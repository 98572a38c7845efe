mod adjacency;
mod bond_map;
mod config;
mod corpus;
mod encode;
mod error;
mod hydrogen;
mod reindex;
mod vocabulary;

pub use bond_map::{AtomIndex, BondEntry, BondMap};
pub use config::{FailurePolicy, LabelOrder, PrepConfig};
pub use corpus::{PhaseOutcome, PreparedCorpus, encode_corpus, normalize_corpus, prepare};
pub use encode::encode;
pub use error::Error;
pub use vocabulary::BondVocabulary;

use crate::model::graph::MoleculeGraph;
use crate::model::molecule::RawMolecule;

/// Turns one raw, hydrogen-explicit molecule into a hydrogen-free,
/// reindexed [`MoleculeGraph`].
pub fn normalize(molecule: &RawMolecule, config: &PrepConfig) -> Result<MoleculeGraph, Error> {
    let index = AtomIndex::build(molecule)?;

    let bond_map = BondMap::build(molecule, &index, config.self_loop)?;

    let adjacency = adjacency::Adjacency::group(&bond_map, molecule.atoms.len());

    let collapsed = hydrogen::collapse(molecule, &adjacency)?;

    reindex::reindex(molecule, &collapsed, &adjacency)
}
