//! Preparation of molecule corpora for graph-based learning.
//!
//! Raw, hydrogen-explicit molecule records are turned into compact,
//! hydrogen-free graphs whose atoms are renumbered densely and whose bonds are
//! replaced by integer codes from a corpus-wide bond vocabulary.
//!
//! # Features
//!
//! - **Hydrogen collapse** - Explicit hydrogens become a per-atom count on the
//!   heavy atom they are bonded to
//! - **Dense reindexing** - Heavy atoms get ids `0..n` in ascending original id order
//! - **Self-loops** - Optional `"self"` edge on every atom
//! - **Bond vocabulary** - Deterministic label-to-code mapping built after all
//!   molecules are normalized, or loaded from a previous run
//! - **Failure policy** - Abort on the first bad molecule, or skip and report
//! - **Flexible I/O** - Tab-separated JSON records and V2000 SD files in;
//!   encoded graphs and vocabulary JSON out
//!
//! # Quick Start
//!
//! ```
//! use std::io::Cursor;
//! use molgraph_prep::io::{Format, MoleculeReader};
//! use molgraph_prep::{BondLabel, PrepConfig, PrepError, prepare};
//!
//! // Formaldehyde (CH₂O) with explicit hydrogens
//! let record = concat!(
//!     "CID712\t{\"atoms\": [",
//!     "{\"aid\": 1, \"number\": 6}, {\"aid\": 2, \"number\": 8}, ",
//!     "{\"aid\": 3, \"number\": 1}, {\"aid\": 4, \"number\": 1}], ",
//!     "\"bonds\": [",
//!     "{\"aid1\": 1, \"aid2\": 2, \"order\": 2}, ",
//!     "{\"aid1\": 1, \"aid2\": 3, \"order\": 1}, ",
//!     "{\"aid1\": 1, \"aid2\": 4, \"order\": 1}]}\n",
//! );
//! let molecules = MoleculeReader::new(Cursor::new(record), Format::Records)
//!     .read()
//!     .unwrap();
//!
//! let prepared = prepare(&molecules, &PrepConfig::default(), None)?;
//!
//! // Labels are coded in lexicographic order: "2-0" before "self"
//! assert_eq!(prepared.vocabulary.code(&BondLabel::from("2-0")), Some(0));
//! assert_eq!(prepared.vocabulary.code(&BondLabel::self_loop()), Some(1));
//!
//! let (id, graph) = &prepared.encoded[0];
//! assert_eq!(id, "CID712");
//! assert_eq!(graph.n_atom, 2);
//! assert_eq!(graph.atom_type, vec![6, 8]);
//! assert_eq!(graph.atom_feat, vec![[6, 2, 0], [8, 0, 0]]);
//!
//! // C=O in both directions plus one self-loop per atom
//! assert_eq!(graph.bond_type.len(), 4);
//! assert_eq!(prepared.hydrogens_removed, 2);
//! # Ok::<(), PrepError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] - Corpus readers and artifact writers
//! - [`prepare()`] - Full corpus pipeline
//! - [`normalize()`] - Single-molecule normalization
//! - [`PrepConfig`] - Self-loop, failure policy, and label order settings
//!
//! # Data Types
//!
//! ## Input Records
//!
//! - [`RawMolecule`] - Atoms and bonds keyed by original atom ids
//! - [`RawAtom`] - Atomic number, optional charge, passthrough attributes
//! - [`RawBond`] - Endpoints, order, and optional style
//! - [`AttributeSurvey`] - Attribute names and raw bond labels seen in a corpus
//!
//! ## Prepared Graphs
//!
//! - [`MoleculeGraph`] - Hydrogen-free graph with dense [`HeavyId`]s
//! - [`HeavyAtom`] - Heavy atom with hydrogen count and labelled neighbors
//! - [`EncodedGraph`] - Flat index-aligned arrays for one molecule
//! - [`BondVocabulary`] - Bond label to integer code mapping
//!
//! ## Pipeline Stages
//!
//! - [`AtomIndex`] - Original id to arena slot lookup
//! - [`BondMap`] - Directed, labelled bond entries with optional self-loops

mod model;
mod normalize;

pub mod io;

pub use model::atom::RawAtom;
pub use model::graph::{EncodedGraph, HeavyAtom, HeavyNeighbor, MoleculeGraph};
pub use model::molecule::{AttributeSurvey, RawBond, RawMolecule};
pub use model::types::{
    BondLabel, HYDROGEN, HeavyId, OriginalId, ParseElementError, atomic_number, element_symbol,
};

pub use normalize::{
    AtomIndex, BondEntry, BondMap, BondVocabulary, FailurePolicy, LabelOrder, PhaseOutcome,
    PrepConfig, PreparedCorpus, encode, encode_corpus, normalize, normalize_corpus, prepare,
};

pub use normalize::Error as PrepError;
