//! Core data structures for raw molecule records and prepared graphs.
//!
//! - [`types`] – Identifier newtypes, bond labels, and the element symbol table.
//! - [`atom`] – Raw atom records with optional charge and passthrough attributes.
//! - [`molecule`] – Raw bonds, whole molecule records, and attribute surveys.
//! - [`graph`] – Hydrogen-free [`MoleculeGraph`]s and their flat [`EncodedGraph`] form.
//!
//! Raw records are addressed by [`OriginalId`](types::OriginalId); prepared
//! graphs by [`HeavyId`](types::HeavyId). The two id spaces are distinct types
//! so a stale id cannot be used against the wrong structure.
//!
//! [`MoleculeGraph`]: graph::MoleculeGraph
//! [`EncodedGraph`]: graph::EncodedGraph

pub mod atom;
pub mod graph;
pub mod molecule;
pub mod types;
