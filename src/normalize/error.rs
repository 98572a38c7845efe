//! Error types for molecule normalization and encoding.
//!
//! Every structural failure names the molecule it came from along with the
//! atom ids involved, so a batch run can report (or skip) the offending
//! record without losing context.

use thiserror::Error;

use crate::model::types::{BondLabel, OriginalId};

/// Errors that can occur while preparing molecule graphs.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to parse a TOML configuration document.
    #[error("failed to parse preparation config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The same original atom id appears more than once in one record.
    #[error("molecule '{molecule}': atom id {aid} is declared more than once")]
    DuplicateAtom { molecule: String, aid: OriginalId },

    /// A bond references an atom id that the record does not declare.
    #[error("molecule '{molecule}': bond {aid1}-{aid2} references undeclared atom {missing}")]
    DanglingBond {
        molecule: String,
        aid1: OriginalId,
        aid2: OriginalId,
        missing: OriginalId,
    },

    /// A self-loop key collides with a real bond between an atom and itself.
    #[error("molecule '{molecule}': self-loop on atom {aid} collides with an existing bond")]
    SelfLoopCollision { molecule: String, aid: OriginalId },

    /// Hydrogen atoms not accounted for by heavy-atom neighbor counts.
    ///
    /// Occurs for hydrogens bonded to other hydrogens, unbonded hydrogens,
    /// or hydrogens bonded to more than one heavy atom.
    #[error(
        "molecule '{molecule}': {hydrogens} hydrogen atoms present but heavy atoms account for {attached}"
    )]
    HydrogenCountMismatch {
        molecule: String,
        hydrogens: usize,
        attached: usize,
    },

    /// A hydrogen atom carries a nonzero formal charge.
    #[error("molecule '{molecule}': hydrogen atom {aid} has nonzero charge {charge}")]
    ChargedHydrogen {
        molecule: String,
        aid: OriginalId,
        charge: i32,
    },

    /// Two edges connect the same ordered atom pair after hydrogen removal.
    #[error(
        "molecule '{molecule}': atom {aid} has more than one edge to atom {neighbor} (multigraphs are not supported)"
    )]
    Multigraph {
        molecule: String,
        aid: OriginalId,
        neighbor: OriginalId,
    },

    /// Graph position and heavy id disagree.
    #[error("molecule '{molecule}': atom at position {position} carries id {id}")]
    MisalignedAtom {
        molecule: String,
        position: usize,
        id: usize,
    },

    /// A bond label is absent from the vocabulary used for encoding.
    #[error("molecule '{molecule}': bond label '{label}' is not in the bond vocabulary")]
    UnknownBondLabel { molecule: String, label: BondLabel },

    /// Vocabulary codes do not form a bijection onto `0..n`.
    #[error("invalid bond vocabulary: {0}")]
    InvalidVocabulary(String),
}

impl Error {
    /// Returns `true` for violations of the chemical input assumptions
    /// (hydrogen bookkeeping and hydrogen charge).
    pub fn is_data_assumption_violation(&self) -> bool {
        matches!(
            self,
            Error::HydrogenCountMismatch { .. } | Error::ChargedHydrogen { .. }
        )
    }

    /// Molecule the error refers to, if it is molecule-scoped.
    pub fn molecule(&self) -> Option<&str> {
        match self {
            Error::DuplicateAtom { molecule, .. }
            | Error::DanglingBond { molecule, .. }
            | Error::SelfLoopCollision { molecule, .. }
            | Error::HydrogenCountMismatch { molecule, .. }
            | Error::ChargedHydrogen { molecule, .. }
            | Error::Multigraph { molecule, .. }
            | Error::MisalignedAtom { molecule, .. }
            | Error::UnknownBondLabel { molecule, .. } => Some(molecule),
            Error::ConfigParse(_) | Error::InvalidVocabulary(_) => None,
        }
    }

    pub(crate) fn dangling_bond(
        molecule: &str,
        aid1: OriginalId,
        aid2: OriginalId,
        missing: OriginalId,
    ) -> Self {
        Self::DanglingBond {
            molecule: molecule.to_string(),
            aid1,
            aid2,
            missing,
        }
    }

    pub(crate) fn multigraph(molecule: &str, aid: OriginalId, neighbor: OriginalId) -> Self {
        Self::Multigraph {
            molecule: molecule.to_string(),
            aid,
            neighbor,
        }
    }

    pub(crate) fn invalid_vocabulary(details: impl Into<String>) -> Self {
        Self::InvalidVocabulary(details.into())
    }
}
