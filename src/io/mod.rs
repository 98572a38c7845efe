//! Reading raw molecule corpora and writing prepared artifacts.
//!
//! Two input formats are understood: tab-separated JSON records
//! (`<molecule-id>\t<JSON>`) and multi-block V2000 SD files. Prepared output
//! is written as tab-separated encoded graphs plus a JSON bond vocabulary.

use std::fmt;
use std::io::BufRead;

pub mod error;

mod records;
mod sdf;
mod vocab;

use crate::model::molecule::RawMolecule;

pub use error::Error;
pub use records::writer::{write_encoded, write_failures};
pub use vocab::{read_vocabulary, write_vocabulary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Records,
    Sdf,
    Vocabulary,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Records => write!(f, "JSON records"),
            Format::Sdf => write!(f, "SDF"),
            Format::Vocabulary => write!(f, "bond vocabulary"),
        }
    }
}

/// Reads a corpus of raw molecules in one of the molecule formats.
pub struct MoleculeReader<R: BufRead> {
    reader: R,
    format: Format,
}

impl<R: BufRead> MoleculeReader<R> {
    pub fn new(reader: R, format: Format) -> Self {
        Self { reader, format }
    }

    /// Reads every molecule, preserving input order.
    pub fn read(self) -> Result<Vec<RawMolecule>, Error> {
        match self.format {
            Format::Records => records::reader::read(self.reader),
            Format::Sdf => sdf::reader::read(self.reader),
            Format::Vocabulary => Err(Error::UnsupportedReadFormat(self.format)),
        }
    }
}
