use std::io::{Read, Write};

use crate::io::{Format, error::Error};
use crate::normalize::BondVocabulary;

/// Writes the vocabulary as a single JSON object in code order.
pub fn write_vocabulary<W: Write>(
    mut writer: W,
    vocabulary: &BondVocabulary,
) -> Result<(), Error> {
    serde_json::to_writer(&mut writer, vocabulary)
        .map_err(|e| Error::serialize("bond vocabulary", e))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Reads a vocabulary previously written by [`write_vocabulary`].
///
/// Codes must form exactly `0..n`.
pub fn read_vocabulary<R: Read>(reader: R) -> Result<BondVocabulary, Error> {
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            Error::Io { source: e.into() }
        } else {
            Error::parse(Format::Vocabulary, e.line(), e.to_string())
        }
    })
}
