use std::io::BufRead;

use crate::io::{Format, error::Error};
use crate::model::molecule::RawMolecule;

/// Reads `<molecule-id>\t<JSON>` records, skipping blank lines.
pub fn read<R: BufRead>(reader: R) -> Result<Vec<RawMolecule>, Error> {
    let mut molecules = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let content = line?;
        let ln = i + 1;
        if content.trim().is_empty() {
            continue;
        }
        molecules.push(parse_record(&content, ln)?);
    }
    Ok(molecules)
}

fn parse_record(line: &str, line_no: usize) -> Result<RawMolecule, Error> {
    let (id, body) = line.split_once('\t').ok_or_else(|| {
        Error::parse(
            Format::Records,
            line_no,
            "record must be '<molecule-id><TAB><JSON object>'",
        )
    })?;

    let id = id.trim();
    if id.is_empty() {
        return Err(Error::parse(Format::Records, line_no, "empty molecule id"));
    }

    let mut molecule: RawMolecule = serde_json::from_str(body.trim()).map_err(|e| {
        Error::parse(
            Format::Records,
            line_no,
            format!("invalid molecule JSON for '{id}': {e}"),
        )
    })?;
    molecule.id = id.to_string();
    Ok(molecule)
}
