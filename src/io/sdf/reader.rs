use std::io::BufRead;

use crate::io::{Format, error::Error};
use crate::model::{
    atom::RawAtom,
    molecule::{RawBond, RawMolecule},
    types::atomic_number,
};

type Line = (usize, String);

/// Reads every V2000 molecule block of an SD file.
///
/// Atom ids are the 1-based positions in the atom block. The molecule id is
/// the title line, or the 1-based block number when the title is blank.
pub fn read<R: BufRead>(reader: R) -> Result<Vec<RawMolecule>, Error> {
    let mut molecules = Vec::new();
    for (block_no, block) in collect_blocks(reader)?.into_iter().enumerate() {
        molecules.push(parse_block(&block, block_no + 1)?);
    }
    Ok(molecules)
}

fn collect_blocks<R: BufRead>(reader: R) -> Result<Vec<Vec<Line>>, Error> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let content = line?;
        if content.trim() == "$$$$" {
            blocks.push(std::mem::take(&mut current));
            continue;
        }
        current.push((i + 1, content));
    }
    if current.iter().any(|(_, l)| !l.trim().is_empty()) {
        blocks.push(current);
    }
    Ok(blocks)
}

fn parse_block(lines: &[Line], block_no: usize) -> Result<RawMolecule, Error> {
    if lines.len() < 4 {
        let ln = lines.first().map(|(ln, _)| *ln).unwrap_or(1);
        return Err(Error::parse(
            Format::Sdf,
            ln,
            "SDF block must contain at least a header and counts line",
        ));
    }

    let counts_line_no = lines[3].0;
    let counts_line = &lines[3].1;
    if counts_line.contains("V3000") {
        return Err(Error::parse(
            Format::Sdf,
            counts_line_no,
            "V3000 is not supported",
        ));
    }

    let (atom_count, bond_count) = parse_counts(counts_line, counts_line_no)?;
    let atom_start = 4;
    let bond_start = atom_start + atom_count;
    let props_start = bond_start + bond_count;

    if lines.len() < props_start {
        return Err(Error::parse(
            Format::Sdf,
            lines.last().map(|(ln, _)| *ln).unwrap_or(counts_line_no),
            "SDF block ended before atoms/bonds were fully specified",
        ));
    }

    let title = lines[0].1.trim();
    let id = if title.is_empty() {
        block_no.to_string()
    } else {
        title.to_string()
    };

    let mut atoms = parse_atoms(&lines[atom_start..bond_start])?;
    let bonds = parse_bonds(&lines[bond_start..props_start], atom_count)?;
    apply_charge_properties(&lines[props_start..], &mut atoms)?;

    Ok(RawMolecule { id, atoms, bonds })
}

fn parse_counts(line: &str, line_no: usize) -> Result<(usize, usize), Error> {
    if !line.is_ascii() {
        return Err(Error::parse(Format::Sdf, line_no, "counts line is not ASCII"));
    }
    let padded = format!("{line:<6}");
    let atoms = padded[0..3]
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::parse(Format::Sdf, line_no, "invalid atom count"))?;
    let bonds = padded[3..6]
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::parse(Format::Sdf, line_no, "invalid bond count"))?;
    Ok((atoms, bonds))
}

fn parse_atoms(lines: &[Line]) -> Result<Vec<RawAtom>, Error> {
    let mut atoms = Vec::with_capacity(lines.len());
    for (idx, (ln, raw)) in lines.iter().enumerate() {
        if !raw.is_ascii() {
            return Err(Error::parse(Format::Sdf, *ln, "atom line is not ASCII"));
        }
        let padded = format!("{raw:<39}");
        let symbol = padded[31..34].trim();
        let number = atomic_number(symbol)
            .map_err(|e| Error::parse(Format::Sdf, *ln, e.to_string()))?;

        let charge_code = padded[36..39].trim();
        let charge = if charge_code.is_empty() {
            0
        } else {
            let code = charge_code
                .parse::<u8>()
                .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid charge field in atom line"))?;
            charge_from_ctfile(code)
                .ok_or_else(|| Error::parse(Format::Sdf, *ln, "unsupported charge code"))?
        };

        let mut atom = RawAtom::new(idx as u32 + 1, number);
        if charge != 0 {
            atom = atom.with_charge(charge);
        }
        atoms.push(atom);
    }
    Ok(atoms)
}

fn parse_bonds(lines: &[Line], atom_count: usize) -> Result<Vec<RawBond>, Error> {
    let mut bonds = Vec::with_capacity(lines.len());
    for (ln, raw) in lines {
        let tokens: Vec<_> = raw.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(Error::parse(Format::Sdf, *ln, "invalid bond line"));
        }

        let a1 = tokens[0]
            .parse::<usize>()
            .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid first atom index"))?;
        let a2 = tokens[1]
            .parse::<usize>()
            .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid second atom index"))?;
        let order = tokens[2]
            .parse::<u32>()
            .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid bond order value"))?;
        let style = match tokens.get(3) {
            Some(t) => t
                .parse::<u32>()
                .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid bond stereo value"))?,
            None => 0,
        };

        if a1 == 0 || a2 == 0 || a1 > atom_count || a2 > atom_count {
            return Err(Error::parse(
                Format::Sdf,
                *ln,
                "bond references atom outside declared range",
            ));
        }

        let mut bond = RawBond::new(a1 as u32, a2 as u32, order);
        if style != 0 {
            bond = bond.with_style(style);
        }
        bonds.push(bond);
    }
    Ok(bonds)
}

/// `M  CHG` lines replace every atom-block charge in the molecule.
fn apply_charge_properties(lines: &[Line], atoms: &mut [RawAtom]) -> Result<(), Error> {
    let mut seen_chg = false;
    for (ln, raw) in lines {
        if raw.starts_with("M  END") {
            break;
        }
        let Some(rest) = raw.strip_prefix("M  CHG") else {
            continue;
        };

        if !seen_chg {
            for atom in atoms.iter_mut() {
                atom.charge = None;
            }
            seen_chg = true;
        }

        let tokens: Vec<_> = rest.split_whitespace().collect();
        let count = tokens
            .first()
            .and_then(|t| t.parse::<usize>().ok())
            .ok_or_else(|| Error::parse(Format::Sdf, *ln, "invalid M  CHG entry count"))?;
        if tokens.len() < 1 + 2 * count {
            return Err(Error::parse(Format::Sdf, *ln, "truncated M  CHG line"));
        }

        for pair in tokens[1..1 + 2 * count].chunks(2) {
            let idx = pair[0]
                .parse::<usize>()
                .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid M  CHG atom index"))?;
            let charge = pair[1]
                .parse::<i32>()
                .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid M  CHG charge value"))?;
            let atom = idx
                .checked_sub(1)
                .and_then(|i| atoms.get_mut(i))
                .ok_or_else(|| {
                    Error::parse(Format::Sdf, *ln, "M  CHG references atom outside range")
                })?;
            atom.charge = Some(charge);
        }
    }
    Ok(())
}

fn charge_from_ctfile(code: u8) -> Option<i32> {
    match code {
        0 | 4 => Some(0),
        1 => Some(3),
        2 => Some(2),
        3 => Some(1),
        5 => Some(-1),
        6 => Some(-2),
        7 => Some(-3),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::OriginalId;
    use std::io::Cursor;

    const METHANOL: &str = "\
methanol
  handwritten

  6  5  0  0  0  0  0  0  0  0999 V2000
   -0.3700    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.0500    0.0000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
   -0.7300    1.0300    0.0000 H   0  0  0  0  0  0  0  0  0  0  0  0
   -0.7300   -0.5100    0.8900 H   0  0  0  0  0  0  0  0  0  0  0  0
   -0.7300   -0.5100   -0.8900 H   0  0  0  0  0  0  0  0  0  0  0  0
    1.3700    0.9100    0.0000 H   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
  1  3  1  0
  1  4  1  0
  1  5  1  0
  2  6  1  0
M  END
$$$$
";

    const ACETATE: &str = "
  handwritten

  4  3  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.5000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    2.2000    1.0000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
    2.2000   -1.0000    0.0000 O   0  5  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
  2  3  2  0
  2  4  1  6
M  END
> <PUBCHEM_NOTE>
not a property line
$$$$
";

    #[test]
    fn reads_atoms_and_bonds() {
        let molecules = read(Cursor::new(METHANOL)).unwrap();
        assert_eq!(molecules.len(), 1);
        let mol = &molecules[0];
        assert_eq!(mol.id, "methanol");
        assert_eq!(mol.atoms.len(), 6);
        assert_eq!(mol.atoms[0].number, 6);
        assert_eq!(mol.atoms[1].number, 8);
        assert_eq!(mol.atoms[5].aid, OriginalId(6));
        assert_eq!(mol.hydrogen_count(), 4);
        assert_eq!(mol.bonds.len(), 5);
        assert_eq!(mol.bonds[4].aid1, OriginalId(2));
        assert_eq!(mol.bonds[4].aid2, OriginalId(6));
    }

    #[test]
    fn reads_multiple_blocks_and_falls_back_to_block_number() {
        let input = format!("{METHANOL}{ACETATE}");
        let molecules = read(Cursor::new(input)).unwrap();
        assert_eq!(molecules.len(), 2);
        assert_eq!(molecules[1].id, "2");
    }

    #[test]
    fn reads_atom_block_charge_and_bond_stereo() {
        let molecules = read(Cursor::new(ACETATE)).unwrap();
        let mol = &molecules[0];
        assert_eq!(mol.atoms[3].charge(), -1);
        assert_eq!(mol.atoms[2].charge, None);
        assert_eq!(mol.bonds[1].label().as_str(), "2-0");
        assert_eq!(mol.bonds[2].label().as_str(), "1-6");
    }

    #[test]
    fn chg_property_overrides_atom_block_charges() {
        let input = ACETATE.replace("M  END", "M  CHG  1   3  -1\nM  END");
        let molecules = read(Cursor::new(input)).unwrap();
        let mol = &molecules[0];
        assert_eq!(mol.atoms[2].charge(), -1);
        assert_eq!(mol.atoms[3].charge(), 0);
    }

    #[test]
    fn errors_on_v3000() {
        let input = METHANOL.replace("V2000", "V3000");
        let result = read(Cursor::new(input));
        assert!(matches!(
            result,
            Err(Error::Parse {
                format: Format::Sdf,
                line: 4,
                ..
            })
        ));
    }

    #[test]
    fn errors_on_unknown_element() {
        let input = METHANOL.replacen(" O ", " Qq", 1);
        let result = read(Cursor::new(input));
        assert!(matches!(result, Err(Error::Parse { line: 6, .. })));
    }

    #[test]
    fn errors_on_bond_out_of_range() {
        let input = METHANOL.replace("  2  6  1  0", "  2  9  1  0");
        let result = read(Cursor::new(input));
        assert!(matches!(result, Err(Error::Parse { line: 15, .. })));
    }

    #[test]
    fn errors_on_non_ascii_counts_line() {
        let input = "t\n\n\n  é  0  0  0  0  0  0  0  0999 V2000\nM  END\n$$$$\n";
        let result = read(Cursor::new(input));
        assert!(matches!(
            result,
            Err(Error::Parse {
                format: Format::Sdf,
                line: 4,
                ..
            })
        ));
    }

    #[test]
    fn errors_on_truncated_block() {
        let input = "t\n\n\n  3  0  0  0  0  0  0  0  0  0999 V2000\n$$$$\n";
        let result = read(Cursor::new(input));
        assert!(matches!(result, Err(Error::Parse { .. })));
    }
}
