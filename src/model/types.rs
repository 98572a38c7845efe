use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

/// Atom identifier as it appears in the raw input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OriginalId(pub u32);

impl fmt::Display for OriginalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential identifier of a heavy atom after hydrogen removal.
///
/// Heavy ids are contiguous over `0..n` and double as the atom's position
/// inside a [`MoleculeGraph`](super::graph::MoleculeGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeavyId(pub usize);

impl HeavyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for HeavyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Composite bond key: `"{order}-{style}"` for real bonds, `"self"` for
/// synthetic self-loop edges.
///
/// Labels order lexicographically on their string form, which is the order
/// used for sorted vocabulary construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BondLabel(String);

impl BondLabel {
    pub const SELF_LOOP: &'static str = "self";

    pub fn bond(order: u32, style: u32) -> Self {
        Self(format!("{order}-{style}"))
    }

    pub fn self_loop() -> Self {
        Self(Self::SELF_LOOP.to_string())
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.0 == Self::SELF_LOOP
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BondLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BondLabel {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

pub const HYDROGEN: u8 = 1;

const SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Resolves an element symbol (case-insensitive) to its atomic number.
///
/// Deuterium and tritium labels (`D`, `T`) resolve to hydrogen.
pub fn atomic_number(symbol: &str) -> Result<u8, ParseElementError> {
    let trimmed = symbol.trim();
    if trimmed.eq_ignore_ascii_case("D") || trimmed.eq_ignore_ascii_case("T") {
        return Ok(HYDROGEN);
    }
    SYMBOLS
        .iter()
        .position(|s| s.eq_ignore_ascii_case(trimmed))
        .map(|idx| idx as u8 + 1)
        .ok_or_else(|| ParseElementError(symbol.to_string()))
}

/// Returns the element symbol for an atomic number, if it is in range.
pub fn element_symbol(number: u8) -> Option<&'static str> {
    SYMBOLS.get((number as usize).checked_sub(1)?).copied()
}
