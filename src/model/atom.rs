use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{HYDROGEN, OriginalId};

/// Single atom of a raw, hydrogen-explicit molecule record.
///
/// Attributes other than `aid`, `number` and `charge` are carried through
/// untouched in [`extra`](RawAtom::extra).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAtom {
    pub aid: OriginalId,
    pub number: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge: Option<i32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RawAtom {
    pub fn new(aid: u32, number: u8) -> Self {
        Self {
            aid: OriginalId(aid),
            number,
            charge: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_charge(mut self, charge: i32) -> Self {
        self.charge = Some(charge);
        self
    }

    /// Formal charge, defaulting to zero when the record omits it.
    #[inline]
    pub fn charge(&self) -> i32 {
        self.charge.unwrap_or(0)
    }

    #[inline]
    pub fn is_hydrogen(&self) -> bool {
        self.number == HYDROGEN
    }
}
