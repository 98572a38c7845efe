use serde::Deserialize;

use super::error::Error;

/// Settings for a preparation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrepConfig {
    /// Inject a `"self"` edge on every atom.
    pub self_loop: bool,
    pub policy: FailurePolicy,
    pub label_order: LabelOrder,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            self_loop: true,
            policy: FailurePolicy::Abort,
            label_order: LabelOrder::Sorted,
        }
    }
}

impl PrepConfig {
    pub fn from_toml(source: &str) -> Result<Self, Error> {
        Ok(toml::from_str(source)?)
    }
}

/// What a corpus run does when a single molecule fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failing molecule (in input order).
    #[default]
    Abort,
    /// Log the failure, drop the molecule, and keep going.
    Skip,
}

/// Order in which distinct bond labels receive vocabulary codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelOrder {
    /// Lexicographic by label string; stable across runs for a fixed label set.
    #[default]
    Sorted,
    /// Order of first appearance while scanning the corpus.
    FirstSeen,
}
