use molgraph_prep::io::Format;
use molgraph_prep::{FailurePolicy, LabelOrder as LibLabelOrder};

use crate::cli;

impl From<cli::InputFormat> for Format {
    fn from(f: cli::InputFormat) -> Self {
        match f {
            cli::InputFormat::Jsonl => Self::Records,
            cli::InputFormat::Sdf => Self::Sdf,
        }
    }
}

impl From<cli::Policy> for FailurePolicy {
    fn from(p: cli::Policy) -> Self {
        match p {
            cli::Policy::Abort => Self::Abort,
            cli::Policy::Skip => Self::Skip,
        }
    }
}

impl From<cli::LabelOrder> for LibLabelOrder {
    fn from(o: cli::LabelOrder) -> Self {
        match o {
            cli::LabelOrder::Sorted => Self::Sorted,
            cli::LabelOrder::FirstSeen => Self::FirstSeen,
        }
    }
}

pub fn policy_display_name(policy: FailurePolicy) -> &'static str {
    match policy {
        FailurePolicy::Abort => "abort",
        FailurePolicy::Skip => "skip",
    }
}

pub fn label_order_display_name(order: LibLabelOrder) -> &'static str {
    match order {
        LibLabelOrder::Sorted => "sorted",
        LibLabelOrder::FirstSeen => "first-seen",
    }
}
