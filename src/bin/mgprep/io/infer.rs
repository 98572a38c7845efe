use std::path::Path;

use molgraph_prep::io::Format;

pub fn input(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jsonl" | "tsv" => Some(Format::Records),
        "sdf" | "mol" => Some(Format::Sdf),
        _ => None,
    }
}
