use std::path::PathBuf;

use crate::cli::OutputOptions;

/// `<prefix>.feat.wo_h[.self_loop].idx.jsonl`
pub fn encoded_file_name(prefix: &str, self_loop: bool) -> String {
    format!("{prefix}.feat.wo_h{}.idx.jsonl", self_loop_tag(self_loop))
}

/// `<prefix>.bond_idx.wo_h[.self_loop].json`
pub fn vocabulary_file_name(prefix: &str, self_loop: bool) -> String {
    format!("{prefix}.bond_idx.wo_h{}.json", self_loop_tag(self_loop))
}

fn self_loop_tag(self_loop: bool) -> &'static str {
    if self_loop { ".self_loop" } else { "" }
}

/// Where each prep artifact goes. `None` means stdout for the encoded
/// stream and "not written" for the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub encoded: Option<PathBuf>,
    pub vocabulary: Option<PathBuf>,
    pub failures: Option<PathBuf>,
}

impl ArtifactPaths {
    /// Explicit paths win; otherwise `--out-dir` supplies default names.
    pub fn resolve(opts: &OutputOptions, self_loop: bool) -> Self {
        let in_dir = |name: String| opts.out_dir.as_ref().map(|dir| dir.join(name));

        Self {
            encoded: opts
                .output
                .clone()
                .or_else(|| in_dir(encoded_file_name(&opts.prefix, self_loop))),
            vocabulary: opts
                .vocab_out
                .clone()
                .or_else(|| in_dir(vocabulary_file_name(&opts.prefix, self_loop))),
            failures: opts.failures.clone(),
        }
    }
}
