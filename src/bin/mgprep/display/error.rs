use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

const INNER: usize = 62;

/// Renders an error report as a framed box on stderr: the top-level
/// message, every cause in the chain, then any hints we can offer.
pub fn print_error(err: &Error) {
    let mut report = Frame::default();

    report.title("✗ Error");
    report.text(&err.to_string(), 2);

    for cause in err.chain().skip(1) {
        report.rule();
        report.text("Caused by:", 2);
        report.text(&cause.to_string(), 4);
    }

    if let Some(hints) = HintCollector::collect(err) {
        report.rule();
        report.text("Hints:", 2);
        for hint in hints {
            report.bullet(&hint);
        }
    }

    let mut stderr = io::stderr().lock();
    let _ = report.render(&mut stderr);
}

#[derive(Default)]
struct Frame {
    rows: Vec<Row>,
}

enum Row {
    Line(String),
    Rule,
}

impl Frame {
    fn title(&mut self, title: &str) {
        self.text(title, 2);
        self.rule();
    }

    fn rule(&mut self) {
        self.rows.push(Row::Rule);
    }

    fn text(&mut self, text: &str, indent: usize) {
        let width = INNER - indent - 1;
        for line in wrap(text, width) {
            self.rows.push(Row::Line(format!("{}{}", " ".repeat(indent), line)));
        }
    }

    fn bullet(&mut self, hint: &str) {
        let width = INNER - 7;
        for (i, line) in wrap(hint, width).into_iter().enumerate() {
            let marker = if i == 0 { "• " } else { "  " };
            self.rows.push(Row::Line(format!("    {marker}{line}")));
        }
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let bar = "═".repeat(INNER);
        let thin = "─".repeat(INNER);

        writeln!(out)?;
        writeln!(out, "   ╔{bar}╗")?;
        for row in &self.rows {
            match row {
                Row::Line(text) => {
                    let pad = INNER.saturating_sub(text.chars().count());
                    writeln!(out, "   ║{text}{}║", " ".repeat(pad))?;
                }
                Row::Rule => writeln!(out, "   ╟{thin}╢")?,
            }
        }
        writeln!(out, "   ╚{bar}╝")?;
        writeln!(out)
    }
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self {
            hints: Vec::new(),
            has_typed_hints: false,
        };

        collector.collect_io_hints(err);
        collector.collect_prep_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        (!collector.hints.is_empty()).then_some(collector.hints)
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use molgraph_prep::io::Error as IoError;

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };

        self.mark_typed();

        match io_err {
            IoError::Io { source } => self.collect_os_hints(source),

            IoError::Parse {
                format, line, ..
            } => {
                self.add(format!("Parser stopped near line {} of the {} input", line, format));
                self.add("Inspect the file around that line for malformed entries");
                self.add_parse_hints(*format);
            }

            IoError::UnsupportedReadFormat(fmt) => {
                self.add(format!("The '{}' format cannot be read as molecules", fmt));
                self.add("Supported input formats: jsonl, sdf");
            }

            IoError::Serialize { what, .. } => {
                self.add(format!("Could not serialize the {}", what));
                self.add("This indicates a bug; please report it with the input");
            }
        }
    }

    fn collect_os_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("A path given on the command line does not exist");
                self.add("Double-check -i, --vocab and --config arguments");
            }

            ErrorKind::PermissionDenied => {
                self.add("The process may not read or write this path");
                self.add("Pick an output directory you own, or fix the file mode");
            }

            ErrorKind::InvalidData => {
                self.add("Input is not valid UTF-8 text");
                self.add("Verify the file is not compressed or binary");
            }

            ErrorKind::WriteZero | ErrorKind::StorageFull => {
                self.add("The output device ran out of space");
                self.add("Free some space or point --out-dir elsewhere");
            }

            ErrorKind::BrokenPipe => {
                self.add("The process reading our stdout exited early");
                self.add("Harmless when piping into `head` or similar");
            }

            _ => {
                self.add(format!("Low-level I/O failure ({})", source.kind()));
            }
        }
    }

    fn add_parse_hints(&mut self, format: molgraph_prep::io::Format) {
        use molgraph_prep::io::Format;

        match format {
            Format::Records => {
                self.add("Records are '<molecule-id><TAB><JSON>' with one molecule per line");
                self.add("Atoms need 'aid' and 'number'; bonds need 'aid1', 'aid2', 'order'");
                self.add("Try specifying --infmt if the extension is misleading");
            }

            Format::Sdf => {
                self.add("SDF: only V2000 connection tables are supported");
                self.add("SDF: check the counts line against the atom and bond blocks");
            }

            Format::Vocabulary => {
                self.add("Vocabulary files hold one JSON object of label to code");
                self.add("Pass a file previously written with --vocab-out");
            }
        }
    }

    fn collect_prep_hints(&mut self, err: &Error) {
        use molgraph_prep::PrepError;

        let Some(prep_err) = err.downcast_ref::<PrepError>() else {
            return;
        };

        self.mark_typed();

        match prep_err {
            PrepError::ConfigParse(_) => {
                self.add("Preparation config has invalid TOML or an unknown key");
                self.add("Accepted keys: self_loop, policy, label_order");
            }

            PrepError::DuplicateAtom { molecule, aid } => {
                self.add(format!("Molecule '{}' declares atom {} twice", molecule, aid));
                self.add_skip_hint();
            }

            PrepError::DanglingBond {
                molecule, missing, ..
            } => {
                self.add(format!(
                    "A bond in '{}' points at atom {}, which is not declared",
                    molecule, missing
                ));
                self.add_skip_hint();
            }

            PrepError::SelfLoopCollision { molecule, .. } => {
                self.add(format!(
                    "Molecule '{}' already bonds an atom to itself",
                    molecule
                ));
                self.add("Use --no-self-loop to prepare without self-loop edges");
                self.add_skip_hint();
            }

            PrepError::HydrogenCountMismatch { .. } | PrepError::ChargedHydrogen { .. } => {
                self.add("Every hydrogen must be neutral and bonded to exactly one heavy atom");
                self.add("Molecular hydrogen (H2) and bare protons cannot be collapsed");
                self.add_skip_hint();
            }

            PrepError::Multigraph { molecule, .. } => {
                self.add(format!(
                    "Molecule '{}' lists the same heavy-atom bond more than once",
                    molecule
                ));
                self.add_skip_hint();
            }

            PrepError::MisalignedAtom { .. } => {
                self.add("Heavy atom ids are out of step with their positions");
                self.add("This indicates a bug; please report it with the input");
            }

            PrepError::UnknownBondLabel { label, .. } => {
                self.add(format!(
                    "Bond label '{}' has no code in the vocabulary given via --vocab",
                    label
                ));
                self.add("Rebuild the vocabulary from a corpus that covers this label");
                self.add_skip_hint();
            }

            PrepError::InvalidVocabulary(_) => {
                self.add("Vocabulary codes must be exactly 0..n, one label per code");
            }
        }
    }

    fn add_skip_hint(&mut self) {
        self.add("Use --policy skip to drop failing molecules and --failures to list them");
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = chain_lowercase(err);

        if msg.contains("stdout is a terminal") {
            self.add("Encoded graphs are not printed to an interactive terminal");
            self.add("Use -o <FILE>, --out-dir <DIR>, or pipe the output");
            return;
        }

        if msg.contains("terminal") || msg.contains("stdin") {
            self.add("mgprep will not read molecules from an interactive terminal");
            self.add("Pass a corpus with -i, or pipe one in: cat corpus.jsonl | mgprep prep");
            return;
        }

        if msg.contains("thread pool") {
            self.add("--threads can only be applied once per process");
            return;
        }

        if msg.contains("permission denied") {
            self.add("The process may not read or write this path");
        }
    }
}

fn chain_lowercase(err: &Error) -> String {
    err.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
}
