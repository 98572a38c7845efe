use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use molgraph_prep::{AttributeSurvey, PreparedCorpus, RawMolecule, element_symbol};

use crate::util::text::{truncate, wrap};

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();
const MAX_DISTRIBUTION_ROWS: usize = 15;

pub fn print_corpus_summary(out: &mut impl Write, molecules: &[RawMolecule]) {
    let atoms: usize = molecules.iter().map(RawMolecule::atom_count).sum();
    let bonds: usize = molecules.iter().map(RawMolecule::bond_count).sum();
    let hydrogens: usize = molecules.iter().map(RawMolecule::hydrogen_count).sum();

    let rows = vec![
        ("Molecules", molecules.len().to_string()),
        ("Atoms", atoms.to_string()),
        ("Heavy Atoms", (atoms - hydrogens).to_string()),
        ("Hydrogens", hydrogens.to_string()),
        ("Hydrogen Share", format!("{:.1}%", percent(hydrogens, atoms))),
        ("Bonds", bonds.to_string()),
    ];

    print_kv_table(out, "Corpus Summary", &rows);
}

pub fn print_element_distribution(out: &mut impl Write, molecules: &[RawMolecule]) {
    let mut counts: HashMap<u8, usize> = HashMap::new();
    for atom in molecules.iter().flat_map(|m| &m.atoms) {
        *counts.entry(atom.number).or_insert(0) += 1;
    }

    let total = counts.values().sum();
    let mut sorted: Vec<_> = counts
        .into_iter()
        .map(|(number, count)| {
            let name = element_symbol(number)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Z={}", number));
            (name, count)
        })
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    print_distribution_table(out, "Element Distribution", "Element", &sorted, total);
}

pub fn print_bond_label_distribution(out: &mut impl Write, molecules: &[RawMolecule]) {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for bond in molecules.iter().flat_map(|m| &m.bonds) {
        *counts.entry(bond.label().to_string()).or_insert(0) += 1;
    }

    let total = counts.values().sum();
    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    print_distribution_table(out, "Raw Bond Labels", "Label", &sorted, total);
}

pub fn print_attribute_survey(out: &mut impl Write, survey: &AttributeSurvey) {
    let join = |names: Vec<&str>| {
        if names.is_empty() {
            "-".to_string()
        } else {
            names.join(", ")
        }
    };

    let rows = vec![
        (
            "Atom Attributes",
            join(survey.atom_keys.iter().map(String::as_str).collect()),
        ),
        (
            "Bond Attributes",
            join(survey.bond_keys.iter().map(String::as_str).collect()),
        ),
        (
            "Bond Labels",
            join(survey.bond_labels.iter().map(|l| l.as_str()).collect()),
        ),
    ];

    print_wrapped_table(out, "Attribute Survey", &rows);
}

pub fn print_prep_summary(out: &mut impl Write, read: usize, prepared: &PreparedCorpus) {
    let heavy: usize = prepared.encoded.iter().map(|(_, g)| g.n_atom).sum();
    let edges: usize = prepared.encoded.iter().map(|(_, g)| g.edge_count()).sum();

    let rows = vec![
        ("Molecules Read", read.to_string()),
        ("Prepared", prepared.encoded.len().to_string()),
        ("Skipped", prepared.failures.len().to_string()),
        ("Heavy Atoms", heavy.to_string()),
        ("Directed Edges", edges.to_string()),
        ("H Collapsed", prepared.hydrogens_removed.to_string()),
        ("Bond Labels", prepared.vocabulary.len().to_string()),
    ];

    print_kv_table(out, "Preparation Summary", &rows);
}

/// Vocabulary in code order with the share of encoded edges using each code.
pub fn print_vocabulary(out: &mut impl Write, prepared: &PreparedCorpus) {
    let mut usage = vec![0usize; prepared.vocabulary.len()];
    for code in prepared.encoded.iter().flat_map(|(_, g)| &g.bond_type) {
        if let Some(slot) = usage.get_mut(*code as usize) {
            *slot += 1;
        }
    }

    let total = usage.iter().sum();
    let data: Vec<_> = prepared
        .vocabulary
        .iter()
        .map(|(label, code)| {
            let count = usage.get(code as usize).copied().unwrap_or(0);
            (format!("{}: {}", code, label), count)
        })
        .collect();

    print_distribution_table(out, "Bond Vocabulary", "Code: Label", &data, total);
}

fn print_distribution_table(
    out: &mut impl Write,
    title: &str,
    header: &str,
    data: &[(String, usize)],
    total: usize,
) {
    let name_w = 12usize;
    let count_w = 8usize;
    let sep_overhead = 6;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + count_w + sep_overhead);
    let max_bar_width = dist_w.saturating_sub(8).min(20);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{}┬{}┬{}┐",
        INDENT,
        "─".repeat(name_w + 2),
        "─".repeat(count_w + 2),
        "─".repeat(dist_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
        INDENT,
        truncate(header, name_w),
        "Count",
        "Share",
    );
    let _ = writeln!(
        out,
        "{}├{}┼{}┼{}┤",
        INDENT,
        "─".repeat(name_w + 2),
        "─".repeat(count_w + 2),
        "─".repeat(dist_w + 2)
    );

    for (name, count) in data.iter().take(MAX_DISTRIBUTION_ROWS) {
        let pct = percent(*count, total);
        let dist_cell = format!("{}  {:>5.1}%", make_bar(pct, max_bar_width), pct);
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            truncate(name, name_w),
            count,
            dist_cell,
        );
    }

    if data.len() > MAX_DISTRIBUTION_ROWS {
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            "...",
            "...",
            format!("({} more)", data.len() - MAX_DISTRIBUTION_ROWS),
        );
    }

    let _ = writeln!(
        out,
        "{}└{}┴{}┴{}┘",
        INDENT,
        "─".repeat(name_w + 2),
        "─".repeat(count_w + 2),
        "─".repeat(dist_w + 2)
    );
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    print_two_column_header(out, title, key_w, val_w);

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
        );
    }

    print_two_column_footer(out, key_w, val_w);
}

/// Like [`print_kv_table`], but long values wrap onto continuation rows.
fn print_wrapped_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    print_two_column_header(out, title, key_w, val_w);

    for (key, val) in rows {
        for (i, line) in wrap(val, val_w).iter().enumerate() {
            let key_cell = if i == 0 { truncate(key, key_w) } else { String::new() };
            let _ = writeln!(
                out,
                "{}│ {:<key_w$} │ {:<val_w$} │",
                INDENT,
                key_cell,
                truncate(line, val_w),
            );
        }
    }

    print_two_column_footer(out, key_w, val_w);
}

fn print_two_column_header(out: &mut impl Write, title: &str, key_w: usize, val_w: usize) {
    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{}┬{}┐",
        INDENT,
        "─".repeat(key_w + 2),
        "─".repeat(val_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT, "Metric", "Value",
    );
    let _ = writeln!(
        out,
        "{}├{}┼{}┤",
        INDENT,
        "─".repeat(key_w + 2),
        "─".repeat(val_w + 2)
    );
}

fn print_two_column_footer(out: &mut impl Write, key_w: usize, val_w: usize) {
    let _ = writeln!(
        out,
        "{}└{}┴{}┘",
        INDENT,
        "─".repeat(key_w + 2),
        "─".repeat(val_w + 2)
    );
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = ((pct / 100.0) * max_width as f64).round() as usize;
    let empty = max_width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
