use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use tracing::info;

use molgraph_prep::AttributeSurvey;

use super::{read_molecules, resolve_input_format};
use crate::cli::InspectArgs;
use crate::display::{
    Context as DisplayContext, Progress, print_attribute_survey, print_bond_label_distribution,
    print_corpus_summary, print_element_distribution,
};
use crate::io::stdin_is_tty;

const TOTAL_STEPS: u8 = 1;

/// Reads a corpus and prints its survey tables to stdout.
pub fn run_inspect(args: InspectArgs, ctx: DisplayContext) -> Result<()> {
    if args.input.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: mgprep inspect -i <INPUT> or pipe data via stdin."
        );
    }

    let input_format = resolve_input_format(&args.input)?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading molecules");
    let molecules = read_molecules(&args.input, input_format)?;
    let survey = AttributeSurvey::collect(&molecules);
    progress.complete_step(
        "Reading molecules",
        &[
            format!("Parse {} molecules ({})", molecules.len(), input_format),
            format!("Find {} distinct raw bond labels", survey.bond_labels.len()),
        ],
    );

    info!(
        atom_attributes = ?survey.atom_keys,
        bond_attributes = ?survey.bond_keys,
        "attribute names present in corpus"
    );

    let mut out = io::stdout().lock();
    print_corpus_summary(&mut out, &molecules);
    print_element_distribution(&mut out, &molecules);
    print_attribute_survey(&mut out, &survey);
    print_bond_label_distribution(&mut out, &molecules);
    out.flush().context("Failed to write survey")?;

    progress.finish("Inspection complete");

    Ok(())
}
