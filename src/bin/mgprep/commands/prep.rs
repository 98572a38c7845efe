use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use molgraph_prep::io::{write_encoded, write_failures, write_vocabulary};
use molgraph_prep::{AttributeSurvey, PrepConfig, PreparedCorpus, RawMolecule, prepare};

use super::{read_molecules, resolve_input_format};
use crate::cli::PrepArgs;
use crate::config::{build_prep_config, configure_threads, load_vocabulary};
use crate::display::{Context as DisplayContext, Progress, print_prep_summary, print_vocabulary};
use crate::io::{ArtifactPaths, create_output, display_name, stdin_is_tty, stdout_is_tty};
use crate::util::convert::{label_order_display_name, policy_display_name};

const TOTAL_STEPS: u8 = 3;

pub fn run_prep(args: PrepArgs, ctx: DisplayContext) -> Result<()> {
    if args.input.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: mgprep prep -i <INPUT> or pipe data via stdin."
        );
    }

    let input_format = resolve_input_format(&args.input)?;
    let config = build_prep_config(&args.prep)?;
    let paths = ArtifactPaths::resolve(&args.output, config.self_loop);

    if paths.encoded.is_none() && stdout_is_tty() {
        bail!(
            "No output specified and stdout is a terminal.\n\nUsage: mgprep prep -i <INPUT> -o <OUTPUT>, --out-dir <DIR>, or pipe output."
        );
    }

    configure_threads(args.prep.threads)?;
    let fixed_vocabulary = load_vocabulary(args.prep.vocab.as_deref())?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading molecules");
    let molecules = read_molecules(&args.input, input_format)?;
    log_attribute_survey(&molecules);
    progress.complete_step(
        "Reading molecules",
        &[format!("Parse {} molecules ({})", molecules.len(), input_format)],
    );

    progress.step("Preparing graphs");
    let loaded = fixed_vocabulary.is_some();
    let prepared =
        prepare(&molecules, &config, fixed_vocabulary).context("Graph preparation failed")?;
    progress.complete_step("Preparing graphs", &build_prep_substeps(&config, &prepared, loaded));

    if !prepared.failures.is_empty() {
        warn!(
            skipped = prepared.failures.len(),
            "some molecules were skipped under the skip policy"
        );
    }

    if ctx.interactive {
        let mut err = io::stderr().lock();
        print_prep_summary(&mut err, molecules.len(), &prepared);
        print_vocabulary(&mut err, &prepared);
    }

    progress.step("Writing artifacts");
    write_artifacts(&prepared, &paths)?;
    progress.complete_step("Writing artifacts", &build_write_substeps(&paths, &prepared));

    progress.finish("Preparation complete");

    Ok(())
}

fn log_attribute_survey(molecules: &[RawMolecule]) {
    let survey = AttributeSurvey::collect(molecules);
    info!(
        atom_attributes = ?survey.atom_keys,
        bond_attributes = ?survey.bond_keys,
        "attribute names present in corpus"
    );
}

fn build_prep_substeps(
    config: &PrepConfig,
    prepared: &PreparedCorpus,
    loaded: bool,
) -> Vec<String> {
    let mut steps = vec![format!(
        "Collapse {} hydrogens into heavy atoms",
        prepared.hydrogens_removed
    )];

    if config.self_loop {
        steps.push("Add self-loop edges".to_string());
    }

    if loaded {
        steps.push(format!(
            "Use loaded bond vocabulary ({} labels)",
            prepared.vocabulary.len()
        ));
    } else {
        steps.push(format!(
            "Build bond vocabulary ({} labels, {})",
            prepared.vocabulary.len(),
            label_order_display_name(config.label_order)
        ));
    }

    steps.push(format!("Encode {} graphs", prepared.encoded.len()));

    if !prepared.failures.is_empty() {
        steps.push(format!(
            "Skip {} molecules (policy: {})",
            prepared.failures.len(),
            policy_display_name(config.policy)
        ));
    }

    steps
}

fn build_write_substeps(paths: &ArtifactPaths, prepared: &PreparedCorpus) -> Vec<String> {
    let mut steps = vec![format!(
        "Write encoded graphs → {}",
        display_name(paths.encoded.as_deref())
    )];

    if let Some(path) = &paths.vocabulary {
        steps.push(format!("Write bond vocabulary → {}", display_name(Some(path))));
    }

    if let Some(path) = &paths.failures {
        steps.push(format!(
            "Write {} failures → {}",
            prepared.failures.len(),
            display_name(Some(path))
        ));
    }

    steps
}

fn write_artifacts(prepared: &PreparedCorpus, paths: &ArtifactPaths) -> Result<()> {
    let writer = create_output(paths.encoded.as_deref())?;
    write_encoded(writer, &prepared.encoded).context("Failed to write encoded graphs")?;

    match &paths.vocabulary {
        Some(path) => {
            let writer = create_output(Some(path))?;
            write_vocabulary(writer, &prepared.vocabulary)
                .context("Failed to write bond vocabulary")?;
        }
        None => warn!("bond vocabulary not written; pass --vocab-out or --out-dir to keep it"),
    }

    if let Some(path) = &paths.failures {
        write_failure_report(path, prepared)?;
    }

    Ok(())
}

fn write_failure_report(path: &Path, prepared: &PreparedCorpus) -> Result<()> {
    let rows: Vec<(String, String)> = prepared
        .failures
        .iter()
        .map(|err| {
            (
                err.molecule().unwrap_or("-").to_string(),
                err.to_string(),
            )
        })
        .collect();

    let writer = create_output(Some(path))?;
    write_failures(writer, &rows).context("Failed to write failure report")
}
