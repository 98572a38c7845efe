mod inspect;
mod prep;

use inspect::run_inspect;
use prep::run_prep;

use anyhow::{Context, Result, bail};

use molgraph_prep::RawMolecule;
use molgraph_prep::io::{Format, MoleculeReader};

use crate::cli::{Command, InputOptions};
use crate::display::Context as DisplayContext;
use crate::io::{infer_input_format, open_input};

pub fn dispatch(command: Command, ctx: DisplayContext) -> Result<()> {
    match command {
        Command::Prep(args) => run_prep(args, ctx),
        Command::Inspect(args) => run_inspect(args, ctx),
    }
}

fn resolve_input_format(opts: &InputOptions) -> Result<Format> {
    if let Some(fmt) = opts.input_format {
        return Ok(fmt.into());
    }

    if let Some(path) = &opts.input {
        if let Some(fmt) = infer_input_format(path) {
            return Ok(fmt);
        }
        bail!(
            "Cannot infer format from '{}'. Use --infmt to specify.",
            path.display()
        );
    }

    bail!("Reading from stdin requires --infmt");
}

fn read_molecules(opts: &InputOptions, format: Format) -> Result<Vec<RawMolecule>> {
    let input = open_input(opts.input.as_deref())?;
    MoleculeReader::new(input, format)
        .read()
        .context("Failed to read molecules")
}
