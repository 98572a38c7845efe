use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "mgprep",
    about = "Hydrogen-collapsed molecular graph preparation",
    version,
    author,
    propagate_version = true
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a corpus, build the bond vocabulary, and encode every graph
    #[command(visible_alias = "p")]
    Prep(PrepArgs),

    /// Survey a corpus: counts, hydrogen share, attribute names, bond labels
    #[command(visible_alias = "i")]
    Inspect(InspectArgs),
}

/// Input options shared by all commands.
#[derive(Args)]
pub struct InputOptions {
    /// Input file (stdin if omitted, requires --infmt)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Input format (inferred from extension if not specified)
    #[arg(long = "infmt", value_name = "FORMAT")]
    pub input_format: Option<InputFormat>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Artifact destinations for the prep command.
#[derive(Args)]
#[command(next_help_heading = "Output")]
pub struct OutputOptions {
    /// Encoded graph stream (stdout if omitted and --out-dir is not set)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Bond vocabulary JSON
    #[arg(long = "vocab-out", value_name = "FILE")]
    pub vocab_out: Option<PathBuf>,

    /// Directory for artifacts with default names
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Name prefix for artifacts written to --out-dir
    #[arg(long, value_name = "PREFIX", default_value = "drug")]
    pub prefix: String,

    /// Report of skipped molecules (`<id>\t<reason>` per line)
    #[arg(long, value_name = "FILE")]
    pub failures: Option<PathBuf>,
}

/// Normalization and encoding options.
#[derive(Args)]
#[command(next_help_heading = "Preparation")]
pub struct PrepOptions {
    /// Do not add a "self" edge to every heavy atom
    #[arg(long)]
    pub no_self_loop: bool,

    /// Handling of molecules that fail normalization or encoding
    #[arg(long, value_name = "POLICY")]
    pub policy: Option<Policy>,

    /// Order in which bond labels receive vocabulary codes
    #[arg(long = "label-order", value_name = "ORDER")]
    pub label_order: Option<LabelOrder>,

    /// Encode against an existing bond vocabulary instead of building one
    #[arg(long, value_name = "FILE")]
    pub vocab: Option<PathBuf>,

    /// Preparation settings (TOML); flags override file values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Worker threads (all cores if omitted)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,
}

#[derive(Args)]
pub struct PrepArgs {
    #[command(flatten)]
    pub input: InputOptions,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub prep: PrepOptions,
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputOptions,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InputFormat {
    /// Tab-separated `<id>\t<JSON>` records
    #[value(name = "jsonl", alias = "records", alias = "tsv")]
    Jsonl,
    /// V2000 SD file, one or more blocks
    Sdf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Policy {
    /// Stop at the first failing molecule
    Abort,
    /// Drop failing molecules and keep going
    Skip,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LabelOrder {
    /// Lexicographic label order
    Sorted,
    /// Order of first appearance in the corpus
    #[value(name = "first-seen")]
    FirstSeen,
}

pub fn parse() -> Cli {
    Cli::parse()
}
