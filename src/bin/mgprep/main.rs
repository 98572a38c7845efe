use std::process::ExitCode;

mod cli;
mod commands;
mod config;
mod display;
mod io;
mod util;

fn main() -> ExitCode {
    let cli = cli::parse();
    let quiet = match &cli.command {
        cli::Command::Prep(args) => args.input.quiet,
        cli::Command::Inspect(args) => args.input.quiet,
    };

    display::init_logging(cli.verbose, quiet);
    let ctx = display::Context::detect().with_quiet(quiet);

    match commands::dispatch(cli.command, ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
