mod commands;
mod logging;
mod ops;
mod reports;

use std::process::ExitCode;

use clap::Parser;
use supatype_gen::GenError;

use crate::commands::Cli;

/// Exit code for a run cut short with Ctrl-C.
const EXIT_INTERRUPTED: u8 = 130;

/// Exit code for any other error.
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    if let Err(e) = color_eyre::install() {
        eprintln!("Error: {e:?}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();
    logging::init(cli.verbose());

    match cli.run() {
        Ok(code) => code,
        Err(report) => exit_with(report),
    }
}

fn exit_with(report: eyre::Report) -> ExitCode {
    let (code, message) = failure(report);
    eprintln!("{message}");
    ExitCode::from(code)
}

/// Exit code and message for a run that ended in an error.
fn failure(report: eyre::Report) -> (u8, String) {
    match report.downcast::<GenError>() {
        Ok(err) if err.is_interrupted() => {
            (EXIT_INTERRUPTED, "\nInterrupted by user".to_string())
        }
        Ok(err) => (EXIT_FAILURE, format!("{:?}", miette::Report::new(err))),
        Err(report) => (EXIT_FAILURE, format!("Error: {report:?}")),
    }
}
