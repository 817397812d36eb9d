// scenecut-cli/src/main.rs
//
// Entry point of the `scenecut` binary.
//
// Responsibilities include:
// - Parsing the four positional arguments and the tuning flags.
// - Rejecting a wrong argument count with a usage message and exit code 1.
// - Handing the parsed arguments to the run command.
// - Returning the run's exit code to the shell.

use clap::Parser;
use clap::error::ErrorKind;
use scenecut_cli::{Cli, EXIT_FAILURE, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            let _ = err.print();
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    ExitCode::from(run(&cli))
}
