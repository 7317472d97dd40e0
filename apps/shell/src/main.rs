//! # tally-shell Entry Point
//!
//! Delegates to [`tally_shell::run`]; this file only maps failure to an
//! exit code.

use std::process::ExitCode;

fn main() -> ExitCode {
    match tally_shell::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tally-shell: {err}");
            ExitCode::FAILURE
        }
    }
}
