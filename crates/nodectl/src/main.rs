//! Binary entry point for the node console.

use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match nodectl::run_node() {
        Ok(report) if report.is_failure() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            let _ignored = writeln!(io::stderr().lock(), "nodectl: {error}");
            ExitCode::FAILURE
        }
    }
}
