//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

fn main() -> ExitCode {
    let outcome = matchmaker_cli::init_logging().and_then(|()| matchmaker_cli::run());
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

#[expect(clippy::print_stderr, reason = "fatal errors are reported on stderr")]
fn report(err: &matchmaker_cli::CliError) {
    eprintln!("matchmaker: {err}");
}
