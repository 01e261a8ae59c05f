//! Binary entrypoint for the `codewave` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // GEMINI_API_KEY may come from a local .env during development.
    let _ = dotenvy::dotenv();

    match codewave::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
