//! Command dispatch and handlers.

pub mod generate;
pub mod session;

use crate::cli::Command;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let ctx = ServiceContext::live();
    match command {
        Command::Generate { prompt, out, model } => {
            generate::run(&ctx, prompt, model, out.as_deref())
        }
        Command::Session { model } => session::run(&ctx, model),
    }
}

/// Builds the current-thread async runtime the handlers block on.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))
}
