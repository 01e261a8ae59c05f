//! `codewave session` command.

use std::io;

use crate::context::ServiceContext;
use crate::session::SessionLoop;

/// Execute the `session` command: run the interactive loop on stdin and
/// stdout until `quit` or end of input.
///
/// # Errors
///
/// Returns an error string when terminal I/O fails.
pub fn run(ctx: &ServiceContext, model: &str) -> Result<(), String> {
    let rt = super::runtime()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let session = SessionLoop::new(model.to_string(), stdin.lock(), stdout.lock());
    rt.block_on(session.run(ctx))
}
