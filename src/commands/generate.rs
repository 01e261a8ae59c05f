//! `codewave generate` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::export;
use crate::generate::generate_project;
use crate::tree::{build_forest, flatten};

/// Execute the `generate` command: one prompt, one forest.
///
/// Prints the project outline. With `--out`, the files are written under
/// the given directory; without it, every file is dumped to stdout.
///
/// # Errors
///
/// Returns an error string when generation or the export write fails.
pub fn run(
    ctx: &ServiceContext,
    prompt: &str,
    model: &str,
    out: Option<&Path>,
) -> Result<(), String> {
    let rt = super::runtime()?;
    let records = rt.block_on(generate_project(ctx, prompt, model))?;

    let forest = build_forest(records, ctx.ids.as_ref());
    print!("{}", forest.outline());
    println!("{} file(s)", forest.file_count());

    match out {
        Some(dir) => {
            let written = export::write_bundle(ctx.fs.as_ref(), &forest, dir)?;
            println!("wrote {written} file(s) to {}", dir.display());
        }
        None => {
            for entry in flatten(&forest) {
                println!("\n--- {} ---", entry.path);
                println!("{}", entry.content);
            }
        }
    }
    Ok(())
}
