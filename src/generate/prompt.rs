//! Instruction prompt construction and prompt-derived file names.

use std::fmt::Write as _;

/// Longest slug produced from a prompt.
const SLUG_MAX_LEN: usize = 40;

/// Wraps the user's request in the generation instructions.
///
/// The model is asked to respond with a JSON file list; the parser falls
/// back to treating the reply as a single code blob when it does not.
#[must_use]
pub fn build_instructions(user_prompt: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are an expert web developer. Generate clean, modern, and functional code \
         based on the following request.\n\n\
         Instructions:\n\
         - Generate complete, working code (HTML, CSS, JavaScript, React, etc.)\n\
         - Use modern best practices and clean code principles\n\
         - Include proper styling (preferably TailwindCSS if applicable)\n\
         - Make it responsive and accessible\n\
         - Add comments where helpful\n\
         - If it's a React component, make it functional with hooks\n\
         - Ensure the code is production-ready\n\
         - Split the project into files and respond with JSON only, no markdown \
         fences, in the shape:\n  \
         {\"files\": [{\"name\": \"App.tsx\", \"path\": \"src/App.tsx\", \
         \"content\": \"...\", \"language\": \"tsx\"}]}\n\
         - Use forward-slash paths relative to the project root\n\n",
    );

    let _ = writeln!(prompt, "User Request: {user_prompt}");

    prompt
}

/// Slugifies a prompt into a file-name stem: lowercase, alphanumeric runs
/// joined by single dashes, truncated, `"generated"` when nothing remains.
#[must_use]
pub fn slug(text: &str) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
        if out.len() >= SLUG_MAX_LEN {
            break;
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "generated".to_string()
    } else {
        trimmed.to_string()
    }
}
