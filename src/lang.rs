//! Language tags for generated files.
//!
//! Two sources of truth: the file extension (for records and user-created
//! files) and content sniffing (for unstructured generation replies that
//! come back as one opaque blob).

/// Maps a file name to a language tag by extension.
///
/// Unknown or missing extensions map to `"plaintext"`.
#[must_use]
pub fn language_for_path(name: &str) -> String {
    let ext = name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    let language = match ext.as_str() {
        "js" | "jsx" => "javascript",
        "ts" => "typescript",
        "tsx" => "tsx",
        "css" => "css",
        "scss" => "scss",
        "html" => "html",
        "json" => "json",
        "md" => "markdown",
        "py" => "python",
        "java" => "java",
        "cpp" | "cc" | "cxx" => "cpp",
        "c" => "c",
        "php" => "php",
        "rb" => "ruby",
        "go" => "go",
        "rs" => "rust",
        "sh" => "shell",
        "yml" | "yaml" => "yaml",
        "xml" => "xml",
        "sql" => "sql",
        _ => "plaintext",
    };
    language.to_string()
}

/// Guesses the language of an opaque code blob from content cues.
///
/// Checks run in order; the first match wins: React-style imports or a
/// component export, an HTML document, CSS declarations, Python tokens,
/// and finally plain JavaScript as the default.
#[must_use]
pub fn sniff_language(text: &str) -> &'static str {
    if text.contains("import React") || text.contains("export default function") {
        "tsx"
    } else if text.contains("<!DOCTYPE html>") || text.contains("<html") {
        "html"
    } else if text.contains("@media") || text.contains("display:") {
        "css"
    } else if text.contains("def ") || text.contains("import ") {
        "python"
    } else {
        "javascript"
    }
}

/// Picks a file extension for a language tag. Falls back to `"js"`, the
/// generic script extension.
#[must_use]
pub fn extension_for_language(language: &str) -> &'static str {
    match language {
        "tsx" => "tsx",
        "typescript" => "ts",
        "html" => "html",
        "css" => "css",
        "scss" => "scss",
        "python" => "py",
        "markdown" => "md",
        "json" => "json",
        "rust" => "rs",
        "go" => "go",
        "ruby" => "rb",
        "java" => "java",
        "shell" => "sh",
        "yaml" => "yml",
        _ => "js",
    }
}
