//! Parses raw model replies into file records.
//!
//! Providers are asked for a JSON file list but reply however they like:
//! fenced JSON, the legacy single-file `{"code": ...}` shape, an error
//! object, or plain code. A reply that fails structural parsing is never a
//! hard failure — it degrades to a single opaque blob and the caller
//! synthesizes one file from it.

use serde::Deserialize;

use crate::tree::FileRecord;

/// A structurally-parsed generation reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A structured multi-file reply.
    Files(Vec<FileRecord>),
    /// A single opaque code blob (legacy shape or unparseable reply).
    Blob {
        /// The code text.
        code: String,
        /// Language declared by the reply, when present.
        language: Option<String>,
    },
    /// The provider reported an error; surfaced verbatim.
    ProviderError(String),
}

/// One file entry in the wire reply.
#[derive(Deserialize)]
struct WireFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    content: String,
    #[serde(default)]
    language: Option<String>,
}

/// The wire reply: multi-file, legacy single-file, and error shapes
/// overlaid.
#[derive(Deserialize)]
struct WireReply {
    #[serde(default)]
    files: Vec<WireFile>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Parses a raw reply, stripping markdown fences first.
#[must_use]
pub fn parse_reply(raw: &str) -> Reply {
    let text = strip_fences(raw);

    let Ok(wire) = serde_json::from_str::<WireReply>(text) else {
        return Reply::Blob { code: text.to_string(), language: None };
    };

    if let Some(error) = wire.error {
        return Reply::ProviderError(error);
    }

    let records: Vec<FileRecord> = wire
        .files
        .into_iter()
        .filter_map(|f| {
            let path = f.path.or(f.name)?;
            Some(FileRecord { path, content: f.content, language: f.language })
        })
        .collect();
    if !records.is_empty() {
        return Reply::Files(records);
    }

    match wire.code {
        Some(code) => Reply::Blob { code, language: wire.language },
        None => Reply::Blob { code: text.to_string(), language: None },
    }
}

/// Removes a surrounding markdown code fence, tolerating a language tag on
/// the opening line.
fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.split_once('\n') {
        Some((_lang_tag, body)) => body,
        None => rest,
    };
    body.strip_suffix("```").map_or(body, str::trim_end).trim()
}
