//! Builds the virtual file tree from flat generation records.
//!
//! One generation call yields a flat batch of `{path, content, language}`
//! records. Merging walks each record's path, synthesizing missing
//! intermediate folders and reusing folders that already exist — whether
//! created earlier in the batch or by a previous generation merged into the
//! same forest. The upstream generator guarantees nothing about its paths,
//! so duplicates resolve last-write-wins and unusable records are skipped.

use crate::lang;
use crate::ports::IdGenerator;
use crate::tree::forest::Forest;
use crate::tree::node::{sort_siblings, FileNode, FolderNode, Node};
use crate::tree::path;

/// One flat file record from a generation reply.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    /// Slash-delimited path relative to the project root.
    pub path: String,
    /// File content.
    pub content: String,
    /// Declared language tag; inferred from the extension when absent.
    pub language: Option<String>,
}

/// What a batch merge did to the forest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Ids of the file node each accepted record landed in, in record
    /// order. A duplicate path reports the id of the overwritten node.
    pub file_ids: Vec<String>,
    /// Number of records dropped: unusable paths, or paths needing a
    /// folder where a file already exists.
    pub skipped: usize,
}

/// Builds a fresh forest from a batch of records.
#[must_use]
pub fn build_forest(records: Vec<FileRecord>, ids: &dyn IdGenerator) -> Forest {
    let mut forest = Forest::new();
    merge_records(&mut forest, records, ids);
    forest
}

/// Merges a batch of records into an existing forest.
pub fn merge_records(
    forest: &mut Forest,
    records: Vec<FileRecord>,
    ids: &dyn IdGenerator,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    for record in records {
        match insert_record(forest, record, ids) {
            Some(id) => outcome.file_ids.push(id),
            None => outcome.skipped += 1,
        }
    }
    outcome
}

/// Inserts one record, returning the id of the file node it landed in, or
/// `None` when the record had to be dropped.
fn insert_record(forest: &mut Forest, record: FileRecord, ids: &dyn IdGenerator) -> Option<String> {
    let normalized = path::normalize(&record.path)?;
    let segs = path::segments(&normalized).ok()?;
    let (file_name, folders) = segs.split_last()?;

    let mut level = forest.roots_mut();
    let mut walked = String::new();
    for seg in folders {
        walked = path::child_path(&walked, seg);
        let pos = level.iter().position(|n| n.name() == *seg);
        let idx = match pos {
            Some(i) => i,
            None => {
                level.push(Node::Folder(FolderNode {
                    id: ids.generate_id(),
                    name: (*seg).to_string(),
                    path: walked.clone(),
                    expanded: true,
                    children: Vec::new(),
                }));
                sort_siblings(level);
                level.iter().position(|n| n.name() == *seg)?
            }
        };
        level = match &mut level[idx] {
            Node::Folder(d) => &mut d.children,
            // A file occupies this prefix; the record cannot be placed.
            Node::File(_) => return None,
        };
    }

    let language =
        record.language.unwrap_or_else(|| lang::language_for_path(file_name));
    match level.iter_mut().find(|n| n.name() == *file_name) {
        // Last write wins for a duplicate path.
        Some(Node::File(existing)) => {
            existing.content = record.content;
            existing.language = language;
            Some(existing.id.clone())
        }
        // The path collides with an existing folder; drop the record.
        Some(Node::Folder(_)) => None,
        None => {
            let id = ids.generate_id();
            level.push(Node::File(FileNode {
                id: id.clone(),
                name: (*file_name).to_string(),
                path: normalized,
                content: record.content,
                language,
            }));
            sort_siblings(level);
            Some(id)
        }
    }
}
