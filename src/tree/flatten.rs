//! Flattens the forest back into the flat file list the builder consumes.

use crate::tree::forest::Forest;
use crate::tree::node::Node;

/// One exported file: full path and content, folders implied by prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatFile {
    /// Slash-delimited path from the project root.
    pub path: String,
    /// File content, verbatim.
    pub content: String,
}

/// Walks the forest depth-first and returns every file node as a
/// `{path, content}` pair. The structural inverse of building: feeding the
/// result back to the builder reproduces the same tree.
#[must_use]
pub fn flatten(forest: &Forest) -> Vec<FlatFile> {
    fn walk(nodes: &[Node], out: &mut Vec<FlatFile>) {
        for node in nodes {
            match node {
                Node::File(f) => {
                    out.push(FlatFile { path: f.path.clone(), content: f.content.clone() });
                }
                Node::Folder(d) => walk(&d.children, out),
            }
        }
    }
    let mut out = Vec::new();
    walk(forest.roots(), &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build::{build_forest, FileRecord};
    use crate::tree::testutil::SeqIds;

    fn record(path: &str, content: &str) -> FileRecord {
        FileRecord { path: path.to_string(), content: content.to_string(), language: None }
    }

    #[test]
    fn flatten_covers_every_file_and_skips_folders() {
        let forest = build_forest(
            vec![
                record("src/App.tsx", "X"),
                record("src/utils/helpers.ts", "Y"),
                record("package.json", "Z"),
            ],
            &SeqIds::new(),
        );

        let flat = flatten(&forest);
        assert_eq!(flat, vec![
            FlatFile { path: "src/utils/helpers.ts".to_string(), content: "Y".to_string() },
            FlatFile { path: "src/App.tsx".to_string(), content: "X".to_string() },
            FlatFile { path: "package.json".to_string(), content: "Z".to_string() },
        ]);
    }

    #[test]
    fn flatten_of_build_round_trips_the_input_set() {
        let records = vec![
            record("a/b/c.ts", "1"),
            record("a/d.ts", "2"),
            record("e.md", "3"),
            record("a/b/f.css", "4"),
        ];
        let forest = build_forest(records.clone(), &SeqIds::new());
        let mut flat: Vec<(String, String)> =
            flatten(&forest).into_iter().map(|f| (f.path, f.content)).collect();
        let mut expected: Vec<(String, String)> =
            records.into_iter().map(|r| (r.path, r.content)).collect();
        flat.sort();
        expected.sort();
        assert_eq!(flat, expected);
    }

    #[test]
    fn rebuilding_from_flatten_reproduces_the_tree() {
        let forest = build_forest(
            vec![record("src/a.ts", "1"), record("src/lib/b.ts", "2"), record("c.json", "3")],
            &SeqIds::new(),
        );
        let rebuilt = build_forest(
            flatten(&forest)
                .into_iter()
                .map(|f| record(&f.path, &f.content))
                .collect(),
            &SeqIds::new(),
        );
        assert_eq!(flatten(&rebuilt), flatten(&forest));
    }

    #[test]
    fn duplicate_input_paths_collapse_before_flatten() {
        let forest = build_forest(
            vec![record("x.ts", "old"), record("x.ts", "new")],
            &SeqIds::new(),
        );
        let flat = flatten(&forest);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].content, "new");
    }
}
