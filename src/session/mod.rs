//! Interactive project session.
//!
//! One loop owns the project state: the forest plus the currently-open
//! file. Commands arrive one per line, mutate the state through the tree
//! operations, and print the result. Every domain error is printed and the
//! loop continues with the forest in its last-known-good shape.
//!
//! Generation is synchronous from the loop's point of view: the prompt
//! command blocks until the provider replies, so a second submission while
//! one is outstanding cannot happen.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::context::ServiceContext;
use crate::export;
use crate::generate;
use crate::tree::{merge_records, Forest, Node, NodeKind};

/// Project state owned by the session: the forest and the id of the
/// currently-open file, if any.
#[derive(Debug, Default)]
pub struct ProjectState {
    /// The virtual file tree.
    pub forest: Forest,
    /// Id of the currently-open file node.
    pub selected: Option<String>,
}

/// One command parsed from an input line.
#[derive(Debug, Clone, PartialEq)]
enum SessionCommand {
    Generate(String),
    Tree,
    Open(String),
    Show,
    Edit { path: String, content: String },
    New { kind: NodeKind, path: String },
    Rename { path: String, new_name: String },
    Remove(String),
    Toggle(String),
    Get { path: String, dir: Option<String> },
    Export(String),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// The interactive session loop, generic over reader and writer so tests
/// can drive it with strings.
pub struct SessionLoop<R: BufRead, W: Write> {
    state: ProjectState,
    model: String,
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> SessionLoop<R, W> {
    /// Creates a session with an empty project.
    pub fn new(model: String, reader: R, writer: W) -> Self {
        Self { state: ProjectState::default(), model, reader, writer }
    }

    /// Runs the loop until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only when reading or writing the terminal fails;
    /// command failures are printed and the loop continues.
    pub async fn run(mut self, ctx: &ServiceContext) -> Result<(), String> {
        self.say("CodeWave session. 'gen <prompt>' generates a project; 'help' lists commands.")?;
        loop {
            write!(self.writer, "codewave> ").map_err(|e| format!("write error: {e}"))?;
            self.writer.flush().map_err(|e| format!("write error: {e}"))?;

            let mut line = String::new();
            let read = self.reader.read_line(&mut line).map_err(|e| format!("read error: {e}"))?;
            if read == 0 {
                break;
            }

            match parse_command(&line) {
                SessionCommand::Generate(prompt) => self.handle_generate(ctx, &prompt).await?,
                SessionCommand::Tree => self.handle_tree()?,
                SessionCommand::Open(path) => self.handle_open(&path)?,
                SessionCommand::Show => self.handle_show()?,
                SessionCommand::Edit { path, content } => self.handle_edit(&path, &content)?,
                SessionCommand::New { kind, path } => self.handle_new(ctx, kind, &path)?,
                SessionCommand::Rename { path, new_name } => {
                    self.handle_rename(&path, &new_name)?;
                }
                SessionCommand::Remove(path) => self.handle_remove(&path)?,
                SessionCommand::Toggle(path) => self.handle_toggle(&path)?,
                SessionCommand::Get { path, dir } => self.handle_get(ctx, &path, dir.as_deref())?,
                SessionCommand::Export(dir) => self.handle_export(ctx, &dir)?,
                SessionCommand::Help => self.handle_help()?,
                SessionCommand::Quit => break,
                SessionCommand::Empty => {}
                SessionCommand::Unknown(line) => {
                    self.say(&format!("unrecognized or incomplete command: {line} (try 'help')"))?;
                }
            }
        }
        Ok(())
    }

    async fn handle_generate(&mut self, ctx: &ServiceContext, prompt: &str) -> Result<(), String> {
        self.say("generating...")?;
        match generate::generate_project(ctx, prompt, &self.model).await {
            Err(message) => self.say(&format!("error: {message}")),
            Ok(records) => {
                let outcome = merge_records(&mut self.state.forest, records, ctx.ids.as_ref());
                if let Some(first) = outcome.file_ids.first() {
                    self.state.selected = Some(first.clone());
                }
                let summary = format!("{} file(s) in the project", self.state.forest.file_count());
                self.say(&summary)?;
                if outcome.skipped > 0 {
                    let note = format!("skipped {} record(s) with unusable paths", outcome.skipped);
                    self.say(&note)?;
                }
                let outline = self.state.forest.outline();
                self.say(outline.trim_end())
            }
        }
    }

    fn handle_tree(&mut self) -> Result<(), String> {
        let outline = self.state.forest.outline();
        self.say(outline.trim_end())?;
        let count = self.state.forest.file_count();
        self.say(&format!("{count} file(s)"))
    }

    fn handle_open(&mut self, path: &str) -> Result<(), String> {
        let hit = self.state.forest.find_by_path(path).map(|n| (n.kind(), n.id().to_string()));
        match hit {
            Some((NodeKind::File, id)) => {
                self.state.selected = Some(id);
                self.say(&format!("opened {path}"))
            }
            Some((NodeKind::Folder, _)) => self.say(&format!("{path} is a folder; open a file")),
            None => self.say(&format!("no file at {path}")),
        }
    }

    fn handle_show(&mut self) -> Result<(), String> {
        let Some(id) = self.state.selected.clone() else {
            return self.say("nothing selected; 'open <path>' first");
        };
        let file = match self.state.forest.find_node(&id) {
            Some(Node::File(f)) => Some((f.path.clone(), f.language.clone(), f.content.clone())),
            _ => None,
        };
        match file {
            Some((path, language, content)) => {
                self.say(&format!("-- {path} ({language})"))?;
                self.say(&content)
            }
            None => {
                self.state.selected = None;
                self.say("the selected file no longer exists")
            }
        }
    }

    fn handle_edit(&mut self, path: &str, content: &str) -> Result<(), String> {
        let Some(id) = self.state.forest.find_by_path(path).map(|n| n.id().to_string()) else {
            return self.say(&format!("no file at {path}"));
        };
        match self.state.forest.update_content(&id, content) {
            Ok(()) => self.say(&format!("updated {path}")),
            Err(e) => self.say(&format!("error: {e}")),
        }
    }

    fn handle_new(
        &mut self,
        ctx: &ServiceContext,
        kind: NodeKind,
        path: &str,
    ) -> Result<(), String> {
        let (parent, name) = path.rsplit_once('/').map_or(("", path), |(p, n)| (p, n));
        match self.state.forest.create_node(parent, name, kind, ctx.ids.as_ref()) {
            Ok(id) => {
                if kind == NodeKind::File {
                    self.state.selected = Some(id);
                }
                self.say(&format!("created {path}"))
            }
            Err(e) => self.say(&format!("error: {e}")),
        }
    }

    fn handle_rename(&mut self, path: &str, new_name: &str) -> Result<(), String> {
        let Some(id) = self.state.forest.find_by_path(path).map(|n| n.id().to_string()) else {
            return self.say(&format!("nothing at {path}"));
        };
        match self.state.forest.rename_node(&id, new_name) {
            Ok(()) => self.say(&format!("renamed {path} to {new_name}")),
            Err(e) => self.say(&format!("error: {e}")),
        }
    }

    fn handle_remove(&mut self, path: &str) -> Result<(), String> {
        let Some(id) = self.state.forest.find_by_path(path).map(|n| n.id().to_string()) else {
            return self.say(&format!("nothing at {path}"));
        };
        let removed = self.state.forest.delete_node(&id);
        if self.state.selected.as_ref().is_some_and(|sel| removed.contains(sel)) {
            self.state.selected = None;
        }
        self.say(&format!("removed {} node(s)", removed.len()))
    }

    fn handle_toggle(&mut self, path: &str) -> Result<(), String> {
        match self.state.forest.toggle_folder(path) {
            Ok(true) => self.say(&format!("expanded {path}")),
            Ok(false) => self.say(&format!("collapsed {path}")),
            Err(e) => self.say(&format!("error: {e}")),
        }
    }

    fn handle_get(
        &mut self,
        ctx: &ServiceContext,
        path: &str,
        dir: Option<&str>,
    ) -> Result<(), String> {
        let file = match self.state.forest.find_by_path(path) {
            Some(Node::File(f)) => f.clone(),
            Some(Node::Folder(_)) => {
                return self.say(&format!("{path} is a folder; 'export' writes whole projects"));
            }
            None => return self.say(&format!("no file at {path}")),
        };
        match export::write_file(ctx.fs.as_ref(), &file, Path::new(dir.unwrap_or("."))) {
            Ok(target) => self.say(&format!("wrote {}", target.display())),
            Err(e) => self.say(&format!("error: {e}")),
        }
    }

    fn handle_export(&mut self, ctx: &ServiceContext, dir: &str) -> Result<(), String> {
        if self.state.forest.is_empty() {
            return self.say("nothing to export");
        }
        match export::write_bundle(ctx.fs.as_ref(), &self.state.forest, Path::new(dir)) {
            Ok(count) => self.say(&format!("wrote {count} file(s) to {dir}")),
            Err(e) => self.say(&format!("error: {e}")),
        }
    }

    fn handle_help(&mut self) -> Result<(), String> {
        self.say(
            "commands:\n\
             \x20 gen <prompt>          generate project files from a description\n\
             \x20 tree                  show the project outline\n\
             \x20 open <path>           open a file\n\
             \x20 show                  print the open file\n\
             \x20 edit <path> <text>    replace a file's content\n\
             \x20 new file <path>       create an empty file\n\
             \x20 new folder <path>     create a folder\n\
             \x20 mv <path> <name>      rename a file or folder\n\
             \x20 rm <path>             delete a file or folder (recursive)\n\
             \x20 toggle <path>         expand or collapse a folder\n\
             \x20 get <path> [dir]      download one file\n\
             \x20 export <dir>          write the whole project to a directory\n\
             \x20 quit                  leave the session",
        )
    }

    fn say(&mut self, text: &str) -> Result<(), String> {
        writeln!(self.writer, "{text}").map_err(|e| format!("write error: {e}"))
    }
}

fn parse_command(line: &str) -> SessionCommand {
    let line = line.trim();
    if line.is_empty() {
        return SessionCommand::Empty;
    }
    let (head, rest) =
        line.split_once(char::is_whitespace).map_or((line, ""), |(h, r)| (h, r.trim()));

    match (head, rest) {
        ("gen", prompt) if !prompt.is_empty() => SessionCommand::Generate(prompt.to_string()),
        ("tree", "") => SessionCommand::Tree,
        ("open", path) if !path.is_empty() => SessionCommand::Open(path.to_string()),
        ("show", "") => SessionCommand::Show,
        ("edit", args) => match args.split_once(char::is_whitespace) {
            Some((path, content)) => SessionCommand::Edit {
                path: path.to_string(),
                content: content.to_string(),
            },
            None => SessionCommand::Unknown(line.to_string()),
        },
        ("new", args) => match args.split_once(char::is_whitespace) {
            Some(("file", path)) => {
                SessionCommand::New { kind: NodeKind::File, path: path.trim().to_string() }
            }
            Some(("folder", path)) => {
                SessionCommand::New { kind: NodeKind::Folder, path: path.trim().to_string() }
            }
            _ => SessionCommand::Unknown(line.to_string()),
        },
        ("mv", args) => match args.split_once(char::is_whitespace) {
            Some((path, new_name)) => SessionCommand::Rename {
                path: path.to_string(),
                new_name: new_name.trim().to_string(),
            },
            None => SessionCommand::Unknown(line.to_string()),
        },
        ("rm", path) if !path.is_empty() => SessionCommand::Remove(path.to_string()),
        ("toggle", path) if !path.is_empty() => SessionCommand::Toggle(path.to_string()),
        ("get", args) if !args.is_empty() => match args.split_once(char::is_whitespace) {
            Some((path, dir)) => SessionCommand::Get {
                path: path.to_string(),
                dir: Some(dir.trim().to_string()),
            },
            None => SessionCommand::Get { path: args.to_string(), dir: None },
        },
        ("export", dir) if !dir.is_empty() => SessionCommand::Export(dir.to_string()),
        ("help", _) => SessionCommand::Help,
        ("quit" | "exit", _) => SessionCommand::Quit,
        _ => SessionCommand::Unknown(line.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::ports::generator::{
        GenerationClient, GenerationFuture, GenerationReply, GenerationRequest,
    };
    use crate::ports::{FileSystem, IdGenerator};

    struct ScriptedGenerator {
        replies: Mutex<Vec<Result<String, String>>>,
    }

    impl GenerationClient for ScriptedGenerator {
        fn generate(&self, _request: &GenerationRequest) -> GenerationFuture<'_> {
            let next = self.replies.lock().unwrap().remove(0);
            Box::pin(async move {
                match next {
                    Ok(text) => Ok(GenerationReply { text }),
                    Err(message) => Err(message.into()),
                }
            })
        }
    }

    struct SeqIds(Mutex<u64>);

    impl IdGenerator for SeqIds {
        fn generate_id(&self) -> String {
            let mut n = self.0.lock().unwrap();
            *n += 1;
            format!("n{n}")
        }
    }

    type SharedFiles = Arc<Mutex<HashMap<PathBuf, String>>>;

    struct MemFs {
        files: SharedFiles,
    }

    impl FileSystem for MemFs {
        fn write(
            &self,
            path: &Path,
            contents: &str,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }

    fn test_context(replies: Vec<Result<String, String>>) -> (ServiceContext, SharedFiles) {
        let files: SharedFiles = Arc::new(Mutex::new(HashMap::new()));
        let ctx = ServiceContext {
            generator: Box::new(ScriptedGenerator { replies: Mutex::new(replies) }),
            ids: Box::new(SeqIds(Mutex::new(0))),
            fs: Box::new(MemFs { files: Arc::clone(&files) }),
        };
        (ctx, files)
    }

    async fn drive(ctx: &ServiceContext, input: &str) -> String {
        let mut output = Vec::new();
        let session =
            SessionLoop::new("test-model".to_string(), Cursor::new(input.as_bytes()), &mut output);
        session.run(ctx).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn generation_populates_the_tree() {
        let (ctx, _) = test_context(vec![Ok(r#"{"files": [
            {"path": "src/App.tsx", "content": "X", "language": "tsx"},
            {"path": "package.json", "content": "Z"}
        ]}"#
            .to_string())]);

        let output = drive(&ctx, "gen a counter app\ntree\n").await;
        assert!(output.contains("2 file(s) in the project"));
        assert!(output.contains("src/"));
        assert!(output.contains("App.tsx"));
        assert!(output.contains("package.json"));
    }

    #[tokio::test]
    async fn generation_selects_the_first_file() {
        let (ctx, _) = test_context(vec![Ok(
            r#"{"files": [{"path": "src/App.tsx", "content": "hello world"}]}"#.to_string(),
        )]);

        let output = drive(&ctx, "gen app\nshow\n").await;
        assert!(output.contains("-- src/App.tsx"));
        assert!(output.contains("hello world"));
    }

    #[tokio::test]
    async fn failed_generation_leaves_the_forest_untouched() {
        let (ctx, _) = test_context(vec![Err("connection refused".to_string())]);

        let output = drive(&ctx, "gen app\ntree\n").await;
        assert!(output.contains("error: generation failed: connection refused"));
        assert!(output.contains("(empty project)"));
    }

    #[tokio::test]
    async fn provider_error_is_surfaced_verbatim() {
        let (ctx, _) = test_context(vec![Ok(r#"{"error": "quota exceeded"}"#.to_string())]);

        let output = drive(&ctx, "gen app\ntree\n").await;
        assert!(output.contains("error: quota exceeded"));
        assert!(output.contains("(empty project)"));
    }

    #[tokio::test]
    async fn create_edit_show_and_remove_flow() {
        let (ctx, _) = test_context(Vec::new());

        let input = "new folder src\n\
                     new file src/a.ts\n\
                     edit src/a.ts const a = 1;\n\
                     show\n\
                     rm src\n\
                     show\n";
        let output = drive(&ctx, input).await;
        assert!(output.contains("created src/a.ts"));
        assert!(output.contains("const a = 1;"));
        // Deleting the folder removed the selected file under it.
        assert!(output.contains("nothing selected"));
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected_politely() {
        let (ctx, _) = test_context(Vec::new());

        let output = drive(&ctx, "new file a.ts\nnew file a.ts\n").await;
        assert!(output.contains("already exists"));
    }

    #[tokio::test]
    async fn removing_a_missing_path_is_a_no_op() {
        let (ctx, _) = test_context(Vec::new());
        let output = drive(&ctx, "rm ghosts\ntree\n").await;
        assert!(output.contains("nothing at ghosts"));
        assert!(output.contains("(empty project)"));
    }

    #[tokio::test]
    async fn export_writes_through_the_filesystem_port() {
        let (ctx, files) = test_context(vec![Ok(
            r#"{"files": [{"path": "src/main.py", "content": "print(1)"}]}"#.to_string(),
        )]);

        let output = drive(&ctx, "gen script\nexport /out\n").await;
        assert!(output.contains("wrote 1 file(s) to /out"));
        assert_eq!(
            files.lock().unwrap().get(Path::new("/out/src/main.py")).unwrap(),
            "print(1)"
        );
    }

    #[tokio::test]
    async fn get_downloads_one_file_under_its_bare_name() {
        let (ctx, files) = test_context(Vec::new());

        let input = "new folder docs\n\
                     new file docs/note.md\n\
                     edit docs/note.md hi\n\
                     get docs/note.md /dl\n";
        let output = drive(&ctx, input).await;
        assert!(output.contains("wrote /dl/note.md"));
        assert_eq!(files.lock().unwrap().get(Path::new("/dl/note.md")).unwrap(), "hi");
    }

    #[tokio::test]
    async fn quit_stops_processing_input() {
        let (ctx, _) = test_context(Vec::new());
        let output = drive(&ctx, "quit\ntree\n").await;
        assert!(!output.contains("(empty project)"));
    }

    #[tokio::test]
    async fn unknown_command_points_at_help() {
        let (ctx, _) = test_context(Vec::new());
        let output = drive(&ctx, "frobnicate\n").await;
        assert!(output.contains("try 'help'"));
    }

    #[test]
    fn parser_handles_argument_shapes() {
        assert_eq!(
            parse_command("gen build me a game"),
            SessionCommand::Generate("build me a game".to_string())
        );
        assert_eq!(parse_command("  \n"), SessionCommand::Empty);
        assert_eq!(
            parse_command("edit src/a.ts let x = 1;"),
            SessionCommand::Edit {
                path: "src/a.ts".to_string(),
                content: "let x = 1;".to_string()
            }
        );
        assert_eq!(
            parse_command("new folder src/lib"),
            SessionCommand::New { kind: NodeKind::Folder, path: "src/lib".to_string() }
        );
        assert_eq!(
            parse_command("get a.ts"),
            SessionCommand::Get { path: "a.ts".to_string(), dir: None }
        );
        assert_eq!(parse_command("gen"), SessionCommand::Unknown("gen".to_string()));
        assert_eq!(parse_command("exit"), SessionCommand::Quit);
    }
}
