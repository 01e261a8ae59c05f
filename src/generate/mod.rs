//! The generation pipeline: prompt → model → flat file records.

pub mod parser;
pub mod prompt;

use crate::context::ServiceContext;
use crate::lang;
use crate::ports::generator::GenerationRequest;
use crate::tree::FileRecord;

/// Token ceiling for a generation call.
const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Generates project files for a user prompt.
///
/// Wraps the prompt in the generation instructions, sends it through the
/// generation port, and parses the reply. An unstructured reply degrades
/// to exactly one synthetic file record named after the prompt.
///
/// # Errors
///
/// Returns an error when the provider call fails or the provider reports
/// an error; the caller's forest is untouched in both cases.
pub async fn generate_project(
    ctx: &ServiceContext,
    user_prompt: &str,
    model: &str,
) -> Result<Vec<FileRecord>, String> {
    let request = GenerationRequest {
        model: model.to_string(),
        prompt: prompt::build_instructions(user_prompt),
        max_tokens: MAX_OUTPUT_TOKENS,
    };

    let reply =
        ctx.generator.generate(&request).await.map_err(|e| format!("generation failed: {e}"))?;

    match parser::parse_reply(&reply.text) {
        parser::Reply::ProviderError(message) => Err(message),
        parser::Reply::Files(records) => Ok(records),
        parser::Reply::Blob { code, language } => {
            Ok(vec![synthetic_record(user_prompt, &code, language.as_deref())])
        }
    }
}

/// Builds the single-file fallback record for an unstructured reply.
///
/// The name is a slug of the prompt; the extension comes from the declared
/// language when the reply carried one, otherwise from sniffing the
/// content.
#[must_use]
pub fn synthetic_record(user_prompt: &str, text: &str, language: Option<&str>) -> FileRecord {
    let language = language.map_or_else(|| lang::sniff_language(text).to_string(), str::to_string);
    let extension = lang::extension_for_language(&language);
    FileRecord {
        path: format!("{}.{extension}", prompt::slug(user_prompt)),
        content: text.to_string(),
        language: Some(language),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ports::generator::{GenerationClient, GenerationFuture, GenerationReply};
    use crate::ports::FileSystem;
    use crate::ports::IdGenerator;

    /// Generation double that pops scripted replies in order.
    struct ScriptedGenerator {
        replies: Mutex<Vec<Result<String, String>>>,
    }

    impl ScriptedGenerator {
        fn new(replies: Vec<Result<String, String>>) -> Self {
            Self { replies: Mutex::new(replies) }
        }
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

    struct NoIds;
    impl IdGenerator for NoIds {
        fn generate_id(&self) -> String {
            "unused".to_string()
        }
    }

    struct NoFs;
    impl FileSystem for NoFs {
        fn write(
            &self,
            _path: &std::path::Path,
            _contents: &str,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Err("filesystem not available in this test".into())
        }
    }

    fn test_context(replies: Vec<Result<String, String>>) -> ServiceContext {
        ServiceContext {
            generator: Box::new(ScriptedGenerator::new(replies)),
            ids: Box::new(NoIds),
            fs: Box::new(NoFs),
        }
    }

    #[tokio::test]
    async fn structured_reply_becomes_records() {
        let ctx = test_context(vec![Ok(
            r#"{"files": [{"path": "src/App.tsx", "content": "X", "language": "tsx"}]}"#
                .to_string(),
        )]);
        let records = generate_project(&ctx, "a counter app", "test-model").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "src/App.tsx");
    }

    #[tokio::test]
    async fn html_blob_becomes_one_synthetic_html_file() {
        let blob = "<!DOCTYPE html>\n<html><body>hi</body></html>";
        let ctx = test_context(vec![Ok(blob.to_string())]);
        let records = generate_project(&ctx, "a landing page", "test-model").await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "a-landing-page.html");
        assert_eq!(records[0].content, blob);
        assert_eq!(records[0].language.as_deref(), Some("html"));
    }

    #[tokio::test]
    async fn declared_language_beats_sniffing() {
        let ctx = test_context(vec![Ok(
            r#"{"code": "x = 1", "language": "python"}"#.to_string(),
        )]);
        let records = generate_project(&ctx, "snippet", "test-model").await.unwrap();
        assert_eq!(records[0].path, "snippet.py");
    }

    #[tokio::test]
    async fn provider_error_surfaces_verbatim() {
        let ctx = test_context(vec![Ok(r#"{"error": "quota exceeded"}"#.to_string())]);
        let err = generate_project(&ctx, "anything", "test-model").await.unwrap_err();
        assert_eq!(err, "quota exceeded");
    }

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        let ctx = test_context(vec![Err("connection refused".to_string())]);
        let err = generate_project(&ctx, "anything", "test-model").await.unwrap_err();
        assert!(err.contains("connection refused"));
    }
}
