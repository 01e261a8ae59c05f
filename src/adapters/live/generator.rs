//! Live adapter for the `GenerationClient` port using the Gemini API.

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::generator::{
    GenerationClient, GenerationFuture, GenerationReply, GenerationRequest,
};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Live generation client that calls the Gemini `generateContent` API.
pub struct LiveGenerationClient {
    client: Client,
}

impl LiveGenerationClient {
    /// Creates a new live generation client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for LiveGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Request body sent to the Gemini `generateContent` endpoint.
#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

/// One content block in the Gemini request.
#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

/// A text part in the Gemini request.
#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

/// Generation parameters for the Gemini request.
#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

/// Top-level response from the Gemini API.
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// A candidate completion in the Gemini response.
#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

/// Content of one candidate.
#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

/// A text part of a candidate's content.
#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Error response from the Gemini API.
#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

/// Detail inside a Gemini error response.
#[derive(Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

impl GenerationClient for LiveGenerationClient {
    fn generate(&self, request: &GenerationRequest) -> GenerationFuture<'_> {
        let model = request.model.clone();
        let prompt = request.prompt.clone();
        let max_tokens = request.max_tokens;

        Box::pin(async move {
            let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
                Box::<dyn std::error::Error + Send + Sync>::from(
                    "GEMINI_API_KEY environment variable not set",
                )
            })?;

            let body = GeminiRequest {
                contents: vec![GeminiContent { parts: vec![GeminiPart { text: &prompt }] }],
                generation_config: GenerationConfig { max_output_tokens: max_tokens },
            };

            let url = format!("{GEMINI_API_URL}/{model}:generateContent");
            let response = self
                .client
                .post(url)
                .header("x-goog-api-key", &api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Gemini API request failed: {e}").into()
                })?;

            let status = response.status();
            let response_text =
                response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to read Gemini API response: {e}").into()
                })?;

            if !status.is_success() {
                let msg = serde_json::from_str::<GeminiError>(&response_text)
                    .map(|e| e.error.message)
                    .unwrap_or(response_text);
                return Err(format!("Gemini API error ({}): {msg}", status.as_u16()).into());
            }

            let api_response: GeminiResponse = serde_json::from_str(&response_text).map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to parse Gemini API response: {e}").into()
                },
            )?;

            let text = api_response
                .candidates
                .into_iter()
                .next()
                .map(|c| c.content.parts.into_iter().map(|p| p.text).collect::<String>())
                .unwrap_or_default();

            Ok(GenerationReply { text })
        })
    }
}
