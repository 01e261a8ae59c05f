//! Generation client port for hosted language-model completions.
//!
//! The model call is the one asynchronous boundary in the system. It is
//! opaque to the core: a prompt goes in, text comes out, and the call can
//! fail. No retries, no cancellation of an in-flight request.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

/// Boxed future type alias used by [`GenerationClient`] to keep the trait
/// dyn-compatible.
pub type GenerationFuture<'a> = Pin<
    Box<dyn Future<Output = Result<GenerationReply, Box<dyn Error + Send + Sync>>> + Send + 'a>,
>;

/// A request to generate project code from a prompt.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The model identifier (e.g. `"gemini-2.0-flash"`).
    pub model: String,
    /// The full instruction prompt to send.
    pub prompt: String,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
}

/// The raw reply from a generation call, before any parsing.
#[derive(Debug, Clone)]
pub struct GenerationReply {
    /// The generated text, exactly as the provider returned it.
    pub text: String,
}

/// Sends generation requests to a hosted language model.
pub trait GenerationClient: Send + Sync {
    /// Generates a reply for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, auth, rate-limit,
    /// etc.). The forest is never touched on failure.
    fn generate(&self, request: &GenerationRequest) -> GenerationFuture<'_>;
}
