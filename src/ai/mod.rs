//! Generative analysis path.
//!
//! Defines the `GenerativeClient` trait for model-agnostic text generation,
//! the prompt used for the uniqueness comparison, and a mock client for tests.
//! The concrete Gemini implementation lives in [`gemini`].

pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;

use crate::error::AiError;
use crate::types::CompetingEntry;

/// Trait for generative-text backends used by the AI analysis path.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Generate a completion for the prompt and return the raw response text.
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

/// Build the uniqueness-comparison prompt.
///
/// Embeds the candidate description and an enumerated title+description list
/// of the competing submissions, and asks for a JSON object with exactly the
/// five verdict fields.
pub fn build_prompt(candidate_text: &str, corpus: &[CompetingEntry]) -> String {
    let existing: Vec<String> = corpus
        .iter()
        .enumerate()
        .map(|(i, sub)| format!("{}. {}: {}", i + 1, sub.title, sub.description))
        .collect();

    format!(
        r#"Analyze the following project description for uniqueness compared to existing submissions:

Current Project: "{candidate_text}"

Existing Submissions:
{submissions}

Please provide a JSON response with:
- overallSimilarity: number (0-100)
- uniquenessScore: number (0-100, where 100-similarity)
- similarConcepts: array of strings (concepts found in multiple submissions)
- riskLevel: "LOW" | "MEDIUM" | "HIGH"
- suggestions: array of strings (how to improve uniqueness)

Focus on conceptual similarity, not just keyword matching."#,
        submissions = existing.join("\n"),
    )
}

/// Mock generative client for testing.
///
/// Returns queued responses in order; once the queue is empty every call
/// fails with a connection error.
#[derive(Default)]
pub struct MockGenerativeClient {
    responses: std::sync::Mutex<Vec<Result<String, AiError>>>,
}

impl MockGenerativeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that returns the given text once.
    pub fn with_response(text: &str) -> Self {
        let client = Self::new();
        client.queue(Ok(text.to_string()));
        client
    }

    /// Create a mock that fails once with the given error.
    pub fn with_error(err: AiError) -> Self {
        let client = Self::new();
        client.queue(Err(err));
        client
    }

    /// Queue a result to be returned by the next `generate` call.
    pub fn queue(&self, result: Result<String, AiError>) {
        self.responses.lock().unwrap().push(result);
    }
}

#[async_trait]
impl GenerativeClient for MockGenerativeClient {
    async fn generate(&self, _prompt: &str) -> Result<String, AiError> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(AiError::Connection {
                message: "mock client has no queued responses".to_string(),
            })
        } else {
            responses.remove(0)
        }
    }
}
