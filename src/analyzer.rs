//! The uniqueness analyzer — orchestrates the AI path and the keyword
//! fallback.
//!
//! `analyze` is total: a uniqueness check is advisory and must never block a
//! submission flow, so every internal failure degrades rather than
//! propagating. The AI call is attempted at most once per analysis; a failed
//! attempt moves straight to the deterministic fallback to bound worst-case
//! latency.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::ai::{GeminiClient, GenerativeClient, build_prompt};
use crate::config::AnalyzerConfig;
use crate::error::AiError;
use crate::keywords;
use crate::types::{CompetingEntry, RiskLevel, SimilarityVerdict, UniquenessMetrics};

/// Advisory line attached to the degraded default verdict.
const DEGRADED_SUGGESTION: &str =
    "Uniqueness analysis completed using basic keyword matching. For enhanced AI analysis, \
     ensure an API key is properly configured.";

/// Analyzes a candidate submission against competing submissions from the
/// same event.
pub struct UniquenessAnalyzer {
    client: Option<Arc<dyn GenerativeClient>>,
}

impl UniquenessAnalyzer {
    /// Create an analyzer from configuration.
    ///
    /// Builds a Gemini client iff an API key is configured. A client that
    /// fails to build downgrades the analyzer to fallback-only; construction
    /// itself never fails.
    pub fn new(config: &AnalyzerConfig) -> Self {
        let client: Option<Arc<dyn GenerativeClient>> = if config.api_key.is_some() {
            match GeminiClient::new(config) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    warn!(
                        category = %e.category(),
                        error = %e,
                        "Failed to initialize generative client, keyword fallback only"
                    );
                    None
                }
            }
        } else {
            debug!("No API key configured, keyword fallback only");
            None
        };

        Self { client }
    }

    /// Create an analyzer with an injected generative client.
    pub fn with_client(client: Arc<dyn GenerativeClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Create an analyzer that only ever uses the keyword heuristic.
    pub fn fallback_only() -> Self {
        Self { client: None }
    }

    /// Analyze a candidate description against the corpus and return a
    /// verdict. Never returns an error and never panics.
    ///
    /// Tries the generative path first when a client is available; on any
    /// failure (transport, quota, auth, malformed or schema-invalid
    /// response) it logs one structured warning and falls back to the
    /// keyword heuristic. If even the fallback produces an invalid verdict,
    /// a conservative "fully unique, low risk" default is returned.
    pub async fn analyze(
        &self,
        candidate_text: &str,
        corpus: &[CompetingEntry],
    ) -> SimilarityVerdict {
        if let Some(client) = &self.client {
            match Self::ai_verdict(client.as_ref(), candidate_text, corpus).await {
                Ok(verdict) => {
                    debug!(
                        overall_similarity = verdict.overall_similarity,
                        "Generative analysis succeeded"
                    );
                    return verdict;
                }
                Err(e) => {
                    warn!(
                        category = %e.category(),
                        error = %e,
                        "Generative analysis failed, using keyword fallback"
                    );
                }
            }
        }

        let verdict = keywords::keyword_verdict(candidate_text, corpus);
        match verdict.validate() {
            Ok(()) => verdict,
            Err(e) => {
                warn!(error = %e, "Keyword analysis produced an invalid verdict, returning degraded default");
                Self::degraded_verdict()
            }
        }
    }

    /// One attempt at the generative path: prompt, generate, parse, validate.
    /// No retry.
    async fn ai_verdict(
        client: &dyn GenerativeClient,
        candidate_text: &str,
        corpus: &[CompetingEntry],
    ) -> Result<SimilarityVerdict, AiError> {
        let prompt = build_prompt(candidate_text, corpus);
        let text = client.generate(&prompt).await?;

        let verdict: SimilarityVerdict =
            serde_json::from_str(&text).map_err(|e| AiError::ResponseParse {
                message: format!("AI response is not a valid verdict: {}", e),
            })?;
        verdict.validate()?;

        Ok(verdict)
    }

    /// The ultimate fallback: fully unique, low risk, with a single advisory
    /// line noting the degraded analysis.
    fn degraded_verdict() -> SimilarityVerdict {
        SimilarityVerdict {
            overall_similarity: 0.0,
            uniqueness_score: 100.0,
            similar_concepts: Vec::new(),
            risk_level: RiskLevel::Low,
            suggestions: vec![DEGRADED_SUGGESTION.to_string()],
        }
    }

    /// Corpus-wide uniqueness statistics for organizer dashboards.
    pub fn uniqueness_metrics(submissions: &[CompetingEntry]) -> UniquenessMetrics {
        keywords::uniqueness_metrics(submissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockGenerativeClient;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_degraded_verdict_is_conservative_and_valid() {
        let verdict = UniquenessAnalyzer::degraded_verdict();
        assert_eq!(verdict.overall_similarity, 0.0);
        assert_eq!(verdict.uniqueness_score, 100.0);
        assert_eq!(verdict.risk_level, RiskLevel::Low);
        assert!(verdict.similar_concepts.is_empty());
        assert_eq!(verdict.suggestions.len(), 1);
        assert!(verdict.validate().is_ok());
    }

    #[test]
    fn test_new_without_key_has_no_client() {
        let analyzer = UniquenessAnalyzer::new(&AnalyzerConfig::default());
        assert!(analyzer.client.is_none());
    }

    #[test]
    fn test_new_with_key_builds_client() {
        let analyzer = UniquenessAnalyzer::new(&AnalyzerConfig::with_api_key("test-key"));
        assert!(analyzer.client.is_some());
    }

    #[tokio::test]
    async fn test_ai_verdict_rejects_schema_violations() {
        // Scores parse but are out of range -> SchemaInvalid, not a panic.
        let client = MockGenerativeClient::with_response(
            r#"{"overallSimilarity": 250, "uniquenessScore": -150, "similarConcepts": [],
                "riskLevel": "LOW", "suggestions": ["x"]}"#,
        );
        let result = UniquenessAnalyzer::ai_verdict(&client, "candidate", &[]).await;
        assert!(matches!(result, Err(AiError::SchemaInvalid(_))));
    }

    #[tokio::test]
    async fn test_ai_verdict_rejects_bad_enum() {
        let client = MockGenerativeClient::with_response(
            r#"{"overallSimilarity": 10, "uniquenessScore": 90, "similarConcepts": [],
                "riskLevel": "SEVERE", "suggestions": ["x"]}"#,
        );
        let result = UniquenessAnalyzer::ai_verdict(&client, "candidate", &[]).await;
        assert!(matches!(result, Err(AiError::ResponseParse { .. })));
    }
}
