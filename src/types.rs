//! Core data types: competing entries, risk levels, and the similarity verdict.
//!
//! The verdict is the analyzer's only output and is serialized with camelCase
//! field names to match the JSON boundary contract consumed by the submission
//! API.

use serde::{Deserialize, Serialize};

use crate::error::VerdictError;

/// An immutable snapshot of one competing team's submission text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetingEntry {
    pub title: String,
    pub description: String,
    pub team_name: String,
}

impl CompetingEntry {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        team_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            team_name: team_name.into(),
        }
    }
}

/// Three-tier classification of how likely a submission is to overlap
/// conceptually with others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
}

impl RiskLevel {
    /// Classify an overall-similarity percentage.
    ///
    /// Thresholds are tuning constants kept for parity with the production
    /// heuristic: >60 is high, >30 is medium, everything else low.
    pub fn for_similarity(similarity_pct: f64) -> Self {
        if similarity_pct > 60.0 {
            RiskLevel::High
        } else if similarity_pct > 30.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// The analyzer's verdict on one candidate submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityVerdict {
    /// Similarity percentage in 0-100.
    pub overall_similarity: f64,
    /// Uniqueness percentage in 0-100. The keyword path computes this as
    /// exactly `100 - overall_similarity`.
    pub uniqueness_score: f64,
    /// Shared concepts, at most 10, in the order they were found while
    /// scanning the candidate's keywords.
    pub similar_concepts: Vec<String>,
    pub risk_level: RiskLevel,
    /// Advisory text, never empty.
    pub suggestions: Vec<String>,
}

impl SimilarityVerdict {
    /// Range and shape guard applied to every verdict before it is returned,
    /// whether it came from the model or from the keyword heuristic.
    ///
    /// Deliberately does not cross-check `uniqueness_score` against
    /// `overall_similarity`: the model is instructed to produce the
    /// complement but its judgment is taken as-is once the ranges hold.
    pub fn validate(&self) -> Result<(), VerdictError> {
        Self::check_score("overallSimilarity", self.overall_similarity)?;
        Self::check_score("uniquenessScore", self.uniqueness_score)?;
        if self.similar_concepts.len() > 10 {
            return Err(VerdictError::TooManyConcepts {
                count: self.similar_concepts.len(),
            });
        }
        if self.suggestions.is_empty() {
            return Err(VerdictError::EmptySuggestions);
        }
        Ok(())
    }

    fn check_score(field: &'static str, value: f64) -> Result<(), VerdictError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(VerdictError::ScoreOutOfRange { field, value });
        }
        Ok(())
    }
}

/// Corpus-wide uniqueness statistics for an event's submissions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniquenessMetrics {
    /// Distinct-keyword ratio across all submissions, rounded, capped at 100.
    pub average_uniqueness: f64,
    pub total_analyzed: usize,
}
