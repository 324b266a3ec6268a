//! # Uniqueness Analyzer
//!
//! Scores a candidate project submission against competing submissions from
//! the same event and produces a similarity/uniqueness verdict.
//! Tries a Gemini-backed semantic comparison first; on any failure it falls
//! back to a deterministic keyword-overlap heuristic, and in the worst case
//! returns a conservative "fully unique" default. The analyzer is total:
//! `analyze` never surfaces an error to the caller.

pub mod ai;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod keywords;
pub mod types;

// Re-export commonly used types at the crate root.
pub use ai::{GeminiClient, GenerativeClient, MockGenerativeClient};
pub use analyzer::UniquenessAnalyzer;
pub use config::AnalyzerConfig;
pub use error::{AiError, ConfigError, FailureCategory, VerdictError};
pub use types::{CompetingEntry, RiskLevel, SimilarityVerdict, UniquenessMetrics};
