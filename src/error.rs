//! Error types for the uniqueness analyzer.
//!
//! Uses `thiserror` for structured error variants. Every variant here is
//! recovered internally by [`crate::analyzer::UniquenessAnalyzer::analyze`];
//! none crosses its boundary.

/// Errors from the generative (AI-backed) analysis path.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("no API credential configured")]
    MissingCredential,

    #[error("provider connection failed: {message}")]
    Connection { message: String },

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("authentication failed (check the API key)")]
    AuthFailed,

    #[error("API access forbidden (check API key permissions)")]
    Forbidden,

    #[error("API quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("API request failed: {message}")]
    ApiRequest { message: String },

    #[error("API response parse error: {message}")]
    ResponseParse { message: String },

    #[error("AI verdict failed schema validation: {0}")]
    SchemaInvalid(#[from] VerdictError),
}

impl AiError {
    /// Classify the failure for the structured fallback warning.
    pub fn category(&self) -> FailureCategory {
        match self {
            AiError::AuthFailed => FailureCategory::Auth,
            AiError::Forbidden => FailureCategory::Forbidden,
            AiError::QuotaExceeded { .. } => FailureCategory::Quota,
            _ => FailureCategory::Other,
        }
    }
}

/// Coarse failure classification emitted when the AI path falls through
/// to the keyword heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Auth,
    Forbidden,
    Quota,
    Other,
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth => write!(f, "auth"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::Quota => write!(f, "quota"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Violations found when validating a [`crate::types::SimilarityVerdict`].
#[derive(Debug, thiserror::Error)]
pub enum VerdictError {
    #[error("{field} is {value}, expected a finite number in 0-100")]
    ScoreOutOfRange { field: &'static str, value: f64 },

    #[error("similarConcepts has {count} entries, expected at most 10")]
    TooManyConcepts { count: usize },

    #[error("suggestions must not be empty")]
    EmptySuggestions,
}

/// Errors from the configuration loader.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Extract(#[from] Box<figment::Error>),
}
