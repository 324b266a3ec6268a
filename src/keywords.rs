//! Keyword-overlap heuristic — the deterministic fallback analysis path.
//!
//! A "significant word" is a lower-cased token longer than 3 characters.
//! The length cutoff stands in for a stopword list (articles and prepositions
//! fall under it) and must stay at >3 for output parity with the production
//! heuristic. Everything here is pure and in-memory.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::{CompetingEntry, RiskLevel, SimilarityVerdict, UniquenessMetrics};

/// Advisory copy attached to every keyword-path verdict.
const FALLBACK_SUGGESTIONS: [&str; 3] = [
    "Consider adding more specific technical details to your project",
    "Highlight unique features that differentiate your solution",
    "Include innovative approaches or methodologies you're using",
];

fn word_splitter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\W+").expect("static regex"))
}

/// Extract the significant words of a text: split on runs of non-word
/// characters, lowercase, keep length > 3, dedup preserving first-occurrence
/// order.
pub fn significant_words(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for token in word_splitter().split(&text.to_lowercase()) {
        if token.chars().count() > 3 && seen.insert(token.to_string()) {
            words.push(token.to_string());
        }
    }
    words
}

/// Pool the significant words of every competing entry's description into one
/// set. A word appearing in several entries is counted once.
pub fn pooled_keywords(corpus: &[CompetingEntry]) -> HashSet<String> {
    corpus
        .iter()
        .flat_map(|entry| significant_words(&entry.description))
        .collect()
}

/// Score a candidate against the corpus by keyword overlap.
///
/// Similarity is the share of the candidate's significant words that also
/// appear anywhere in the corpus, rounded to a whole percentage. An empty
/// candidate keyword set yields 0% similarity (100% uniqueness) rather than
/// a division error.
pub fn keyword_verdict(candidate_text: &str, corpus: &[CompetingEntry]) -> SimilarityVerdict {
    let candidate_keywords = significant_words(candidate_text);
    let pool = pooled_keywords(corpus);

    let common_keywords: Vec<String> = candidate_keywords
        .iter()
        .filter(|word| pool.contains(*word))
        .cloned()
        .collect();

    let overall_similarity = if candidate_keywords.is_empty() {
        0.0
    } else {
        (common_keywords.len() as f64 / candidate_keywords.len() as f64 * 100.0).round()
    };

    SimilarityVerdict {
        overall_similarity,
        uniqueness_score: 100.0 - overall_similarity,
        similar_concepts: common_keywords.into_iter().take(10).collect(),
        risk_level: RiskLevel::for_similarity(overall_similarity),
        suggestions: FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Corpus-wide uniqueness statistics: the ratio of distinct significant words
/// to all significant-word occurrences across every submission description.
///
/// An empty corpus (or one with no significant words at all) reports full
/// uniqueness.
pub fn uniqueness_metrics(submissions: &[CompetingEntry]) -> UniquenessMetrics {
    let total_analyzed = submissions.len();
    if total_analyzed == 0 {
        return UniquenessMetrics {
            average_uniqueness: 100.0,
            total_analyzed: 0,
        };
    }

    let all_keywords: Vec<String> = submissions
        .iter()
        .flat_map(|sub| {
            word_splitter()
                .split(&sub.description.to_lowercase())
                .filter(|token| token.chars().count() > 3)
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();

    if all_keywords.is_empty() {
        return UniquenessMetrics {
            average_uniqueness: 100.0,
            total_analyzed,
        };
    }

    let distinct: HashSet<&str> = all_keywords.iter().map(String::as_str).collect();
    let ratio = distinct.len() as f64 / all_keywords.len() as f64 * 100.0;

    UniquenessMetrics {
        average_uniqueness: ratio.min(100.0).round(),
        total_analyzed,
    }
}
