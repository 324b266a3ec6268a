//! Integration tests for the full analysis flow: AI path, fallback
//! triggering, and the degradation guarantees.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use uniqueness_analyzer::{
    AiError, CompetingEntry, MockGenerativeClient, RiskLevel, UniquenessAnalyzer,
};

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("uniqueness_analyzer=debug")
            .with_test_writer()
            .try_init();
    });
}

fn corpus() -> Vec<CompetingEntry> {
    vec![
        CompetingEntry::new(
            "EcoTrack",
            "Carbon footprint tracker using AI for sustainability insights",
            "Team Green",
        ),
        CompetingEntry::new(
            "MediBot",
            "Conversational triage assistant for rural clinics",
            "Team Health",
        ),
    ]
}

const CANDIDATE: &str =
    "An AI powered community sustainability tracker for carbon footprint reduction";

#[tokio::test]
async fn ai_path_returns_validated_model_verdict() {
    let client = MockGenerativeClient::with_response(
        r#"{
            "overallSimilarity": 72,
            "uniquenessScore": 28,
            "similarConcepts": ["carbon tracking", "sustainability"],
            "riskLevel": "HIGH",
            "suggestions": ["Differentiate the data sources you use"]
        }"#,
    );
    let analyzer = UniquenessAnalyzer::with_client(Arc::new(client));

    let verdict = analyzer.analyze(CANDIDATE, &corpus()).await;
    assert_eq!(verdict.overall_similarity, 72.0);
    assert_eq!(verdict.uniqueness_score, 28.0);
    assert_eq!(verdict.risk_level, RiskLevel::High);
    assert_eq!(
        verdict.similar_concepts,
        vec!["carbon tracking", "sustainability"]
    );
}

#[tokio::test]
async fn malformed_ai_json_falls_back_to_pure_keyword_verdict() {
    // The fallback verdict must equal what the keyword path alone produces:
    // no partial AI data may leak into the result.
    init_tracing();
    let client = MockGenerativeClient::with_response("I am not JSON, sorry.");
    let with_broken_ai = UniquenessAnalyzer::with_client(Arc::new(client));
    let keyword_only = UniquenessAnalyzer::fallback_only();

    let corpus = corpus();
    let degraded = with_broken_ai.analyze(CANDIDATE, &corpus).await;
    let pure = keyword_only.analyze(CANDIDATE, &corpus).await;
    assert_eq!(degraded, pure);
}

#[tokio::test]
async fn schema_invalid_ai_verdict_falls_back() {
    let client = MockGenerativeClient::with_response(
        r#"{
            "overallSimilarity": 140,
            "uniquenessScore": -40,
            "similarConcepts": [],
            "riskLevel": "HIGH",
            "suggestions": ["x"]
        }"#,
    );
    let analyzer = UniquenessAnalyzer::with_client(Arc::new(client));

    let verdict = analyzer.analyze(CANDIDATE, &corpus()).await;
    // Keyword path: 4 of the candidate's 7 significant words overlap.
    assert_eq!(verdict.overall_similarity, 57.0);
    assert_eq!(verdict.uniqueness_score, 43.0);
    assert_eq!(verdict.risk_level, RiskLevel::Medium);
}

#[tokio::test]
async fn transport_errors_fall_back() {
    for err in [
        AiError::Connection {
            message: "connection refused".into(),
        },
        AiError::Timeout { timeout_secs: 30 },
        AiError::AuthFailed,
        AiError::Forbidden,
        AiError::QuotaExceeded {
            message: "daily limit reached".into(),
        },
    ] {
        let analyzer = UniquenessAnalyzer::with_client(Arc::new(
            MockGenerativeClient::with_error(err),
        ));
        let verdict = analyzer.analyze(CANDIDATE, &corpus()).await;
        assert_eq!(verdict.overall_similarity, 57.0);
        assert_eq!(verdict.suggestions.len(), 3);
    }
}

#[tokio::test]
async fn analyzer_without_client_uses_keyword_path() {
    let analyzer = UniquenessAnalyzer::fallback_only();
    let verdict = analyzer.analyze(CANDIDATE, &corpus()).await;
    assert_eq!(verdict.overall_similarity, 57.0);
    assert_eq!(verdict.risk_level, RiskLevel::Medium);
    assert_eq!(
        verdict.similar_concepts,
        vec!["sustainability", "tracker", "carbon", "footprint"]
    );
}

#[tokio::test]
async fn empty_corpus_is_fully_unique() {
    let analyzer = UniquenessAnalyzer::fallback_only();
    let verdict = analyzer.analyze(CANDIDATE, &[]).await;
    assert_eq!(verdict.overall_similarity, 0.0);
    assert_eq!(verdict.uniqueness_score, 100.0);
    assert_eq!(verdict.risk_level, RiskLevel::Low);
}

#[tokio::test]
async fn keyword_path_is_idempotent() {
    let analyzer = UniquenessAnalyzer::fallback_only();
    let corpus = corpus();
    let first = analyzer.analyze(CANDIDATE, &corpus).await;
    let second = analyzer.analyze(CANDIDATE, &corpus).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn verdict_serializes_to_boundary_contract() {
    let analyzer = UniquenessAnalyzer::fallback_only();
    let verdict = analyzer.analyze(CANDIDATE, &corpus()).await;

    let json = serde_json::to_value(&verdict).unwrap();
    assert_eq!(json["overallSimilarity"], 57.0);
    assert_eq!(json["uniquenessScore"], 43.0);
    assert_eq!(json["riskLevel"], "MEDIUM");
    assert!(json["similarConcepts"].as_array().unwrap().len() <= 10);
    assert!(!json["suggestions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn corpus_entries_deserialize_from_wire_format() {
    let raw = r#"[
        {"title": "EcoTrack", "description": "carbon tracker", "teamName": "Team Green"}
    ]"#;
    let corpus: Vec<CompetingEntry> = serde_json::from_str(raw).unwrap();
    assert_eq!(corpus[0].team_name, "Team Green");

    let analyzer = UniquenessAnalyzer::fallback_only();
    let verdict = analyzer.analyze("carbon tracker", &corpus).await;
    assert_eq!(verdict.overall_similarity, 100.0);
    assert_eq!(verdict.risk_level, RiskLevel::High);
}
