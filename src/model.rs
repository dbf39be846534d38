// src/model.rs
use serde::{Deserialize, Serialize};

/// Outbound body for `POST /analyze_text`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Scores returned by the classification endpoint.
///
/// Only ever built by deserializing a successful response; the form replaces it
/// wholesale on every applied analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    /// The analyzed text, echoed back by the server.
    pub text: String,
    /// Fake-news probability, expected in 0..=1.
    pub fake_news_score: f64,
    /// Source trustworthiness, expected in 0..=1.
    pub source_reliability: f64,
    /// Categorical label assigned by the server.
    pub classification: String,
}
