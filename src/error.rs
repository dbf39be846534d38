// src/error.rs
use std::time::Duration;

use reqwest::StatusCode;

/// Why a single analysis request failed.
///
/// The form treats every variant the same way (log, keep the previous result);
/// the split exists for diagnostics and metrics.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("analysis request failed: endpoint returned {status}")]
    Status { status: StatusCode },

    #[error("analysis request failed: no response within {0:?}")]
    Timeout(Duration),

    #[error("analysis request failed: malformed response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl AnalysisError {
    /// Short label used as a metrics tag.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Transport(_) => "transport",
            AnalysisError::Status { .. } => "status",
            AnalysisError::Timeout(_) => "timeout",
            AnalysisError::Decode(_) => "decode",
        }
    }
}
