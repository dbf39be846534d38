//! Outbound client for the classification endpoint.
//!
//! `AnalysisClient` is the seam the form talks to; `HttpAnalysisClient` is the real
//! reqwest-backed implementation. Tests plug in their own implementations.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::config::AppConfig;
use crate::error::AnalysisError;
use crate::model::{AnalysisResult, AnalyzeRequest};

/// Default endpoint: the local classification server on loopback.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/analyze_text";

#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Send `text` for classification. Exactly one outbound request per call.
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError>;
    /// Target name for diagnostics.
    fn endpoint(&self) -> &str;
}

/// Convenient alias used by callers.
pub type DynAnalysisClient = Arc<dyn AnalysisClient>;

#[derive(Clone)]
pub struct HttpAnalysisClient {
    http: Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpAnalysisClient {
    /// Client with the default endpoint and timeouts.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeouts(
            endpoint,
            Some(Duration::from_secs(30)),
            Duration::from_secs(4),
        )
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        Self::with_timeouts(cfg.endpoint.clone(), cfg.request_timeout(), cfg.connect_timeout())
    }

    /// `timeout = None` leaves the request deadline unbounded.
    pub fn with_timeouts(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("truthguard/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect_timeout);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder.build().context("building reqwest client")?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    fn map_send_error(&self, e: reqwest::Error) -> AnalysisError {
        match self.timeout {
            Some(t) if e.is_timeout() => AnalysisError::Timeout(t),
            _ => AnalysisError::Transport(e),
        }
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let body = AnalyzeRequest {
            text: text.to_string(),
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AnalysisError::Status { status });
        }

        // Read bytes first so a bad body surfaces as a decode error, not a transport one.
        let bytes = resp.bytes().await.map_err(|e| self.map_send_error(e))?;
        serde_json::from_slice(&bytes).map_err(AnalysisError::Decode)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
