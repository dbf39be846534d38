// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod format;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod view;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, router, AppState};
pub use crate::client::{AnalysisClient, DynAnalysisClient, HttpAnalysisClient, DEFAULT_ENDPOINT};
pub use crate::config::AppConfig;
pub use crate::error::AnalysisError;
pub use crate::form::{AnalysisForm, AnalysisOutcome, FormSnapshot, Phase, StalePolicy};
pub use crate::model::{AnalysisResult, AnalyzeRequest};

use std::sync::Arc;

/// Build the form wired to the configured HTTP endpoint.
pub fn build_form(cfg: &AppConfig) -> anyhow::Result<AnalysisForm> {
    let client = HttpAnalysisClient::from_config(cfg)?;
    Ok(AnalysisForm::new(Arc::new(client)).with_policy(cfg.stale_policy()))
}

/// Full application router (form page, JSON API and `/metrics`) for a config.
pub fn app(cfg: &AppConfig) -> anyhow::Result<axum::Router> {
    let form = build_form(cfg)?;
    let metrics = crate::metrics::Metrics::init(cfg)?;
    tracing::info!(
        endpoint = %cfg.endpoint,
        timeout_secs = cfg.timeout_secs,
        policy = ?cfg.stale_policy(),
        show_errors = cfg.show_errors,
        "truthguard form ready"
    );
    let state = AppState::new(form).with_show_errors(cfg.show_errors);
    Ok(create_router(state).merge(metrics.router()))
}
