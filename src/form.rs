//! The analysis form: three state cells and the one operation that drives them.
//!
//! Cells live behind a single mutex that is never held across an `.await`, so the
//! form can be shared behind `Arc` and driven from several tasks at once.

use std::sync::{Mutex, MutexGuard};

use metrics::{counter, gauge};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::client::DynAnalysisClient;
use crate::model::AnalysisResult;

/// What to do with a response when a newer request was issued after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Apply only the response to the most recently issued request.
    #[default]
    LatestIssued,
    /// Apply every response in arrival order; the last one to arrive wins.
    LastArrival,
}

/// Derived status of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Result of one `run_analysis` call.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The response was stored as the current result.
    Applied(AnalysisResult),
    /// The request failed; the stored result was left as it was.
    Failed(String),
    /// A newer request was issued while this one was in flight; its response was dropped.
    Superseded,
}

/// Point-in-time copy of the form state, used for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSnapshot {
    pub input_text: String,
    pub is_loading: bool,
    pub result: Option<AnalysisResult>,
    pub last_error: Option<String>,
    pub phase: Phase,
}

#[derive(Debug, Default)]
struct FormState {
    input_text: String,
    result: Option<AnalysisResult>,
    last_error: Option<String>,
    pending: usize,
    // sequence number of the most recently issued request; 0 = none yet
    latest_seq: u64,
}

impl FormState {
    fn phase(&self) -> Phase {
        if self.pending > 0 {
            Phase::Loading
        } else if self.last_error.is_some() {
            Phase::Failed
        } else if self.result.is_some() {
            Phase::Succeeded
        } else {
            Phase::Idle
        }
    }
}

pub struct AnalysisForm {
    client: DynAnalysisClient,
    policy: StalePolicy,
    state: Mutex<FormState>,
}

impl AnalysisForm {
    pub fn new(client: DynAnalysisClient) -> Self {
        Self {
            client,
            policy: StalePolicy::default(),
            state: Mutex::new(FormState::default()),
        }
    }

    pub fn with_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        // Every critical section leaves the state consistent, so a poisoned lock is usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.lock().input_text = text.into();
    }

    pub fn input_text(&self) -> String {
        self.lock().input_text.clone()
    }

    /// True while at least one analysis is in flight.
    pub fn is_loading(&self) -> bool {
        self.lock().pending > 0
    }

    pub fn result(&self) -> Option<AnalysisResult> {
        self.lock().result.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let g = self.lock();
        FormSnapshot {
            input_text: g.input_text.clone(),
            is_loading: g.pending > 0,
            result: g.result.clone(),
            last_error: g.last_error.clone(),
            phase: g.phase(),
        }
    }

    /// Set the input and analyze it in one step.
    pub async fn submit(&self, text: impl Into<String>) -> AnalysisOutcome {
        let (seq, text) = {
            let mut g = self.lock();
            g.input_text = text.into();
            begin(&mut g)
        };
        self.finish_request(seq, text).await
    }

    /// Analyze the current input. Empty input is sent as-is.
    pub async fn run_analysis(&self) -> AnalysisOutcome {
        let (seq, text) = {
            let mut g = self.lock();
            begin(&mut g)
        };
        self.finish_request(seq, text).await
    }

    async fn finish_request(&self, seq: u64, text: String) -> AnalysisOutcome {
        counter!("truthguard_analysis_requests_total").increment(1);
        let in_flight = InFlight::start(self);
        debug!(seq, endpoint = self.client.endpoint(), "analysis request issued");

        let response = self.client.analyze(&text).await;

        let mut g = self.lock();
        in_flight.settle(&mut g);

        let stale = self.policy == StalePolicy::LatestIssued && seq != g.latest_seq;
        if stale {
            counter!("truthguard_analysis_superseded_total").increment(1);
            debug!(seq, latest = g.latest_seq, "dropping superseded analysis response");
            return AnalysisOutcome::Superseded;
        }

        match response {
            Ok(result) => {
                info!(
                    seq,
                    classification = %result.classification,
                    fake_news_score = result.fake_news_score,
                    "analysis applied"
                );
                g.result = Some(result.clone());
                g.last_error = None;
                AnalysisOutcome::Applied(result)
            }
            Err(e) => {
                counter!("truthguard_analysis_failures_total", "kind" => e.kind()).increment(1);
                warn!(seq, error = %e, "analysis failed");
                let reason = e.to_string();
                g.last_error = Some(reason.clone());
                AnalysisOutcome::Failed(reason)
            }
        }
    }
}

fn begin(g: &mut FormState) -> (u64, String) {
    g.pending += 1;
    g.latest_seq += 1;
    (g.latest_seq, g.input_text.clone())
}

/// Keeps `pending` honest when a request future is dropped before it resolves.
struct InFlight<'a> {
    form: &'a AnalysisForm,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn start(form: &'a AnalysisForm) -> Self {
        gauge!("truthguard_analysis_in_flight").increment(1.0);
        Self {
            form,
            settled: false,
        }
    }

    fn settle(mut self, g: &mut FormState) {
        g.pending = g.pending.saturating_sub(1);
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        gauge!("truthguard_analysis_in_flight").decrement(1.0);
        if !self.settled {
            let mut g = self.form.lock();
            g.pending = g.pending.saturating_sub(1);
        }
    }
}
