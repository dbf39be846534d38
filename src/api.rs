use std::sync::Arc;

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::form::{AnalysisForm, FormSnapshot};
use crate::model::AnalyzeRequest;
use crate::view::{render_html, FormView};

#[derive(Clone)]
pub struct AppState {
    pub form: Arc<AnalysisForm>,
    /// Render the failure line on the page.
    pub show_errors: bool,
}

impl AppState {
    pub fn new(form: AnalysisForm) -> Self {
        Self {
            form: Arc::new(form),
            show_errors: false,
        }
    }

    pub fn with_show_errors(mut self, show: bool) -> Self {
        self.show_errors = show;
        self
    }
}

/// Router serving the form page plus a small JSON surface over the same state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/", get(index))
        .route("/analyze", post(analyze_form))
        .route("/api/analyze", post(api_analyze))
        .route("/api/state", get(api_state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Alias kept for callers that build the router by its short name.
pub fn router(state: AppState) -> Router {
    create_router(state)
}

fn page(state: &AppState) -> Html<String> {
    let view = FormView::new(&state.form.snapshot(), state.show_errors);
    Html(render_html(&view))
}

async fn index(State(state): State<AppState>) -> Html<String> {
    page(&state)
}

async fn analyze_form(
    State(state): State<AppState>,
    Form(body): Form<AnalyzeRequest>,
) -> Html<String> {
    state.form.submit(body.text).await;
    page(&state)
}

async fn api_analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Json<FormSnapshot> {
    state.form.submit(body.text).await;
    Json(state.form.snapshot())
}

async fn api_state(State(state): State<AppState>) -> Json<FormSnapshot> {
    Json(state.form.snapshot())
}
