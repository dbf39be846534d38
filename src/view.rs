//! Render model for the form: a pure function of a `FormSnapshot`.
//!
//! The same `FormView` backs the HTML page served by the router and the text output
//! of the terminal binary.

use serde::Serialize;

use crate::form::FormSnapshot;
use crate::format;

pub const TITLE: &str = "TruthGuard - Fake News Detector";
pub const PLACEHOLDER: &str = "Enter text to analyze...";
pub const IDLE_LABEL: &str = "Check for fake news";
pub const BUSY_LABEL: &str = "Analyzing...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultPanel {
    pub text: String,
    pub fake_news_score: String,
    pub source_reliability: String,
    pub classification: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub input_text: String,
    pub button_label: &'static str,
    pub button_enabled: bool,
    pub panel: Option<ResultPanel>,
    pub error: Option<String>,
}

impl FormView {
    /// Build the view. Failures stay silent unless `show_errors` is set; the
    /// snapshot still carries `last_error` and `Phase::Failed` either way.
    pub fn new(s: &FormSnapshot, show_errors: bool) -> Self {
        let panel = s.result.as_ref().map(|r| ResultPanel {
            text: r.text.clone(),
            fake_news_score: format::score(r.fake_news_score),
            source_reliability: format::score(r.source_reliability),
            classification: r.classification.clone(),
        });
        // A failure line only makes sense once nothing is pending.
        let error = if show_errors && !s.is_loading {
            s.last_error.clone()
        } else {
            None
        };
        FormView {
            input_text: s.input_text.clone(),
            button_label: if s.is_loading { BUSY_LABEL } else { IDLE_LABEL },
            button_enabled: !s.is_loading,
            panel,
            error,
        }
    }
}

impl From<&FormSnapshot> for FormView {
    fn from(s: &FormSnapshot) -> Self {
        FormView::new(s, false)
    }
}

/// Plain-text rendering for terminals.
pub fn render_text(v: &FormView) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');
    if !v.button_enabled {
        out.push_str(&format!("[{}]\n", v.button_label));
    }
    if let Some(p) = &v.panel {
        out.push_str("Analysis result:\n");
        out.push_str(&format!("  Text: {}\n", p.text));
        out.push_str(&format!("  Fake news probability: {}\n", p.fake_news_score));
        out.push_str(&format!("  Source reliability: {}\n", p.source_reliability));
        out.push_str(&format!("  Classification: {}\n", p.classification));
    }
    if let Some(e) = &v.error {
        out.push_str(&format!("Error: {e}\n"));
    }
    out
}

/// Full HTML page. Every user or server supplied string is escaped.
pub fn render_html(v: &FormView) -> String {
    use html_escape::encode_text as esc;

    let refresh = if v.button_enabled {
        ""
    } else {
        // Point at `/`: a busy page can come back from `POST /analyze`, which has no GET.
        r#"<meta http-equiv="refresh" content="1; url=/">"#
    };
    let disabled = if v.button_enabled { "" } else { " disabled" };

    let mut body = format!(
        r#"<h1>{title}</h1>
<form method="post" action="/analyze">
<textarea name="text" rows="4" placeholder="{placeholder}">{input}</textarea>
<button type="submit"{disabled}>{label}</button>
</form>
"#,
        title = TITLE,
        placeholder = PLACEHOLDER,
        input = esc(&v.input_text),
        disabled = disabled,
        label = v.button_label,
    );

    if let Some(p) = &v.panel {
        body.push_str(&format!(
            r#"<div class="result">
<h2>Analysis result:</h2>
<p><strong>Text:</strong> {}</p>
<p><strong>Fake news probability:</strong> {}</p>
<p><strong>Source reliability:</strong> {}</p>
<p><strong>Classification:</strong> {}</p>
</div>
"#,
            esc(&p.text),
            p.fake_news_score,
            p.source_reliability,
            esc(&p.classification),
        ));
    }
    if let Some(e) = &v.error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", esc(e)));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n{refresh}\n<title>{TITLE}</title>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}
