// tests/client_http.rs
//
// HttpAnalysisClient against a real loopback stub of `/analyze_text`.
// Each test binds its own ephemeral port.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use truthguard::view::{render_text, FormView};
use truthguard::{
    AnalysisClient, AnalysisError, AnalysisForm, AnalyzeRequest, HttpAnalysisClient, Phase,
};

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    addr
}

fn endpoint(addr: SocketAddr) -> String {
    format!("http://{addr}/analyze_text")
}

/// Stub that echoes the text and records every body it receives.
async fn echo_stub() -> (SocketAddr, Arc<Mutex<Vec<Value>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    let app = Router::new().route(
        "/analyze_text",
        post(move |Json(body): Json<Value>| {
            let log = log.clone();
            async move {
                let text = body["text"].as_str().unwrap_or_default().to_string();
                log.lock().unwrap().push(body);
                Json(json!({
                    "text": text,
                    "fake_news_score": 0.005,
                    "source_reliability": 0.42,
                    "classification": "FAKE"
                }))
            }
        }),
    );
    (serve(app).await, seen)
}

#[tokio::test]
async fn posts_json_text_and_decodes_result() {
    let (addr, seen) = echo_stub().await;
    let client = HttpAnalysisClient::new(endpoint(addr)).unwrap();

    let out = client.analyze("Breaking: water is wet").await.unwrap();
    assert_eq!(out.text, "Breaking: water is wet");
    assert_eq!(out.classification, "FAKE");

    let bodies = seen.lock().unwrap().clone();
    assert_eq!(bodies, vec![json!({ "text": "Breaking: water is wet" })]);
}

#[tokio::test]
async fn empty_text_is_sent_as_is() {
    let (addr, seen) = echo_stub().await;
    let client = HttpAnalysisClient::new(endpoint(addr)).unwrap();

    client.analyze("").await.unwrap();

    let bodies = seen.lock().unwrap().clone();
    let sent: AnalyzeRequest = serde_json::from_value(bodies[0].clone()).unwrap();
    assert_eq!(sent.text, "");
}

#[tokio::test]
async fn non_2xx_is_a_status_error() {
    let app = Router::new().route(
        "/analyze_text",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
    );
    let addr = serve(app).await;
    let client = HttpAnalysisClient::new(endpoint(addr)).unwrap();

    let err = client.analyze("x").await.unwrap_err();
    assert!(
        matches!(err, AnalysisError::Status { status } if status.as_u16() == 500),
        "got {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let app = Router::new().route(
        "/analyze_text",
        post(|| async { Json(json!({ "text": "x", "score": 1 })) }),
    );
    let addr = serve(app).await;
    let client = HttpAnalysisClient::new(endpoint(addr)).unwrap();

    let err = client.analyze("x").await.unwrap_err();
    assert!(matches!(err, AnalysisError::Decode(_)), "got {err:?}");
    assert_eq!(err.kind(), "decode");
}

#[tokio::test]
async fn slow_endpoint_hits_the_deadline() {
    let app = Router::new().route(
        "/analyze_text",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }),
    );
    let addr = serve(app).await;
    let client = HttpAnalysisClient::with_timeouts(
        endpoint(addr),
        Some(Duration::from_millis(200)),
        Duration::from_secs(1),
    )
    .unwrap();

    let err = client.analyze("x").await.unwrap_err();
    assert!(matches!(err, AnalysisError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn connection_refused_leaves_no_panel_and_clears_busy() {
    // Grab a free port, then close it so nothing is listening there.
    let addr = {
        let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap()
    };
    let client = HttpAnalysisClient::new(endpoint(addr)).unwrap();
    let form = AnalysisForm::new(Arc::new(client));

    form.submit("anything").await;

    let snap = form.snapshot();
    assert!(!snap.is_loading);
    assert!(snap.result.is_none());
    assert_eq!(snap.phase, Phase::Failed);
    let view = FormView::from(&snap);
    assert!(view.panel.is_none());
    assert!(view.button_enabled);
}

#[tokio::test]
async fn end_to_end_render_rounds_half_up() {
    let (addr, _) = echo_stub().await;
    let client = HttpAnalysisClient::new(endpoint(addr)).unwrap();
    let form = AnalysisForm::new(Arc::new(client));

    form.submit("A").await;

    let text = render_text(&FormView::from(&form.snapshot()));
    assert!(text.contains("Fake news probability: 0.01"), "{text}");
    assert!(text.contains("Source reliability: 0.42"), "{text}");
    assert!(text.contains("Text: A"), "{text}");
}
