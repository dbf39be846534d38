//! TruthGuard binary entrypoint.
//! Boots the Axum HTTP server that serves the analysis form.

use shuttle_axum::ShuttleAxum;

use truthguard::{logging, AppConfig};

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    if logging::dev_log_requested() && !logging::init("truthguard=info,tower_http=debug,warn") {
        tracing::debug!("subscriber already installed; dev log filter not applied");
    }

    let cfg = AppConfig::load_default()?;
    let router = truthguard::app(&cfg)?;

    Ok(router.into())
}
