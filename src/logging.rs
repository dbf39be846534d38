//! Subscriber setup shared by both binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_DEV_LOG: &str = "TRUTHGUARD_DEV_LOG";

/// Install a compact stderr subscriber; `RUST_LOG` wins over `default_directives`.
///
/// Returns false when another subscriber (e.g. the Shuttle runtime's) is already set.
pub fn init(default_directives: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .is_ok()
}

/// Dev logging needs `TRUTHGUARD_DEV_LOG=1` and a dev environment
/// (debug build, or `SHUTTLE_ENV` in {local, development, dev}).
pub fn dev_log_requested() -> bool {
    let flag = std::env::var(ENV_DEV_LOG).is_ok_and(|v| v == "1");
    let dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );
    flag && dev_env
}
