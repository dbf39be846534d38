// tests/config_load.rs
use std::time::Duration;
use std::{env, fs};

use truthguard::config::{ENV_CONFIG_PATH, ENV_ENDPOINT, ENV_TIMEOUT_SECS};
use truthguard::{AppConfig, StalePolicy, DEFAULT_ENDPOINT};

fn clear_env() {
    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var(ENV_ENDPOINT);
    env::remove_var(ENV_TIMEOUT_SECS);
}

#[test]
fn load_from_file_reads_all_fields() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("truthguard.toml");
    fs::write(
        &p,
        r#"
endpoint = "http://10.0.0.5:9000/analyze_text"
timeout_secs = 12
connect_timeout_secs = 2
discard_stale_responses = false
show_errors = true
"#,
    )
    .unwrap();

    let cfg = AppConfig::load_from_file(&p).unwrap();
    assert_eq!(cfg.endpoint, "http://10.0.0.5:9000/analyze_text");
    assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(12)));
    assert_eq!(cfg.connect_timeout(), Duration::from_secs(2));
    assert_eq!(cfg.stale_policy(), StalePolicy::LastArrival);
    assert!(cfg.show_errors);

    let form = truthguard::build_form(&cfg).unwrap();
    assert_eq!(form.policy(), StalePolicy::LastArrival);
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks() {
    // Isolate CWD so the repo's own config/ is not picked up.
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    clear_env();

    // 1) Nothing on disk -> built-in defaults
    let cfg = AppConfig::load_default().unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);

    // 2) Fallback TOML in ./config/
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(cfg_dir.join("truthguard.toml"), "timeout_secs = 7").unwrap();
    assert_eq!(AppConfig::load_default().unwrap().timeout_secs, 7);

    // 3) Env path wins over the fallback
    let p_env = tmp.path().join("other.toml");
    fs::write(&p_env, "timeout_secs = 9").unwrap();
    env::set_var(ENV_CONFIG_PATH, p_env.display().to_string());
    assert_eq!(AppConfig::load_default().unwrap().timeout_secs, 9);

    // 4) Env path pointing nowhere is an error
    env::set_var(ENV_CONFIG_PATH, tmp.path().join("missing.toml"));
    assert!(AppConfig::load_default().is_err());

    clear_env();
    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn env_overrides_endpoint_and_timeout() {
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    clear_env();

    env::set_var(ENV_ENDPOINT, "https://classifier.example.test/analyze_text");
    env::set_var(ENV_TIMEOUT_SECS, "0");
    let cfg = AppConfig::load_default().unwrap();
    assert_eq!(cfg.endpoint, "https://classifier.example.test/analyze_text");
    assert_eq!(cfg.request_timeout(), None);

    env::set_var(ENV_TIMEOUT_SECS, "soon");
    assert!(AppConfig::load_default().is_err());

    env::set_var(ENV_TIMEOUT_SECS, "5");
    env::set_var(ENV_ENDPOINT, "not a url");
    assert!(AppConfig::load_default().is_err());

    clear_env();
    env::set_current_dir(&old).unwrap();
}
