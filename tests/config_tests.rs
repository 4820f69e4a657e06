//! Config layering: file, environment, `.env`.

use blocwallet::config::{load_dotenv, WalletConfig, ENV_CONTAINER, ENV_DAEMON, ENV_VIEW_ONLY, ENV_WALLETD};
use blocwallet::WalletError;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner())
}

fn clear_env() {
    for key in [ENV_DAEMON, ENV_WALLETD, ENV_CONTAINER, ENV_VIEW_ONLY, "BLOCWALLET_RPC_PASSWORD"] {
        std::env::remove_var(key);
    }
}

#[test]
fn file_values_override_defaults() {
    let _guard = lock_env();
    clear_env();
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"daemon_url": "http://10.0.0.5:2086", "container": "/wallets/main.wallet", "password_attempts": 5}"#,
    )
    .expect("write config");

    let config = WalletConfig::load(Some(path.as_path())).expect("load");

    assert_eq!(config.daemon_url, "http://10.0.0.5:2086");
    assert_eq!(config.walletd_url, "http://127.0.0.1:8070");
    assert_eq!(config.container, Some(PathBuf::from("/wallets/main.wallet")));
    assert_eq!(config.password_attempts, 5);
    config.validate().expect("valid");
}

#[test]
fn environment_overrides_file() {
    let _guard = lock_env();
    clear_env();
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"daemon_url": "http://file:2086", "view_only": false}"#).expect("write config");

    std::env::set_var(ENV_DAEMON, "http://env:2086");
    std::env::set_var(ENV_VIEW_ONLY, "true");
    std::env::set_var(ENV_WALLETD, "  ");
    let config = WalletConfig::load(Some(path.as_path())).expect("load");
    clear_env();

    assert_eq!(config.daemon_url, "http://env:2086");
    assert!(config.view_only);
    // Blank values are ignored.
    assert_eq!(config.walletd_url, "http://127.0.0.1:8070");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let _guard = lock_env();
    let dir = TempDir::new().expect("tempdir");
    let err = WalletConfig::load(Some(dir.path().join("absent.json").as_path())).unwrap_err();
    assert!(matches!(err, WalletError::Config(_)));
}

#[test]
fn malformed_file_is_an_error() {
    let _guard = lock_env();
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{not json").expect("write config");
    assert!(matches!(WalletConfig::from_file(&path), Err(WalletError::Config(_))));
}

#[test]
fn dotenv_fills_unset_variables_only() {
    let _guard = lock_env();
    clear_env();
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join(".env");
    std::fs::write(
        &path,
        format!(
            "# wallet\n{}=\"/wallets/from-dotenv.wallet\"\n{}=http://dotenv:2086\nEMPTY_VALUE=\n",
            ENV_CONTAINER, ENV_DAEMON
        ),
    )
    .expect("write .env");

    std::env::set_var(ENV_DAEMON, "http://already-set:2086");
    let loaded = load_dotenv(&path);
    let config = WalletConfig::default().apply_env();
    clear_env();

    assert_eq!(loaded, 1);
    assert_eq!(config.container, Some(PathBuf::from("/wallets/from-dotenv.wallet")));
    assert_eq!(config.daemon_url, "http://already-set:2086");
}

#[test]
fn missing_dotenv_loads_nothing() {
    let dir = TempDir::new().expect("tempdir");
    assert_eq!(load_dotenv(&dir.path().join(".env")), 0);
}
