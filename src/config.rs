//! Configuration
//!
//! Layered, lowest priority first:
//!
//! 1. built-in defaults
//! 2. JSON file (`--config`, `./.blocwallet.json`, or `<config dir>/blocwallet/config.json`)
//! 3. environment (`BLOCWALLET_*`, optionally seeded from `.env`)
//! 4. command-line flags (applied by the binary)

use crate::error::{WalletError, WalletResult};
use crate::sync::SyncOptions;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = ".blocwallet.json";

pub const ENV_DAEMON: &str = "BLOCWALLET_DAEMON";
pub const ENV_WALLETD: &str = "BLOCWALLET_WALLETD";
pub const ENV_RPC_PASSWORD: &str = "BLOCWALLET_RPC_PASSWORD";
pub const ENV_CONTAINER: &str = "BLOCWALLET_CONTAINER";
pub const ENV_VIEW_ONLY: &str = "BLOCWALLET_VIEW_ONLY";

pub const DEFAULT_DAEMON_URL: &str = "http://127.0.0.1:2086";
pub const DEFAULT_WALLETD_URL: &str = "http://127.0.0.1:8070";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub daemon_url: String,
    pub walletd_url: String,
    pub rpc_password: Option<String>,
    pub container: Option<PathBuf>,
    /// Force view-only mode even if the container holds a spend key.
    pub view_only: bool,
    pub password_attempts: u32,
    pub request_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            daemon_url: DEFAULT_DAEMON_URL.into(),
            walletd_url: DEFAULT_WALLETD_URL.into(),
            rpc_password: None,
            container: None,
            view_only: false,
            password_attempts: 3,
            request_timeout_secs: 10,
            poll_interval_ms: 1000,
        }
    }
}

impl fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletConfig")
            .field("daemon_url", &self.daemon_url)
            .field("walletd_url", &self.walletd_url)
            .field("rpc_password", &self.rpc_password.as_ref().map(|_| "<redacted>"))
            .field("container", &self.container)
            .field("view_only", &self.view_only)
            .field("password_attempts", &self.password_attempts)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .finish()
    }
}

impl WalletConfig {
    pub fn new() -> Self { Self::default() }
    pub fn with_daemon(mut self, url: impl Into<String>) -> Self { self.daemon_url = url.into(); self }
    pub fn with_walletd(mut self, url: impl Into<String>) -> Self { self.walletd_url = url.into(); self }
    pub fn with_rpc_password(mut self, pw: impl Into<String>) -> Self { self.rpc_password = Some(pw.into()); self }
    pub fn with_container(mut self, path: impl Into<PathBuf>) -> Self { self.container = Some(path.into()); self }
    pub fn with_view_only(mut self, view_only: bool) -> Self { self.view_only = view_only; self }

    pub fn from_file(path: &Path) -> WalletResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| WalletError::Config(format!("read {}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| WalletError::Config(format!("parse {}: {}", path.display(), e)))
    }

    /// First config file that exists. An explicit path must exist.
    pub fn locate(explicit: Option<&Path>) -> WalletResult<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(WalletError::Config(format!("config file {} not found", path.display())));
            }
            return Ok(Some(path.to_path_buf()));
        }
        let local = PathBuf::from(CONFIG_FILE);
        if local.is_file() {
            return Ok(Some(local));
        }
        Ok(dirs::config_dir()
            .map(|dir| dir.join("blocwallet").join("config.json"))
            .filter(|p| p.is_file()))
    }

    /// Defaults, then the config file if any, then the environment.
    pub fn load(explicit: Option<&Path>) -> WalletResult<Self> {
        let base = match Self::locate(explicit)? {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        Ok(base.apply_env())
    }

    /// Override fields from `BLOCWALLET_*` variables. Empty values are ignored.
    pub fn apply_env(mut self) -> Self {
        let var = |key: &str| env::var(key).ok().filter(|s| !s.trim().is_empty());
        if let Some(url) = var(ENV_DAEMON) {
            self.daemon_url = url;
        }
        if let Some(url) = var(ENV_WALLETD) {
            self.walletd_url = url;
        }
        if let Some(pw) = var(ENV_RPC_PASSWORD) {
            self.rpc_password = Some(pw);
        }
        if let Some(path) = var(ENV_CONTAINER) {
            self.container = Some(PathBuf::from(path));
        }
        if let Some(flag) = var(ENV_VIEW_ONLY) {
            self.view_only = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        self
    }

    pub fn validate(&self) -> WalletResult<()> {
        for (name, url) in [("daemon", &self.daemon_url), ("walletd", &self.walletd_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(WalletError::Config(format!("{} URL must start with http:// or https://: {}", name, url)));
            }
        }
        if self.container.is_none() {
            return Err(WalletError::Config("no wallet container given (--container or BLOCWALLET_CONTAINER)".into()));
        }
        if self.password_attempts == 0 {
            return Err(WalletError::Config("password_attempts must be at least 1".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn sync_options(&self) -> SyncOptions {
        let poll = Duration::from_millis(self.poll_interval_ms);
        SyncOptions::default()
            .with_poll_interval(poll)
            .with_stall_interval(poll * 3)
    }
}

/// Load `KEY=value` lines from a `.env` file into the environment without
/// overriding variables that are already set.
pub fn load_dotenv(path: &Path) -> usize {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return 0;
    };
    let mut loaded = 0;
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches('"');
            if !value.is_empty() && env::var(key.trim()).is_err() {
                env::set_var(key.trim(), value);
                loaded += 1;
            }
        }
    }
    loaded
}
