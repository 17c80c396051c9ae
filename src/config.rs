//! Configuration loading and persistence.
//!
//! Reads `config.json` from the config directory, then applies
//! `PUSH_BOOTSTRAP_*` environment overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::constants::{DEFAULT_REGISTRY_URL, DEFAULT_VAPID_PUBLIC_KEY, DEFAULT_WORKER_SCRIPT};
use crate::notifications::{key_codec, BootstrapOptions};

/// Name of the config file inside the config directory.
const CONFIG_FILE: &str = "config.json";

/// Configuration for push-bootstrap.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the subscription registry.
    pub registry_url: String,
    /// Server VAPID public key (URL-safe base64).
    pub vapid_public_key: String,
    /// Worker script registered before subscribing.
    #[serde(default = "default_worker_script")]
    pub worker_script: String,
}

fn default_worker_script() -> String {
    DEFAULT_WORKER_SCRIPT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            vapid_public_key: DEFAULT_VAPID_PUBLIC_KEY.to_string(),
            worker_script: default_worker_script(),
        }
    }
}

impl Config {
    /// Returns the configuration directory path, creating it if necessary.
    ///
    /// Directory selection priority:
    /// 1. `PUSH_BOOTSTRAP_CONFIG_DIR` env var: explicit override
    /// 2. Default: platform config dir (Linux: ~/.config/push-bootstrap)
    pub fn config_dir() -> Result<PathBuf> {
        let dir = if let Ok(dir) = std::env::var("PUSH_BOOTSTRAP_CONFIG_DIR") {
            PathBuf::from(dir)
        } else {
            dirs::config_dir()
                .context("Could not determine config directory")?
                .join("push-bootstrap")
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
        Ok(dir)
    }

    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Loads configuration from file, with environment variable overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_dir()?)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads `config.json` from `dir`, or defaults when it does not exist.
    ///
    /// A file that exists but does not parse is an error, not a silent
    /// fallback to defaults.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} as JSON", path.display()))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(registry_url) = lookup("PUSH_BOOTSTRAP_REGISTRY_URL") {
            self.registry_url = registry_url;
        }

        if let Some(key) = lookup("PUSH_BOOTSTRAP_VAPID_PUBLIC_KEY") {
            self.vapid_public_key = key;
        }

        if let Some(script) = lookup("PUSH_BOOTSTRAP_WORKER_SCRIPT") {
            self.worker_script = script;
        }
    }

    /// Persists the current configuration to the config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_dir()?)
    }

    /// Persists the current configuration to `dir`.
    pub fn save_to(&self, dir: &Path) -> Result<()> {
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        // Set restrictive permissions (owner read/write only)
        #[cfg(unix)]
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;

        Ok(())
    }

    /// Checks the registry URL, worker script and VAPID key.
    ///
    /// The key must decode to a 65-byte uncompressed P-256 point, which is
    /// what push services accept as `applicationServerKey`.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.registry_url)
            .with_context(|| format!("Invalid registry_url '{}'", self.registry_url))?;
        anyhow::ensure!(
            matches!(url.scheme(), "http" | "https"),
            "registry_url must be http(s), got '{}'",
            url.scheme()
        );

        anyhow::ensure!(
            !self.worker_script.trim().is_empty(),
            "worker_script must not be empty"
        );

        let key = key_codec::decode(&self.vapid_public_key).context("Invalid vapid_public_key")?;
        key_codec::validate_application_server_key(&key).context("Invalid vapid_public_key")?;

        Ok(())
    }

    /// Bootstrap inputs derived from this configuration.
    pub fn bootstrap_options(&self) -> BootstrapOptions {
        BootstrapOptions::new(self.vapid_public_key.clone())
            .with_worker_script(self.worker_script.clone())
    }
}
