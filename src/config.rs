//! Layered settings.
//!
//! Values are resolved in order, later sources winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`--config`)
//! 3. environment variables with the `PROMDASH_` prefix
//! 4. command-line flags (applied by the binary)
//!
//! ```toml
//! endpoint = "http://localhost:3000/api/prometheus"
//! refresh_secs = 30
//! timeout_secs = 10
//! log_level = "info"
//! log_file = "promdash.log"
//! theme = "dark"
//! no_proxy = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::client::DEFAULT_ENDPOINT;
use crate::ui::ThemeChoice;

/// Prefix for environment overrides, e.g. `PROMDASH_ENDPOINT`.
pub const ENV_PREFIX: &str = "PROMDASH";

/// Default refresh interval in seconds.
pub const DEFAULT_REFRESH_SECS: u64 = 30;

/// Resolved dashboard settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Query endpoint URL.
    pub endpoint: String,
    /// Seconds between refresh ticks.
    pub refresh_secs: u64,
    /// Per-request timeout in seconds. Unset means the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,
    /// File the log is written to (stdout belongs to the TUI).
    pub log_file: PathBuf,
    /// Color theme.
    #[serde(default)]
    pub theme: ThemeChoice,
    /// Bypass proxies configured in the environment.
    #[serde(default)]
    pub no_proxy: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            refresh_secs: DEFAULT_REFRESH_SECS,
            timeout_secs: None,
            log_level: "info".to_string(),
            log_file: PathBuf::from("promdash.log"),
            theme: ThemeChoice::Auto,
            no_proxy: false,
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("endpoint", defaults.endpoint)?
            .set_default("refresh_secs", defaults.refresh_secs)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_file", defaults.log_file.to_string_lossy().into_owned())?
            .set_default("theme", "auto")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder.add_source(env.try_parsing(true)).build()?;
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    /// Reject values that would leave the dashboard polling nothing.
    pub fn validate(&self) -> Result<()> {
        if self.refresh_secs == 0 {
            anyhow::bail!("refresh_secs must be at least 1");
        }
        if self.timeout_secs == Some(0) {
            anyhow::bail!("timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// Interval between refresh ticks.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    /// Per-request timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
