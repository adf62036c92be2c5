//! Layered client settings.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. A TOML file (optional; `focuswatch.toml` unless `--config` is given)
//! 3. Environment variables prefixed with `FOCUSWATCH`, nested keys separated by `__`
//!
//! ```toml
//! [server]
//! base_url = "http://127.0.0.1:8000"
//!
//! [poll]
//! interval_ms = 1000
//! degraded_interval_ms = 3000
//! max_errors = 3
//!
//! [ui]
//! locale = "ko"
//! ```
//!
//! ```bash
//! FOCUSWATCH_SERVER__BASE_URL=http://10.0.0.5:8000 focuswatch watch
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::Locale;
use crate::ui::ThemeChoice;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FOCUSWATCH";

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "focuswatch.toml";

/// All client settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub poll: PollSettings,
    pub ui: UiSettings,
    pub session: SessionSettings,
    pub log: LogSettings,
}

/// Where the monitoring service lives.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_ms: 5000,
        }
    }
}

impl ServerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Poll cadence and escalation parameters.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PollSettings {
    /// Normal cadence of the child dashboard.
    pub interval_ms: u64,
    /// Cadence while degraded or in the background.
    pub degraded_interval_ms: u64,
    /// Consecutive failures before the error state is shown.
    pub max_errors: u32,
    /// Fixed cadence of the parent single-child view.
    pub parent_interval_ms: u64,
    /// How long a changed field stays highlighted.
    pub pulse_ms: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            degraded_interval_ms: 3000,
            max_errors: 3,
            parent_interval_ms: 3000,
            pulse_ms: 500,
        }
    }
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn degraded_interval(&self) -> Duration {
        Duration::from_millis(self.degraded_interval_ms)
    }

    pub fn parent_interval(&self) -> Duration {
        Duration::from_millis(self.parent_interval_ms)
    }

    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiSettings {
    pub locale: Locale,
    pub theme: ThemeChoice,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionSettings {
    /// Where the session cookie is kept between runs.
    /// Defaults to `<config dir>/focuswatch/session`.
    pub file: Option<PathBuf>,
}

impl SessionSettings {
    /// Resolve the session file path.
    pub fn path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("focuswatch")
                .join("session")
        })
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogSettings {
    /// Log file used while the TUI owns the terminal. No logging when unset.
    pub file: Option<PathBuf>,
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file and the process environment.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load settings, reading environment overrides from `env` instead of
    /// the process environment when given.
    pub fn load_with_env(path: &Path, env: Option<HashMap<String, String>>) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        Ok(settings.normalized())
    }

    fn normalized(mut self) -> Self {
        while self.server.base_url.ends_with('/') {
            self.server.base_url.pop();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let settings =
            Settings::load_with_env(Path::new("/nonexistent/focuswatch.toml"), Some(HashMap::new()))
                .unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.poll.interval(), Duration::from_millis(1000));
        assert_eq!(settings.poll.degraded_interval(), Duration::from_millis(3000));
        assert_eq!(settings.poll.max_errors, 3);
        assert_eq!(settings.poll.parent_interval(), Duration::from_millis(3000));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            r#"
            [server]
            base_url = "http://monitor.local:9000/"

            [poll]
            max_errors = 5

            [ui]
            locale = "ko"
            "#,
        );

        let settings = Settings::load_with_env(file.path(), Some(HashMap::new())).unwrap();
        assert_eq!(settings.server.base_url, "http://monitor.local:9000");
        assert_eq!(settings.poll.max_errors, 5);
        assert_eq!(settings.poll.interval_ms, 1000);
        assert_eq!(settings.ui.locale, Locale::Ko);
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = toml_file("[poll]\ninterval_ms = 2000\n");
        let env = HashMap::from([
            ("FOCUSWATCH_POLL__INTERVAL_MS".to_string(), "750".to_string()),
            (
                "FOCUSWATCH_SERVER__BASE_URL".to_string(),
                "http://10.0.0.5:8000".to_string(),
            ),
        ]);

        let settings = Settings::load_with_env(file.path(), Some(env)).unwrap();
        assert_eq!(settings.poll.interval_ms, 750);
        assert_eq!(settings.server.base_url, "http://10.0.0.5:8000");
    }

    #[test]
    fn test_session_path_override() {
        let session = SessionSettings {
            file: Some(PathBuf::from("/tmp/fw-session")),
        };
        assert_eq!(session.path(), PathBuf::from("/tmp/fw-session"));
        assert!(SessionSettings::default().path().ends_with("focuswatch/session"));
    }
}
