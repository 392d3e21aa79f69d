//! Console configuration.
//!
//! Configuration is read from a YAML file, then environment overrides and
//! finally an explicit backend URL are applied. Validation runs once, after
//! every layer, so a later layer can replace a bad earlier value. Every key is
//! optional:
//!
//! ```yaml
//! backend_url: "http://10.0.0.5:8080"
//! base_path: "/api/ecbe/v1"
//! sender_name: "ops-desk"
//! connect_timeout_secs: 5
//! request_timeout_secs: 30
//! catalog: "/etc/ecbe/catalog.yaml"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transport::API_BASE_PATH;
use crate::{EcbeError, Result};

/// Environment variable overriding [`ConsoleConfig::backend_url`].
pub const ENV_BACKEND_URL: &str = "ECBE_BACKEND_URL";
/// Environment variable overriding [`ConsoleConfig::sender_name`].
pub const ENV_SENDER_NAME: &str = "ECBE_SENDER_NAME";

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings for reaching the CBC and composing messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Scheme, host and port of the CBC
    pub backend_url: String,
    /// Path prefix of the REST API on the CBC
    pub base_path: String,
    /// Sender name used when the form leaves it blank
    pub sender_name: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// YAML file replacing the built-in message catalog
    pub catalog: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            base_path: API_BASE_PATH.to_string(),
            sender_name: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            catalog: None,
        }
    }
}

impl ConsoleConfig {
    /// Create a configuration pointing at `backend_url` with all other defaults.
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self { backend_url: backend_url.into(), ..Default::default() }
    }

    /// Parse configuration from YAML text.
    ///
    /// Values are not validated here; see [`ConsoleConfig::with_overrides`].
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| EcbeError::config_error(path.to_path_buf(), e))?;
        let config = Self::from_yaml(&yaml)?;
        debug!(path = %path.display(), backend = %config.backend_url, "Loaded configuration");
        Ok(config)
    }

    /// Apply overrides, then validate the result.
    ///
    /// Precedence is file < environment (looked up through `lookup`) < `backend`.
    /// Takes the lookup as a function so callers can pass `std::env::var` or a fixture.
    pub fn with_overrides<F>(mut self, lookup: F, backend: Option<&str>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.trim().is_empty()) {
            self.backend_url = url;
        }
        if let Some(name) = lookup(ENV_SENDER_NAME).filter(|v| !v.trim().is_empty()) {
            self.sender_name = Some(name);
        }
        if let Some(url) = backend {
            self.backend_url = url.to_string();
        }
        self.validate()?;
        Ok(self)
    }

    /// Apply overrides from the process environment and an optional backend URL.
    pub fn with_env_overrides(self, backend: Option<&str>) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok(), backend)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Absolute URL of an API endpoint, e.g. `endpoint("/message")`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.backend_url.trim_end_matches('/'),
            self.base_path.trim_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.backend_url).map_err(|e| EcbeError::Parse {
            context: "backend_url".to_string(),
            details: format!("'{}': {e}", self.backend_url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(EcbeError::Parse {
                context: "backend_url".to_string(),
                details: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if !self.base_path.starts_with('/') {
            return Err(EcbeError::Parse {
                context: "base_path".to_string(),
                details: format!("'{}' must start with '/'", self.base_path),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(EcbeError::Parse {
                context: "request_timeout_secs".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
