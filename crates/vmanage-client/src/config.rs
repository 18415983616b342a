//! Connection settings for a vManage server
//!
//! Settings are either built in code or deserialized from YAML:
//!
//! ```yaml
//! username: admin
//! password: secret
//! host: 10.0.0.1
//! # optional
//! port: 8443
//! verify_tls: false
//! timeout_ms: 30000
//! ```

use crate::error::VManageError;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Default vManage API port
pub const DEFAULT_PORT: u16 = 8443;

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Credentials and address of a vManage server
#[derive(Clone, Deserialize)]
pub struct VManageConfig {
    pub username: String,
    pub password: String,
    /// IP address or hostname
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Verify the server's TLS certificate. vManage ships with a
    /// self-signed certificate, so this is off unless asked for.
    #[serde(default)]
    pub verify_tls: bool,
    /// Per-request timeout in milliseconds. No timeout when unset.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl VManageConfig {
    /// Create a config with the default port and TLS verification disabled
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            host: host.into(),
            port: DEFAULT_PORT,
            verify_tls: false,
            timeout_ms: None,
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Parse a config from a YAML document and validate it
    pub fn from_yaml_str(yaml: &str) -> Result<Self, VManageError> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| VManageError::InvalidConfig(format!("failed to parse YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML config file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, VManageError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            VManageError::InvalidConfig(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Check that the settings can form a usable base URL and login
    pub fn validate(&self) -> Result<(), VManageError> {
        if self.host.trim().is_empty() {
            return Err(VManageError::InvalidConfig("host must not be empty".to_string()));
        }
        if self.username.is_empty() {
            return Err(VManageError::InvalidConfig("username must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(VManageError::InvalidConfig("port must not be 0".to_string()));
        }
        // reqwest fails every request on a zero timeout
        if self.timeout_ms == Some(0) {
            return Err(VManageError::InvalidConfig(
                "timeout must be at least 1 ms".to_string(),
            ));
        }
        Ok(())
    }

    /// Root of the REST API, e.g. `https://10.0.0.1:8443/dataservice`
    pub fn base_url(&self) -> String {
        format!("https://{}:{}/dataservice", self.host, self.port)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl fmt::Debug for VManageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VManageConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("verify_tls", &self.verify_tls)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}
