// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client configuration
//!
//! [`ClientConfig`] can be built in code with the `with_*` methods or loaded
//! with [`ClientConfig::load`] from layered sources:
//!
//! 1. Built-in defaults
//! 2. An optional `safelyx.{json,toml,yaml}` file in the working directory
//! 3. Environment variables with the `SAFELYX_` prefix
//!    (`SAFELYX_KEY_CODE`, `SAFELYX_BASE_URL`, `SAFELYX_TIMEOUT_SECONDS`,
//!    `SAFELYX_USER_AGENT`)

use std::{fmt, path::Path, time::Duration};

use config::{Config, ConfigError, Environment, File, FileFormat, FileSourceFile};
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::{SafelyxError, SafelyxResult};

/// Root of the hosted service
pub const DEFAULT_BASE_URL: &str = "https://safelyx.com/";

/// Per-request timeout applied when none is configured
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// `User-Agent` sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("safelyx-rs/", env!("CARGO_PKG_VERSION"));

const MAX_TIMEOUT_SECONDS: u64 = 300;
const ENV_PREFIX: &str = "SAFELYX";
const CONFIG_FILE_STEM: &str = "safelyx";

/// Configuration for [`SafelyxClient`](crate::SafelyxClient)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Credential sent as `key_code` with every request
    #[serde(default)]
    pub key_code: String,
    /// Root URL the check endpoints are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Request timeout in seconds (1-300)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// `User-Agent` header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            key_code: String::new(),
            base_url: default_base_url(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: default_user_agent(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("key_code", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration with the given credential and defaults otherwise
    pub fn new(key_code: impl Into<String>) -> Self {
        Self {
            key_code: key_code.into(),
            ..Default::default()
        }
    }

    /// Set the service root URL
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the `User-Agent` header value
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Validate the configuration
    ///
    /// The credential is not checked beyond a warning when it is empty: the
    /// service is the only authority on whether a key is valid.
    pub fn validate(&self) -> SafelyxResult<()> {
        if self.timeout_seconds == 0 || self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(SafelyxError::config(format!(
                "invalid timeout: {} seconds (must be 1-{MAX_TIMEOUT_SECONDS})",
                self.timeout_seconds
            )));
        }

        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(SafelyxError::config(format!(
                "base URL must use http or https, got `{}`",
                self.base_url
            )));
        }

        if self.base_url.cannot_be_a_base() {
            return Err(SafelyxError::config(format!(
                "base URL `{}` cannot be used as a base",
                self.base_url
            )));
        }

        if HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(SafelyxError::config(
                "user agent contains characters not allowed in a header",
            ));
        }

        if self.key_code.trim().is_empty() {
            warn!("Safelyx key code is empty, checks will most likely be rejected");
        }

        Ok(())
    }

    /// Load configuration from defaults, an optional `safelyx.*` file and
    /// `SAFELYX_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns `SafelyxError::Configuration` if a source cannot be read or the
    /// result fails validation.
    pub fn load() -> SafelyxResult<Self> {
        let config = Self::load_from(
            Some(File::with_name(CONFIG_FILE_STEM).required(false)),
            environment(),
        )?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file on top of the environment
    ///
    /// The file format is inferred from its extension.
    pub fn load_file(path: impl AsRef<Path>) -> SafelyxResult<Self> {
        let path = path.as_ref();
        debug!("Loading Safelyx configuration from: {}", path.display());

        let config = Self::load_from(
            Some(File::from(path).required(true)),
            environment(),
        )?;
        config.validate()?;
        Ok(config)
    }

    fn load_from(
        file: Option<File<FileSourceFile, FileFormat>>,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }
        builder.add_source(env).build()?.try_deserialize()
    }
}

/// `SAFELYX_*` variables, kept as strings so the key code is never coerced
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
}

pub(crate) fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default Safelyx URL is valid")
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
