// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: reqres-contract, url
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqres_contract::RequestConfig;
use url::Url;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional live service base URL; the local stub is used when unset.
    BaseUrl,
    /// Optional API key sent as `x-api-key`.
    ApiKey,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Optional run root override.
    RunRoot,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "REQRES_SYSTEM_TEST_BASE_URL",
            Self::ApiKey => "REQRES_SYSTEM_TEST_API_KEY",
            Self::TimeoutSeconds => "REQRES_SYSTEM_TEST_TIMEOUT_SEC",
            Self::RunRoot => "REQRES_SYSTEM_TEST_RUN_ROOT",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional live service base URL.
    pub base_url: Option<Url>,
    /// Optional API key.
    pub api_key: Option<String>,
    /// Optional timeout override in seconds (positive integer).
    pub timeout: Option<Duration>,
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
}

impl fmt::Debug for SystemTestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemTestConfig")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("run_root", &self.run_root)
            .finish()
    }
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid URL or timeout).
    pub fn load() -> Result<Self, String> {
        let base_url = read_env_nonempty(SystemTestEnv::BaseUrl.as_str())?
            .map(|value| parse_base_url(SystemTestEnv::BaseUrl.as_str(), &value))
            .transpose()?;
        let api_key = read_env_nonempty(SystemTestEnv::ApiKey.as_str())?;
        let timeout = read_env_nonempty(SystemTestEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let run_root = read_env_nonempty(SystemTestEnv::RunRoot.as_str())?.map(PathBuf::from);
        Ok(Self {
            base_url,
            api_key,
            timeout,
            run_root,
        })
    }

    /// Returns true when scenarios target a live service instead of the stub.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.base_url.is_some()
    }

    /// Builds a request config for `base_url`, applying the timeout and API
    /// key overrides.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` is rejected by the request config.
    pub fn request_config(&self, base_url: &str) -> Result<RequestConfig, String> {
        let mut config = RequestConfig::new(base_url).map_err(|err| err.to_string())?;
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        if let Some(api_key) = &self.api_key {
            config = config.with_api_key(api_key.clone());
        }
        Ok(config)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses an http(s) base URL.
///
/// # Errors
///
/// Returns an error when the value is not an absolute http or https URL.
fn parse_base_url(name: &str, raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|err| format!("{name} must be a valid url: {err}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("{name} must use http or https"));
    }
    Ok(url)
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} must be a positive integer number of seconds"));
    }
    let secs: u64 = trimmed
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}
