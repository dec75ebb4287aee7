//! Client Configuration
//!
//! Defines the settings for the Resend client, its rate limiter and its
//! 429 retry policy, plus the on-disk schema those settings load from.

use crate::error::{ResendError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.resend.com";

/// Environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "RESEND_API_KEY";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "RESEND_BASE_URL";

/// Bearer token for the Resend API
///
/// The value never appears in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key. Empty keys are rejected.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ResendError::Config("API key is empty".to_string()));
        }
        Ok(Self(value))
    }

    /// Get the key value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Sliding window limits applied before every outbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests admitted per window
    pub max_requests: usize,

    /// Length of the trailing window
    pub window: Duration,

    /// Extra delay added to computed waits to absorb timer jitter
    pub safety_margin: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_millis(1_000),
            safety_margin: Duration::from_millis(50),
        }
    }
}

impl RateLimitConfig {
    /// Reject settings the limiter cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.max_requests == 0 {
            return Err(ResendError::Config(
                "rate_limit.max_requests must be at least 1".to_string(),
            ));
        }
        if self.window.is_zero() {
            return Err(ResendError::Config(
                "rate_limit.window_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Policy for HTTP 429 responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Wait used when the server sends no usable `Retry-After`
    pub default_retry_after: Duration,

    /// Give up after this many consecutive 429s. `None` retries forever.
    pub max_rate_limit_retries: Option<u32>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            default_retry_after: Duration::from_secs(2),
            max_rate_limit_retries: None,
        }
    }
}

/// Everything needed to build a client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer token
    pub api_key: ApiKey,

    /// API endpoint, without trailing slash
    pub base_url: String,

    /// Whole-request timeout
    pub timeout: Duration,

    /// TCP/TLS connect timeout
    pub connect_timeout: Duration,

    pub rate_limit: RateLimitConfig,

    pub retry: RetryConfig,
}

impl ClientConfig {
    /// Defaults for everything but the key
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            rate_limit: RateLimitConfig::default(),
            retry: RetryConfig::default(),
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the rate limit
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Set the retry policy
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.rate_limit.validate()?;
        if self.base_url.is_empty() {
            return Err(ResendError::Config("base_url is empty".to_string()));
        }
        Ok(())
    }
}

/// Config file schema; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// Environment variable name for the API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<FileRateLimit>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<FileRetry>,
}

/// `rate_limit` section of the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileRateLimit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_requests: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_margin_ms: Option<u64>,
}

/// `retry` section of the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileRetry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_retry_after_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rate_limit_retries: Option<u32>,
}

impl FileConfig {
    /// Overlay `other` on top of `self`; fields set in `other` win
    pub fn merge(&mut self, other: FileConfig) {
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.connect_timeout_secs.is_some() {
            self.connect_timeout_secs = other.connect_timeout_secs;
        }
        if let Some(rate_limit) = other.rate_limit {
            let current = self.rate_limit.get_or_insert_with(FileRateLimit::default);
            if rate_limit.max_requests.is_some() {
                current.max_requests = rate_limit.max_requests;
            }
            if rate_limit.window_ms.is_some() {
                current.window_ms = rate_limit.window_ms;
            }
            if rate_limit.safety_margin_ms.is_some() {
                current.safety_margin_ms = rate_limit.safety_margin_ms;
            }
        }
        if let Some(retry) = other.retry {
            let current = self.retry.get_or_insert_with(FileRetry::default);
            if retry.default_retry_after_ms.is_some() {
                current.default_retry_after_ms = retry.default_retry_after_ms;
            }
            if retry.max_rate_limit_retries.is_some() {
                current.max_rate_limit_retries = retry.max_rate_limit_retries;
            }
        }
    }

    /// Name of the environment variable to read the key from
    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }

    /// Apply the file settings to a client config
    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.connect_timeout_secs {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(rate_limit) = &self.rate_limit {
            if let Some(max) = rate_limit.max_requests {
                config.rate_limit.max_requests = max;
            }
            if let Some(ms) = rate_limit.window_ms {
                config.rate_limit.window = Duration::from_millis(ms);
            }
            if let Some(ms) = rate_limit.safety_margin_ms {
                config.rate_limit.safety_margin = Duration::from_millis(ms);
            }
        }
        if let Some(retry) = &self.retry {
            if let Some(ms) = retry.default_retry_after_ms {
                config.retry.default_retry_after = Duration::from_millis(ms);
            }
            if retry.max_rate_limit_retries.is_some() {
                config.retry.max_rate_limit_retries = retry.max_rate_limit_retries;
            }
        }
        config
    }
}
