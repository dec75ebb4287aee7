//! HTTP Client
//!
//! Authenticated request dispatch with sliding window throttling and
//! server-directed retry on HTTP 429.

use crate::client::rate_limiter::RateLimiter;
use crate::client::request::OutboundRequest;
use crate::config::{ApiKey, ClientConfig, RetryConfig};
use crate::error::{ResendError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest response body excerpt kept in parse errors
const BODY_EXCERPT_CHARS: usize = 500;

/// HTTP client shared by every resource call
pub struct HttpClient {
    /// Inner reqwest client
    client: Client,

    /// API endpoint without trailing slash
    base_url: String,

    api_key: ApiKey,

    /// Sliding window shared by all callers of this client
    rate_limiter: Arc<RateLimiter>,

    retry: RetryConfig,
}

impl HttpClient {
    /// Create a new HTTP client with its own rate limiter
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit)?);
        Self::with_rate_limiter(config, rate_limiter)
    }

    /// Create a client that draws admissions from an existing limiter
    pub fn with_rate_limiter(config: &ClientConfig, rate_limiter: Arc<RateLimiter>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| ResendError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            rate_limiter,
            retry: config.retry,
        })
    }

    /// Get the rate limiter
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.rate_limiter
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and decode the JSON response
    ///
    /// A 429 sleeps for the server's `Retry-After` (or the configured
    /// default) and sends the same request again. Without a configured
    /// ceiling this repeats until the server accepts the call.
    pub async fn send<T: DeserializeOwned>(&self, request: &OutboundRequest) -> Result<T> {
        let mut rate_limited: u32 = 0;

        loop {
            self.rate_limiter.throttle().await;

            debug!(method = %request.method(), path = request.path(), "sending request");
            let response = self.build(request)?.send().await?;

            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                return Self::classify(response).await;
            }

            rate_limited += 1;
            if let Some(max) = self.retry.max_rate_limit_retries {
                if rate_limited > max {
                    return Err(ResendError::RateLimited {
                        attempts: rate_limited,
                    });
                }
            }

            let wait = retry_after(response.headers()).unwrap_or(self.retry.default_retry_after);
            warn!(
                method = %request.method(),
                path = request.path(),
                attempt = rate_limited,
                wait_ms = wait.as_millis() as u64,
                "rate limited by Resend, retrying"
            );
            tokio::time::sleep(wait).await;
        }
    }

    /// GET a path
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(&OutboundRequest::get(path)).await
    }

    /// DELETE a path
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(&OutboundRequest::delete(path)).await
    }

    /// POST a JSON body
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(&OutboundRequest::post(path, body)?).await
    }

    /// PATCH a JSON body
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(&OutboundRequest::patch(path, body)?).await
    }

    /// Build the reqwest request for one attempt
    fn build(&self, request: &OutboundRequest) -> Result<RequestBuilder> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.api_key.expose()))
            .map_err(|e| ResendError::Config(format!("Invalid API key format: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let url = format!("{}{}", self.base_url, request.path());
        let mut builder = self
            .client
            .request(request.method().clone(), url)
            .headers(headers);

        if let Some(payload) = request.payload() {
            builder = builder.body(serde_json::to_vec(payload)?);
        }

        Ok(builder)
    }

    /// Turn a non-429 response into a result
    async fn classify<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            // a failed body read must not mask the status
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "request failed");
            return Err(ResendError::Api {
                status: status.as_u16(),
                status_text,
                body,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return serde_json::from_value(serde_json::Value::Object(serde_json::Map::new()))
                .map_err(|e| {
                    ResendError::Response(format!("Empty response not accepted by caller: {}", e))
                });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            ResendError::Response(format!(
                "Failed to parse response: {}. Body: {}",
                e,
                body.chars().take(BODY_EXCERPT_CHARS).collect::<String>()
            ))
        })
    }
}

/// Wait requested by a `Retry-After` header
///
/// Accepts delay-seconds (fractions allowed) or an HTTP date. Returns `None`
/// when the header is missing or unusable.
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();

    if let Ok(secs) = value.parse::<f64>() {
        return Duration::try_from_secs_f64(secs).ok();
    }

    let at = chrono::DateTime::parse_from_rfc2822(value).ok()?;
    let delta = at.with_timezone(&chrono::Utc) - chrono::Utc::now();
    Some(delta.to_std().unwrap_or(Duration::ZERO))
}
