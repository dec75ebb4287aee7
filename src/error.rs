//! Resend MCP Error Types
//!
//! Error handling for the Resend client and the tool layer built on it.

use thiserror::Error;

/// Main error type for Resend operations
#[derive(Debug, Error)]
pub enum ResendError {
    /// Configuration errors (missing API key, invalid config file, bad limits)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limit retries exhausted (only when a retry ceiling is configured)
    #[error("Rate limited by Resend after {attempts} attempts. Try again later.")]
    RateLimited { attempts: u32 },

    /// The API answered with a non-2xx status other than 429
    #[error("Resend API error ({status} {status_text}): {body}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    /// HTTP request failed at the transport level
    #[error("Request failed: {0}")]
    Request(String),

    /// Response parsing failed
    #[error("Response error: {0}")]
    Response(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Tool arguments failed validation
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResendError {
    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            ResendError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ResendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ResendError::Timeout(err.to_string())
        } else if err.is_connect() {
            ResendError::Request(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            ResendError::Response(format!("Failed to decode response: {}", err))
        } else {
            ResendError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ResendError {
    fn from(err: serde_json::Error) -> Self {
        ResendError::Response(format!("JSON parsing error: {}", err))
    }
}

impl From<std::io::Error> for ResendError {
    fn from(err: std::io::Error) -> Self {
        ResendError::Config(format!("IO error: {}", err))
    }
}

/// Result type alias for Resend operations
pub type Result<T> = std::result::Result<T, ResendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ResendError::Api {
            status: 404,
            status_text: "Not Found".to_string(),
            body: r#"{"message":"not found"}"#.to_string(),
        };

        assert_eq!(
            err.to_string(),
            r#"Resend API error (404 Not Found): {"message":"not found"}"#
        );
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_non_api_errors_have_no_status() {
        let err = ResendError::Config("missing key".to_string());
        assert!(err.status().is_none());
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_json_error_maps_to_response() {
        let err: ResendError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ResendError::Response(_)));
    }
}
