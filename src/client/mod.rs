//! Client Module
//!
//! HTTP dispatch and rate limiting functionality.

pub mod http;
pub mod rate_limiter;
pub mod request;

pub use http::HttpClient;
pub use rate_limiter::RateLimiter;
pub use request::OutboundRequest;
