//! API clients for the remote Strata backend
//!
//! Thin wrappers over the community-management API: authentication, community
//! administration, document upload, and query answering. Wire formats follow
//! the backend contract; failures are mapped onto [`StrataError`] so callers
//! can distinguish rejected credentials from transport-level problems.

use serde::Deserialize;
use std::collections::HashMap;
use strata_core::{ErrorContext, StrataError, StrataResult};

pub mod auth;
pub mod community;
pub mod documents;
pub mod query;

pub use auth::{AuthApi, HttpAuthClient, TokenResponse};
pub use community::{CommunityClient, CreateCommunityRequest, CreateCommunityResponse};
pub use documents::{DocumentClient, UploadResponse};
pub use query::{QueryClient, QueryResponse};

/// Configuration for API clients
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
    /// Additional headers
    pub headers: HashMap<String, String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_seconds: 30,
            user_agent: "strata/0.1.0".to_string(),
            headers: HashMap::new(),
        }
    }
}

impl From<&strata_core::ApiConfig> for ApiClientConfig {
    fn from(config: &strata_core::ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout_seconds: config.timeout_seconds,
            user_agent: config.user_agent.clone(),
            headers: HashMap::new(),
        }
    }
}

impl ApiClientConfig {
    /// Set additional header
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// Error body shape used by the backend: `{"detail": "..."}` from request
/// validation and auth failures, `{"error": "..."}` from processing failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    error: Option<String>,
}

/// Extract the human-readable message from a backend error body, if any
pub(crate) fn parse_error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail.or(b.error))
}

/// Join a base URL and an endpoint path without doubling slashes
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Map a transport-level failure onto the user-facing network error
pub(crate) fn transport_error(error: reqwest::Error, operation: &str) -> StrataError {
    StrataError::Network {
        message: "Network error. Please try again later.".to_string(),
        source: Some(Box::new(error)),
        context: ErrorContext::new("api_client").with_operation(operation),
    }
}

/// Map a non-success response onto an API error, extracting the backend's
/// detail message when present
pub(crate) async fn response_error(response: reqwest::Response, operation: &str) -> StrataError {
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    let detail = parse_error_detail(&body);

    if status == reqwest::StatusCode::NOT_FOUND {
        return StrataError::NotFound {
            resource: url.to_string(),
            context: ErrorContext::new("api_client").with_operation(operation),
        };
    }

    StrataError::Api {
        message: detail.unwrap_or_else(|| format!("HTTP {} error for {}", status.as_u16(), url)),
        status: Some(status.as_u16()),
        context: ErrorContext::new("api_client").with_operation(operation),
    }
}

/// Helper function to create HTTP client with common configuration
pub(crate) fn create_http_client(config: &ApiClientConfig) -> StrataResult<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();

    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
            let message = format!("Invalid user agent: {}", e);
            StrataError::validation(message, Some("user_agent"), "http_client")
        })?,
    );

    for (key, value) in &config.headers {
        let header_name = reqwest::header::HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            let message = format!("Invalid header name '{}': {}", key, e);
            StrataError::validation(message, Some("headers"), "http_client")
        })?;

        let header_value = reqwest::header::HeaderValue::from_str(value).map_err(|e| {
            let message = format!("Invalid header value for '{}': {}", key, e);
            StrataError::validation(message, Some("headers"), "http_client")
        })?;

        headers.insert(header_name, header_value);
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| {
            let message = format!("Failed to create HTTP client: {}", e);
            StrataError::network(message, Some(Box::new(e)), "http_client")
        })?;

    Ok(client)
}
