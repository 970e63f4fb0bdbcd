//! Authentication API client
//!
//! Implements the login/signup/verify contract of the Strata backend. Login
//! posts a urlencoded form, signup a multipart form, matching the backend's
//! endpoint signatures; both return a bearer token on success.

use async_trait::async_trait;
use serde::Deserialize;
use strata_core::{ErrorContext, StrataError, StrataResult};
use tracing::{debug, info, warn};

use super::{
    create_http_client, join_url, parse_error_detail, transport_error, ApiClientConfig,
};

/// Token issued by the backend on successful login or signup
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Remote authentication contract consumed by the session manager
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Authenticate with email and password, returning a fresh token
    async fn login(&self, email: &str, password: &str) -> StrataResult<TokenResponse>;

    /// Register a new account in an existing community
    async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        community_code: &str,
    ) -> StrataResult<TokenResponse>;

    /// Check a bearer token against the backend. `Ok(false)` means the
    /// backend rejected it; transport failures surface as errors so they can
    /// be logged distinctly.
    async fn verify_token(&self, token: &str) -> StrataResult<bool>;
}

/// Authentication client backed by the Strata HTTP API
pub struct HttpAuthClient {
    client: reqwest::Client,
    config: ApiClientConfig,
}

impl HttpAuthClient {
    /// Create a new authentication client
    pub fn new(config: ApiClientConfig) -> StrataResult<Self> {
        let client = create_http_client(&config)?;

        info!("Created auth client for {}", config.base_url);

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        join_url(&self.config.base_url, path)
    }

    /// Map an auth-endpoint error response: client errors carry the
    /// backend's rejection message, anything else is an API failure
    async fn credential_error(
        response: reqwest::Response,
        fallback: &str,
        operation: &str,
    ) -> StrataError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = parse_error_detail(&body);

        if status.is_client_error() {
            warn!(
                "{} rejected with HTTP {}: {}",
                operation,
                status.as_u16(),
                detail.as_deref().unwrap_or("no detail")
            );
            StrataError::Credentials {
                message: detail.unwrap_or_else(|| fallback.to_string()),
                context: ErrorContext::new("auth_client").with_operation(operation),
            }
        } else {
            StrataError::Api {
                message: detail
                    .unwrap_or_else(|| format!("HTTP {} error", status.as_u16())),
                status: Some(status.as_u16()),
                context: ErrorContext::new("auth_client").with_operation(operation),
            }
        }
    }
}

#[async_trait]
impl AuthApi for HttpAuthClient {
    async fn login(&self, email: &str, password: &str) -> StrataResult<TokenResponse> {
        let response = self
            .client
            .post(self.endpoint("/auth/login"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await
            .map_err(|e| transport_error(e, "login"))?;

        if !response.status().is_success() {
            return Err(Self::credential_error(response, "Login failed", "login").await);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| transport_error(e, "login"))?;

        debug!("Login succeeded for {}", email);
        Ok(token)
    }

    async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        community_code: &str,
    ) -> StrataResult<TokenResponse> {
        // The backend's signup endpoint takes multipart form fields; the
        // community code travels as "hoa_code" on the wire
        let form = reqwest::multipart::Form::new()
            .text("name", name.to_string())
            .text("email", email.to_string())
            .text("password", password.to_string())
            .text("hoa_code", community_code.to_string());

        let response = self
            .client
            .post(self.endpoint("/auth/signup"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error(e, "signup"))?;

        if !response.status().is_success() {
            return Err(Self::credential_error(response, "Signup failed", "signup").await);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| transport_error(e, "signup"))?;

        debug!("Signup succeeded for {}", email);
        Ok(token)
    }

    async fn verify_token(&self, token: &str) -> StrataResult<bool> {
        let response = self
            .client
            .get(self.endpoint("/auth/verify"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| transport_error(e, "verify_token"))?;

        if response.status().is_success() {
            Ok(true)
        } else {
            debug!(
                "Token verification rejected with HTTP {}",
                response.status().as_u16()
            );
            Ok(false)
        }
    }
}
