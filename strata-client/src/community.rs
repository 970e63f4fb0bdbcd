//! Community administration API client
//!
//! Bootstrap endpoint for creating a new community together with its admin
//! account. The returned community code is what residents use to sign up.

use serde::{Deserialize, Serialize};
use strata_core::StrataResult;
use tracing::info;

use super::{create_http_client, join_url, response_error, transport_error, ApiClientConfig};

/// Request body for community creation
#[derive(Debug, Clone, Serialize)]
pub struct CreateCommunityRequest {
    pub name: String,
    pub max_households: u32,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_password: String,
}

/// Backend response for community creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommunityResponse {
    pub message: String,
    /// Invite code for the new community; "hoa_code" on the wire
    pub hoa_code: String,
}

/// Community administration client
pub struct CommunityClient {
    client: reqwest::Client,
    config: ApiClientConfig,
}

impl CommunityClient {
    /// Create a new community administration client
    pub fn new(config: ApiClientConfig) -> StrataResult<Self> {
        let client = create_http_client(&config)?;

        Ok(Self { client, config })
    }

    /// Create a community with an admin user
    pub async fn create_community(
        &self,
        request: &CreateCommunityRequest,
    ) -> StrataResult<CreateCommunityResponse> {
        let response = self
            .client
            .post(join_url(&self.config.base_url, "/admin/create_community"))
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(e, "create_community"))?;

        if !response.status().is_success() {
            return Err(response_error(response, "create_community").await);
        }

        let created: CreateCommunityResponse = response
            .json()
            .await
            .map_err(|e| transport_error(e, "create_community"))?;

        info!("Created community {}", created.hoa_code);
        Ok(created)
    }
}
