//! Query answering API client
//!
//! Asks the community assistant a question over the indexed documents.
//! Requires an authenticated bearer token.

use serde::Deserialize;
use strata_core::StrataResult;
use tracing::debug;

use super::{create_http_client, join_url, response_error, transport_error, ApiClientConfig};

/// Backend response for an answered query
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
}

/// Query answering client
pub struct QueryClient {
    client: reqwest::Client,
    config: ApiClientConfig,
}

impl QueryClient {
    /// Create a new query client
    pub fn new(config: ApiClientConfig) -> StrataResult<Self> {
        let client = create_http_client(&config)?;

        Ok(Self { client, config })
    }

    /// Answer a question against the community's documents
    pub async fn answer_query(
        &self,
        token: &str,
        query: &str,
        community_code: &str,
    ) -> StrataResult<QueryResponse> {
        debug!("Answering query for community {}", community_code);

        let response = self
            .client
            .post(join_url(&self.config.base_url, "/query/answer_query"))
            .query(&[("query", query), ("hoa_code", community_code)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| transport_error(e, "answer_query"))?;

        if !response.status().is_success() {
            return Err(response_error(response, "answer_query").await);
        }

        let answered: QueryResponse = response
            .json()
            .await
            .map_err(|e| transport_error(e, "answer_query"))?;

        Ok(answered)
    }
}
