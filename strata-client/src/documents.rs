//! Document upload API client
//!
//! Uploads community documents (PDF) for indexing by the backend. Requires
//! an authenticated bearer token.

use serde::Deserialize;
use strata_core::{StrataError, StrataResult};
use tracing::{debug, info};

use super::{create_http_client, join_url, response_error, transport_error, ApiClientConfig};

/// Backend response for a processed document upload
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub path: Option<String>,
    pub chunk_count: Option<u64>,
}

/// Document upload client
pub struct DocumentClient {
    client: reqwest::Client,
    config: ApiClientConfig,
}

impl DocumentClient {
    /// Create a new document client
    pub fn new(config: ApiClientConfig) -> StrataResult<Self> {
        let client = create_http_client(&config)?;

        Ok(Self { client, config })
    }

    /// Upload a document to the community's archive
    pub async fn upload_document(
        &self,
        token: &str,
        community_code: &str,
        document_type: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> StrataResult<UploadResponse> {
        debug!(
            "Uploading {} ({} bytes) for community {}",
            file_name,
            bytes.len(),
            community_code
        );

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|e| {
                let message = format!("Invalid upload content type: {}", e);
                StrataError::validation(message, Some("file"), "document_client")
            })?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("hoa_code", community_code.to_string())
            .text("document_type", document_type.to_string());

        let response = self
            .client
            .post(join_url(&self.config.base_url, "/upload/upload_pdf"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error(e, "upload_document"))?;

        if !response.status().is_success() {
            return Err(response_error(response, "upload_document").await);
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| transport_error(e, "upload_document"))?;

        info!("Uploaded document {}", file_name);
        Ok(uploaded)
    }
}
