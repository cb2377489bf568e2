//! HTTP recordings service adapter

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use tracing::{debug, info};

use crate::application::ports::{FetchError, RecordingStore, UploadError};
use crate::domain::catalog::{RecordingMetadata, UploadResponse};
use crate::domain::recording::{RecordingFilename, WEBM_MIME_TYPE};

/// Path of the recordings collection on the service
const RECORDINGS_PATH: &str = "/api/recordings";

/// Multipart field carrying the video
const VIDEO_FIELD: &str = "video";

/// Recordings service reached over HTTP
pub struct HttpRecordingStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRecordingStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, RECORDINGS_PATH)
    }
}

#[async_trait]
impl RecordingStore for HttpRecordingStore {
    async fn upload(
        &self,
        filename: &RecordingFilename,
        data: Bytes,
    ) -> Result<UploadResponse, UploadError> {
        let size = data.len();
        let part = Part::stream_with_length(Body::from(data), size as u64)
            .file_name(filename.to_string())
            .mime_str(WEBM_MIME_TYPE)
            .map_err(|e| UploadError::RequestFailed(e.to_string()))?;
        let form = Form::new().part(VIDEO_FIELD, part);

        debug!(url = %self.endpoint(), size, "POST recording");
        let response = self
            .client
            .post(self.endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // Any 2xx means the service stored the file
        let body = response.text().await.unwrap_or_else(|e| {
            debug!("Upload response body unreadable: {}", e);
            String::new()
        });
        let parsed = UploadResponse::from_body(&body);
        info!(message = %parsed.message, "Upload accepted");
        Ok(parsed)
    }

    async fn list(&self) -> Result<Vec<RecordingMetadata>, FetchError> {
        debug!(url = %self.endpoint(), "GET recordings");
        let response = self
            .client
            .get(self.endpoint())
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Rejected {
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }
}
