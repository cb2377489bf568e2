//! Recordings service port interface

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::domain::catalog::{RecordingMetadata, UploadResponse};
use crate::domain::recording::RecordingFilename;

/// Upload errors
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    #[error("Upload failed: {0}")]
    RequestFailed(String),

    #[error("Upload failed: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Catalog fetch errors
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Failed to fetch recordings: {0}")]
    RequestFailed(String),

    #[error("Failed to fetch recordings: HTTP {status}")]
    Rejected { status: u16 },

    #[error("Failed to fetch recordings: invalid response: {0}")]
    InvalidResponse(String),
}

/// Port for the remote recordings service
#[async_trait]
pub trait RecordingStore: Send + Sync {
    /// Store a recording under the given file name.
    async fn upload(
        &self,
        filename: &RecordingFilename,
        data: Bytes,
    ) -> Result<UploadResponse, UploadError>;

    /// List every stored recording.
    async fn list(&self) -> Result<Vec<RecordingMetadata>, FetchError>;
}

/// Blanket implementation for shared store types
#[async_trait]
impl<T: RecordingStore + ?Sized> RecordingStore for Arc<T> {
    async fn upload(
        &self,
        filename: &RecordingFilename,
        data: Bytes,
    ) -> Result<UploadResponse, UploadError> {
        self.as_ref().upload(filename, data).await
    }

    async fn list(&self) -> Result<Vec<RecordingMetadata>, FetchError> {
        self.as_ref().list().await
    }
}
