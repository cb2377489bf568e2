//! Records kept by the remote recordings service

mod metadata;

pub use metadata::{RecordingId, RecordingMetadata, UploadResponse, DEFAULT_UPLOAD_MESSAGE};
