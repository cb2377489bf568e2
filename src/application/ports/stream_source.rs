//! Stream acquisition port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::media::MediaStream;

/// Acquisition errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquireError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Device unavailable: {0}")]
    DeviceUnavailable(String),
}

/// Port for acquiring capture streams from the host.
///
/// Acquisition may wait on a host permission prompt. Implementations return
/// streams whose tracks are live; the caller owns them and must stop them.
#[async_trait]
pub trait StreamSource: Send + Sync {
    /// Display video plus, when the host offers it, system audio.
    async fn acquire_display(&self) -> Result<MediaStream, AcquireError>;

    /// Microphone-only audio stream.
    async fn acquire_microphone(&self) -> Result<MediaStream, AcquireError>;
}
