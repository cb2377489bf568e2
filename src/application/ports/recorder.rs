//! Media recorder port interface

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::media::CombinedStream;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Failed to stop recording: {0}")]
    StopFailed(String),

    #[error("Recorder failed: {0}")]
    Failed(String),

    #[error("No recording in progress")]
    NotRecording,
}

/// Events emitted by a running recorder, in order.
///
/// A recorder emits any number of `DataAvailable` (and at most one `Failed`)
/// followed by exactly one `Stopped`. Every chunk produced before the stop
/// signal is delivered before `Stopped`.
#[derive(Debug, Clone, PartialEq)]
pub enum RecorderEvent {
    DataAvailable(Bytes),
    Failed(String),
    Stopped,
}

/// Receiving end of a recorder's event channel
pub type RecorderEvents = mpsc::Receiver<RecorderEvent>;

/// Port for encoding a combined stream into `video/webm` chunks
#[async_trait]
pub trait Recorder: Send + Sync {
    /// Start recording the stream.
    ///
    /// # Returns
    /// The channel on which chunks and the final `Stopped` arrive
    async fn start(&self, stream: &CombinedStream) -> Result<RecorderEvents, RecordingError>;

    /// Ask the recorder to finish. Returns once the request is sent; the
    /// remaining chunks and `Stopped` follow on the event channel.
    async fn stop(&self) -> Result<(), RecordingError>;
}
