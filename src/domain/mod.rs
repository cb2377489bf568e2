//! Domain layer - Core recording logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod catalog;
pub mod config;
pub mod error;
pub mod media;
pub mod recording;

// Re-export common types
pub use catalog::{RecordingId, RecordingMetadata, UploadResponse};
pub use config::AppConfig;
pub use error::*;
pub use media::{compose, CombinedStream, DeviceInput, MediaStream, MediaTrack, TrackKind, TrackSource};
pub use recording::{
    FinalizedRecording, InvalidStateTransition, RecordingFilename, RecordingSession,
    SessionEvent, SessionState, TickOutcome, MAX_RECORDING_SECS,
};
