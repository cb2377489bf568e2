//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_graph;
pub mod config;
pub mod file_saver;
pub mod notifier;
pub mod recorder;
pub mod store;
pub mod stream_source;

// Re-export common types
pub use audio_graph::AudioGraph;
pub use config::ConfigStore;
pub use file_saver::{FileSaver, SaveError};
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use recorder::{Recorder, RecorderEvent, RecorderEvents, RecordingError};
pub use store::{FetchError, RecordingStore, UploadError};
pub use stream_source::{AcquireError, StreamSource};
