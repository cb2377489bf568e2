//! Application layer - Use cases and port interfaces
//!
//! Contains the recording workflow and the trait definitions
//! for the host and service it talks to.

pub mod acquire;
pub mod catalog;
pub mod controller;
pub mod export;
pub mod mixer;
pub mod ports;
pub mod timer;

// Re-export use cases
pub use acquire::{AcquiredStreams, StreamAcquirer};
pub use catalog::RecordingCatalog;
pub use controller::{RecordingController, SessionError, SessionSnapshot};
pub use export::RecordingExporter;
pub use mixer::AudioMixer;
pub use timer::{SessionTimer, TimerControl, TICK_INTERVAL};
