//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with FFmpeg, the recordings service, the desktop
//! notification daemon and the config file.

pub mod capture;
pub mod config;
pub mod notification;
pub mod recording;
pub mod storage;

// Re-export adapters
pub use capture::{CaptureBackend, FfmpegAudioGraph, FfmpegStreamSource};
pub use config::XdgConfigStore;
pub use notification::{FanoutNotifier, NotifyRustNotifier};
pub use recording::FfmpegRecorder;
pub use storage::{HttpRecordingStore, LocalFileSaver};
