//! Capture infrastructure module
//!
//! Maps display, system audio and microphone capture onto FFmpeg input
//! devices for the current platform.

mod backend;
mod ffmpeg_source;
mod mixer;

pub use backend::CaptureBackend;
pub use ffmpeg_source::FfmpegStreamSource;
pub use mixer::FfmpegAudioGraph;
