//! Recording infrastructure module
//!
//! Encodes the combined stream to WebM with FFmpeg and streams the output
//! back as chunks.

mod ffmpeg;

pub use ffmpeg::FfmpegRecorder;
