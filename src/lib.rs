//! Screen Recorder - capture the screen with mixed audio
//!
//! Records the display together with system audio and the microphone,
//! mixed into a single track, as a WebM file that can be saved locally or
//! uploaded to a recordings service.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Media tracks, the recording session state machine, catalog records, config
//! - **Application**: Use cases (acquire, mix, record, export) and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (FFmpeg, HTTP service, notifications, config file)
//! - **CLI**: Interactive prompt, argument parsing and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
