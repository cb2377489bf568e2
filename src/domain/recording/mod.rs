//! Recording session state machine and its output

mod finalized;
mod session;
mod state;

pub use finalized::{human_readable_size, FinalizedRecording, RecordingFilename, WEBM_MIME_TYPE};
pub use session::{RecordingSession, TickOutcome, MAX_RECORDING_SECS};
pub use state::{InvalidStateTransition, SessionEvent, SessionState};
