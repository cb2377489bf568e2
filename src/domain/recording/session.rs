//! Recording session entity

use bytes::Bytes;
use chrono::{DateTime, Utc};

use super::finalized::FinalizedRecording;
use super::state::{InvalidStateTransition, SessionEvent, SessionState};

/// Hard ceiling on session length (3 minutes)
pub const MAX_RECORDING_SECS: u64 = 180;

/// Result of feeding one timer tick to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session is not recording; the tick was dropped
    Ignored,
    /// Elapsed seconds after the tick
    Counting(u64),
    /// Elapsed seconds reached the ceiling; the session must be stopped
    CeilingReached,
}

/// One recording session.
///
/// Holds the ordered chunk sequence and the elapsed counter. All mutation goes
/// through [`SessionState::on`], so an event that does not apply in the
/// current state leaves the session untouched.
#[derive(Debug)]
pub struct RecordingSession {
    state: SessionState,
    elapsed_secs: u64,
    ceiling_secs: u64,
    chunks: Vec<Bytes>,
    finalized: Option<FinalizedRecording>,
}

impl RecordingSession {
    /// Create an idle session with the default ceiling
    pub fn new() -> Self {
        Self::with_ceiling(MAX_RECORDING_SECS)
    }

    /// Create an idle session with a custom ceiling
    pub fn with_ceiling(ceiling_secs: u64) -> Self {
        Self {
            state: SessionState::Idle,
            elapsed_secs: 0,
            ceiling_secs,
            chunks: Vec::new(),
            finalized: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    pub fn is_finalizing(&self) -> bool {
        self.state == SessionState::Finalizing
    }

    pub fn is_stopped(&self) -> bool {
        self.state == SessionState::Stopped
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn ceiling_secs(&self) -> u64 {
        self.ceiling_secs
    }

    /// Number of chunks captured so far
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Bytes captured so far
    pub fn buffered_bytes(&self) -> usize {
        self.chunks.iter().map(Bytes::len).sum()
    }

    /// Recording produced by the last finished session
    pub fn finalized(&self) -> Option<&FinalizedRecording> {
        self.finalized.as_ref()
    }

    /// Whether `start` would be accepted
    pub fn can_start(&self) -> bool {
        self.state.on(SessionEvent::Start).is_some()
    }

    /// Begin a fresh session. Clears chunks, elapsed time and the previous
    /// recording.
    pub fn start(&mut self) -> Result<(), InvalidStateTransition> {
        let next = self
            .state
            .on(SessionEvent::Start)
            .ok_or_else(|| InvalidStateTransition {
                current_state: self.state,
                action: "start recording".to_string(),
            })?;

        self.chunks.clear();
        self.elapsed_secs = 0;
        self.finalized = None;
        self.state = next;
        Ok(())
    }

    /// Append a chunk. Empty chunks and chunks outside an active session are
    /// dropped; returns whether the chunk was kept.
    pub fn push_chunk(&mut self, chunk: Bytes) -> bool {
        if chunk.is_empty() {
            return false;
        }
        match self.state.on(SessionEvent::Chunk) {
            Some(next) => {
                self.chunks.push(chunk);
                self.state = next;
                true
            }
            None => false,
        }
    }

    /// Count one elapsed second
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.on(SessionEvent::Tick).is_none() {
            return TickOutcome::Ignored;
        }
        if self.elapsed_secs >= self.ceiling_secs {
            return TickOutcome::CeilingReached;
        }

        self.elapsed_secs += 1;
        if self.elapsed_secs >= self.ceiling_secs {
            TickOutcome::CeilingReached
        } else {
            TickOutcome::Counting(self.elapsed_secs)
        }
    }

    /// Move to finalizing. Returns false (and changes nothing) unless the
    /// session is recording.
    pub fn request_stop(&mut self) -> bool {
        match self.state.on(SessionEvent::StopRequested) {
            Some(next) => {
                self.state = next;
                true
            }
            None => false,
        }
    }

    /// Assemble the recording once the recorder has flushed.
    ///
    /// Returns `None` when there is nothing to finish, so a repeated stop
    /// never builds a second blob.
    pub fn finish(&mut self, created_at: DateTime<Utc>) -> Option<&FinalizedRecording> {
        let next = self.state.on(SessionEvent::RecorderStopped)?;
        let chunks = std::mem::take(&mut self.chunks);
        self.finalized = Some(FinalizedRecording::assemble(&chunks, created_at));
        self.state = next;
        self.finalized.as_ref()
    }
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}
