//! Recording session state machine

use std::fmt;
use thiserror::Error;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Recording,
    /// Stop was requested; waiting for the recorder to flush its last chunks
    Finalizing,
    Stopped,
}

/// Events that drive the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionEvent {
    /// User asked to start a new recording
    Start,
    /// Recorder delivered a chunk of encoded media
    Chunk,
    /// Manual stop or timer ceiling
    StopRequested,
    /// Recorder has flushed everything and finished
    RecorderStopped,
    /// One second elapsed
    Tick,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Finalizing => "finalizing",
            Self::Stopped => "stopped",
        }
    }

    /// Transition table. `None` means the event does not apply in this state.
    ///
    /// ```text
    ///   IDLE       --Start-----------> RECORDING
    ///   STOPPED    --Start-----------> RECORDING
    ///   RECORDING  --Chunk|Tick------> RECORDING
    ///   RECORDING  --StopRequested---> FINALIZING
    ///   RECORDING  --RecorderStopped-> STOPPED    (recorder ended on its own)
    ///   FINALIZING --Chunk-----------> FINALIZING
    ///   FINALIZING --RecorderStopped-> STOPPED
    /// ```
    pub const fn on(self, event: SessionEvent) -> Option<SessionState> {
        use SessionEvent as E;
        use SessionState as S;

        match (self, event) {
            (S::Idle | S::Stopped, E::Start) => Some(S::Recording),
            (S::Recording, E::Chunk | E::Tick) => Some(S::Recording),
            (S::Recording, E::StopRequested) => Some(S::Finalizing),
            (S::Recording | S::Finalizing, E::RecorderStopped) => Some(S::Stopped),
            (S::Finalizing, E::Chunk) => Some(S::Finalizing),
            _ => None,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: SessionState,
    pub action: String,
}
