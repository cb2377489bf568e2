//! Recording session use case

use std::sync::{Arc, Weak};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tokio::task::AbortHandle;
use tracing::{debug, error, info, warn};

use crate::domain::media::{compose, CombinedStream};
use crate::domain::recording::{
    FinalizedRecording, InvalidStateTransition, RecordingSession, SessionState, TickOutcome,
};

use super::acquire::{AcquiredStreams, StreamAcquirer};
use super::mixer::AudioMixer;
use super::ports::{
    AcquireError, AudioGraph, NotificationIcon, Notifier, Recorder, RecorderEvent,
    RecorderEvents, RecordingError, StreamSource,
};
use super::timer::{SessionTimer, TimerControl, TICK_INTERVAL};

/// Title used for every notification raised by the session
const NOTIFY_TITLE: &str = "Screen Recorder";

/// Errors from the session use case
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Could not start recording: {0}")]
    Acquire(#[from] AcquireError),

    #[error("Recording failed: {0}")]
    Recording(#[from] RecordingError),

    #[error("{0}")]
    InvalidState(#[from] InvalidStateTransition),
}

/// Point-in-time view of the session for UIs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub elapsed_secs: u64,
    pub ceiling_secs: u64,
    /// A finalized recording is available for download/upload
    pub recording_ready: bool,
}

impl SessionSnapshot {
    fn of(session: &RecordingSession) -> Self {
        Self {
            state: session.state(),
            elapsed_secs: session.elapsed_secs(),
            ceiling_secs: session.ceiling_secs(),
            recording_ready: session.finalized().is_some(),
        }
    }
}

/// Devices held by the active session
struct ActiveCapture {
    streams: AcquiredStreams,
    combined: CombinedStream,
}

impl ActiveCapture {
    fn release(&self) {
        self.combined.stop();
        self.streams.release();
    }
}

/// Everything the session's event handlers mutate
struct ControllerState {
    session: RecordingSession,
    capture: Option<ActiveCapture>,
    timer: SessionTimer,
    /// Bumped on every start; recorder events carry the value they were
    /// started under and are dropped once it no longer matches
    generation: u64,
    pump: Option<AbortHandle>,
}

struct Inner<S, G, R, N>
where
    S: StreamSource,
    G: AudioGraph,
    R: Recorder,
    N: Notifier,
{
    acquirer: StreamAcquirer<S>,
    mixer: AudioMixer<G>,
    recorder: R,
    notifier: N,
    state: Mutex<ControllerState>,
    snapshot: watch::Sender<SessionSnapshot>,
}

/// Drives one recording session at a time: acquire, mix, compose, record,
/// bound by the session timer, finalize.
pub struct RecordingController<S, G, R, N>
where
    S: StreamSource,
    G: AudioGraph,
    R: Recorder,
    N: Notifier,
{
    inner: Arc<Inner<S, G, R, N>>,
}

impl<S, G, R, N> Clone for RecordingController<S, G, R, N>
where
    S: StreamSource,
    G: AudioGraph,
    R: Recorder,
    N: Notifier,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, G, R, N> RecordingController<S, G, R, N>
where
    S: StreamSource + 'static,
    G: AudioGraph + 'static,
    R: Recorder + 'static,
    N: Notifier + 'static,
{
    /// Create a controller with the default 180 s ceiling
    pub fn new(source: S, graph: G, recorder: R, notifier: N) -> Self {
        Self::with_session(source, graph, recorder, notifier, RecordingSession::new())
    }

    /// Create a controller around a pre-configured idle session
    pub fn with_session(
        source: S,
        graph: G,
        recorder: R,
        notifier: N,
        session: RecordingSession,
    ) -> Self {
        let (snapshot, _) = watch::channel(SessionSnapshot::of(&session));
        Self {
            inner: Arc::new(Inner {
                acquirer: StreamAcquirer::new(source),
                mixer: AudioMixer::new(graph),
                recorder,
                notifier,
                state: Mutex::new(ControllerState {
                    session,
                    capture: None,
                    timer: SessionTimer::idle(),
                    generation: 0,
                    pump: None,
                }),
                snapshot,
            }),
        }
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.inner.snapshot.borrow().state
    }

    /// Seconds elapsed in the current session
    pub fn elapsed_secs(&self) -> u64 {
        self.inner.snapshot.borrow().elapsed_secs
    }

    /// Latest snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        *self.inner.snapshot.borrow()
    }

    /// Receive a snapshot on every state change and timer tick
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.snapshot.subscribe()
    }

    /// Recording produced by the last finished session, if any
    pub async fn latest_recording(&self) -> Option<FinalizedRecording> {
        self.inner.state.lock().await.session.finalized().cloned()
    }

    /// Wait until the current session has been finalized.
    ///
    /// Returns `None` straight away when no session was ever started.
    pub async fn wait_finalized(&self) -> Option<FinalizedRecording> {
        let mut rx = self.subscribe();
        if rx.borrow().state == SessionState::Idle {
            return None;
        }
        rx.wait_for(|s| s.state == SessionState::Stopped).await.ok()?;
        self.latest_recording().await
    }

    /// Start a new session.
    ///
    /// Any failure is shown to the user once and leaves the session where
    /// it was, with every acquired device released and no timer running.
    pub async fn start(&self) -> Result<(), SessionError> {
        let mut state = self.inner.state.lock().await;
        if !state.session.can_start() {
            return Err(InvalidStateTransition {
                current_state: state.session.state(),
                action: "start recording".to_string(),
            }
            .into());
        }

        let streams = match self.inner.acquirer.acquire_all().await {
            Ok(streams) => streams,
            Err(e) => {
                let err = SessionError::from(e);
                self.inner.report(&err).await;
                return Err(err);
            }
        };

        let mixed = self
            .inner
            .mixer
            .mix(&[&streams.display, &streams.microphone]);
        let combined = compose(&streams.display, mixed);
        let capture = ActiveCapture { streams, combined };

        let events = match self.inner.recorder.start(&capture.combined).await {
            Ok(events) => events,
            Err(e) => {
                capture.release();
                let err = SessionError::from(e);
                self.inner.report(&err).await;
                return Err(err);
            }
        };

        state.session.start()?;
        state.generation += 1;
        state.capture = Some(capture);
        state.timer = self.start_timer();
        let pump = tokio::spawn(pump_events(
            Arc::clone(&self.inner),
            events,
            state.generation,
        ));
        state.pump = Some(pump.abort_handle());
        self.inner.publish(&state.session);
        drop(state);

        info!("Recording started");
        self.inner
            .notify("Recording started", NotificationIcon::Recording)
            .await;

        Ok(())
    }

    /// Stop the running session.
    ///
    /// Returns `Ok(false)` without side effects when nothing is recording.
    /// The recording is finalized asynchronously once the recorder has
    /// flushed; use [`wait_finalized`](Self::wait_finalized) to await it.
    pub async fn stop(&self) -> Result<bool, SessionError> {
        self.inner.stop().await
    }

    fn start_timer(&self) -> SessionTimer {
        let weak: Weak<Inner<S, G, R, N>> = Arc::downgrade(&self.inner);
        SessionTimer::start(TICK_INTERVAL, move || {
            let weak = weak.clone();
            async move {
                match weak.upgrade() {
                    Some(inner) => inner.on_tick().await,
                    None => TimerControl::Stop,
                }
            }
        })
    }
}

impl<S, G, R, N> Inner<S, G, R, N>
where
    S: StreamSource,
    G: AudioGraph,
    R: Recorder,
    N: Notifier,
{
    fn publish(&self, session: &RecordingSession) {
        self.snapshot.send_replace(SessionSnapshot::of(session));
    }

    async fn notify(&self, message: &str, icon: NotificationIcon) {
        if let Err(e) = self.notifier.notify(NOTIFY_TITLE, message, icon).await {
            warn!("Notification failed: {}", e);
        }
    }

    async fn report(&self, err: &SessionError) {
        error!("{}", err);
        self.notify(&err.to_string(), NotificationIcon::Error).await;
    }

    async fn stop(&self) -> Result<bool, SessionError> {
        let generation = {
            let mut state = self.state.lock().await;
            if !state.session.request_stop() {
                debug!("Stop ignored in {} state", state.session.state());
                return Ok(false);
            }
            state.timer.cancel();
            self.publish(&state.session);
            state.generation
        };

        info!("Stopping recording");
        if let Err(e) = self.recorder.stop().await {
            // The recorder will not flush; finish with what we have and stop
            // listening to it
            let err = SessionError::from(e);
            self.report(&err).await;
            self.abandon_pump(generation).await;
            self.finalize(generation).await;
            return Err(err);
        }
        Ok(true)
    }

    async fn abandon_pump(&self, generation: u64) {
        let mut state = self.state.lock().await;
        if state.generation == generation {
            if let Some(pump) = state.pump.take() {
                pump.abort();
            }
        }
    }

    async fn is_current(&self, generation: u64) -> bool {
        self.state.lock().await.generation == generation
    }

    async fn on_tick(&self) -> TimerControl {
        let outcome = {
            let mut state = self.state.lock().await;
            let outcome = state.session.tick();
            self.publish(&state.session);
            outcome
        };

        match outcome {
            TickOutcome::Counting(_) => TimerControl::Continue,
            TickOutcome::Ignored => TimerControl::Stop,
            TickOutcome::CeilingReached => {
                info!("Maximum duration reached, stopping");
                if let Err(e) = self.stop().await {
                    warn!("Auto-stop failed: {}", e);
                }
                TimerControl::Stop
            }
        }
    }

    async fn on_chunk(&self, generation: u64, chunk: bytes::Bytes) {
        let size = chunk.len();
        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(size, "Chunk from an earlier recording dropped");
            return;
        }
        if !state.session.push_chunk(chunk) {
            debug!(size, "Chunk dropped");
        }
    }

    async fn finalize(&self, generation: u64) {
        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!("Stale recorder finished, session untouched");
            return;
        }
        state.timer.cancel();
        state.pump = None;

        let Some(recording) = state.session.finish(Utc::now()).cloned() else {
            return;
        };
        if let Some(capture) = state.capture.take() {
            capture.release();
        }
        self.publish(&state.session);
        drop(state);

        info!(
            bytes = recording.size_bytes(),
            filename = %recording.filename(),
            "Recording finalized"
        );
        self.notify(
            &format!("Recording ready ({})", recording.human_readable_size()),
            NotificationIcon::Success,
        )
        .await;
    }
}

/// Apply recorder events to the session, strictly in arrival order
async fn pump_events<S, G, R, N>(
    inner: Arc<Inner<S, G, R, N>>,
    mut events: RecorderEvents,
    generation: u64,
) where
    S: StreamSource,
    G: AudioGraph,
    R: Recorder,
    N: Notifier,
{
    while let Some(event) = events.recv().await {
        match event {
            RecorderEvent::DataAvailable(chunk) => inner.on_chunk(generation, chunk).await,
            RecorderEvent::Failed(reason) => {
                if !inner.is_current(generation).await {
                    debug!("Failure of an earlier recording ignored: {}", reason);
                    continue;
                }
                let err = SessionError::Recording(RecordingError::Failed(reason));
                inner.report(&err).await;
            }
            RecorderEvent::Stopped => break,
        }
    }
    // Reached on `Stopped` and when the recorder drops its sender
    inner.finalize(generation).await;
}
