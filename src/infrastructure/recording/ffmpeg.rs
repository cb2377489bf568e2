//! FFmpeg-based WebM recorder adapter

use std::io;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, info, warn};

use crate::application::ports::{Recorder, RecorderEvent, RecorderEvents, RecordingError};
use crate::domain::media::{CombinedStream, DeviceInput};

/// Bytes requested per read from ffmpeg's stdout
const CHUNK_SIZE: usize = 64 * 1024;

/// How long ffmpeg gets to flush after `q` before it is killed
const STOP_GRACE: Duration = Duration::from_secs(5);

/// Capacity of the event channel handed to the session
const EVENT_BUFFER: usize = 64;

const FRAME_RATE: &str = "30";

/// Handles to the running ffmpeg process
struct RunningProcess {
    stdin: Option<ChildStdin>,
    kill: oneshot::Sender<()>,
}

/// Records a combined stream by piping ffmpeg's WebM output back as chunks
pub struct FfmpegRecorder {
    binary: String,
    process: Mutex<Option<RunningProcess>>,
}

impl FfmpegRecorder {
    pub fn new() -> Self {
        Self::with_binary("ffmpeg")
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            process: Mutex::new(None),
        }
    }

    /// Build ffmpeg args: display video first, then each audio device,
    /// mixed with `amix` when there is more than one.
    pub(crate) fn build_ffmpeg_args(stream: &CombinedStream) -> Result<Vec<String>, RecordingError> {
        let display = stream
            .video_tracks()
            .flat_map(|t| t.source().devices())
            .next()
            .ok_or_else(|| RecordingError::StartFailed("stream has no video track".to_string()))?;

        let audio: Vec<&DeviceInput> = stream
            .audio_track()
            .map(|t| t.source().devices())
            .unwrap_or_default();

        let mut args: Vec<String> = ["-hide_banner", "-loglevel", "error"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        push_input(&mut args, display, Some(FRAME_RATE));
        for device in &audio {
            push_input(&mut args, device, None);
        }

        args.extend(["-map".to_string(), "0:v".to_string()]);
        match audio.len() {
            0 => {}
            1 => args.extend(["-map".to_string(), "1:a".to_string()]),
            n => {
                let inputs: String = (1..=n).map(|i| format!("[{}:a]", i)).collect();
                args.extend([
                    "-filter_complex".to_string(),
                    format!("{}amix=inputs={}:duration=longest[aout]", inputs, n),
                    "-map".to_string(),
                    "[aout]".to_string(),
                ]);
            }
        }

        // Encoding settings (realtime VP8 + Opus in WebM, streamed to stdout)
        args.extend(
            [
                "-c:v", "libvpx", "-deadline", "realtime", "-cpu-used", "8", "-b:v", "1M",
                "-c:a", "libopus", "-b:a", "96k", "-f", "webm", "pipe:1",
            ]
            .iter()
            .map(|s| s.to_string()),
        );

        Ok(args)
    }

    fn spawn_ffmpeg(&self, args: Vec<String>) -> Result<Child, RecordingError> {
        Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RecordingError::StartFailed(format!("{} not found in PATH", self.binary))
                } else {
                    RecordingError::StartFailed(e.to_string())
                }
            })
    }
}

fn push_input(args: &mut Vec<String>, input: &DeviceInput, frame_rate: Option<&str>) {
    args.extend([
        "-thread_queue_size".to_string(),
        "512".to_string(),
        "-f".to_string(),
        input.driver.clone(),
    ]);
    if let Some(rate) = frame_rate {
        args.extend(["-framerate".to_string(), rate.to_string()]);
    }
    args.extend(["-i".to_string(), input.device.clone()]);
}

impl Default for FfmpegRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Recorder for FfmpegRecorder {
    async fn start(&self, stream: &CombinedStream) -> Result<RecorderEvents, RecordingError> {
        let mut process_guard = self.process.lock().await;
        // A closed kill channel means ffmpeg already exited on its own
        if process_guard.as_ref().is_some_and(|p| !p.kill.is_closed()) {
            return Err(RecordingError::StartFailed(
                "Recording already in progress".to_string(),
            ));
        }

        let args = Self::build_ffmpeg_args(stream)?;
        debug!(args = %args.join(" "), "Spawning ffmpeg");
        let mut child = self.spawn_ffmpeg(args)?;

        let (Some(stdin), Some(stdout), Some(stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            let _ = child.start_kill();
            return Err(RecordingError::StartFailed(
                "ffmpeg pipes unavailable".to_string(),
            ));
        };

        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        let (kill_tx, kill_rx) = oneshot::channel();
        tokio::spawn(supervise(child, stdout, stderr, kill_rx, events_tx));

        *process_guard = Some(RunningProcess {
            stdin: Some(stdin),
            kill: kill_tx,
        });
        info!("ffmpeg recording started");
        Ok(events_rx)
    }

    async fn stop(&self) -> Result<(), RecordingError> {
        let mut running = self
            .process
            .lock()
            .await
            .take()
            .ok_or(RecordingError::NotRecording)?;

        // `q` asks ffmpeg to finish the file; closing stdin follows
        if let Some(mut stdin) = running.stdin.take() {
            match stdin.write_all(b"q").await {
                Ok(()) => {}
                // ffmpeg already exited; the supervisor reports how
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("ffmpeg stdin closed before stop: {}", e);
                }
                Err(e) => {
                    warn!("Could not ask ffmpeg to stop, killing it: {}", e);
                    let _ = running.kill.send(());
                    return Err(RecordingError::StopFailed(e.to_string()));
                }
            }
            let _ = stdin.shutdown().await;
        }

        let kill = running.kill;
        tokio::spawn(async move {
            tokio::time::sleep(STOP_GRACE).await;
            let _ = kill.send(());
        });
        Ok(())
    }
}

/// Forward stdout as chunks until ffmpeg exits, then report how it ended
async fn supervise(
    mut child: Child,
    mut stdout: ChildStdout,
    stderr: ChildStderr,
    mut kill_rx: oneshot::Receiver<()>,
    events: mpsc::Sender<RecorderEvent>,
) {
    let stderr_task = tokio::spawn(collect_stderr(stderr));
    let mut buf = BytesMut::with_capacity(CHUNK_SIZE);
    let mut killed = false;

    loop {
        tokio::select! {
            read = stdout.read_buf(&mut buf) => match read {
                Ok(0) => break,
                Ok(n) => {
                    debug!(bytes = n, "ffmpeg chunk");
                    let chunk = buf.split().freeze();
                    if events.send(RecorderEvent::DataAvailable(chunk)).await.is_err() {
                        // Nobody is listening any more
                        let _ = child.start_kill();
                    }
                    buf.reserve(CHUNK_SIZE);
                }
                Err(e) => {
                    warn!("Reading ffmpeg output failed: {}", e);
                    break;
                }
            },
            _ = &mut kill_rx, if !killed => {
                warn!("ffmpeg did not stop within {:?}, killing", STOP_GRACE);
                let _ = child.start_kill();
                killed = true;
            }
        }
    }

    let status = child.wait().await;
    let stderr_text = stderr_task.await.unwrap_or_default();

    let failure = match status {
        _ if killed => Some("ffmpeg was killed after stop timeout".to_string()),
        Ok(status) if status.success() => None,
        Ok(status) => Some(
            stderr_text
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .map(|l| l.trim().to_string())
                .unwrap_or_else(|| format!("ffmpeg exited with {}", status)),
        ),
        Err(e) => Some(e.to_string()),
    };

    if let Some(reason) = failure {
        warn!("ffmpeg failed: {}", reason);
        let _ = events.send(RecorderEvent::Failed(reason)).await;
    } else {
        info!("ffmpeg finished");
    }
    let _ = events.send(RecorderEvent::Stopped).await;
}

async fn collect_stderr(mut stderr: ChildStderr) -> String {
    let mut buf = Vec::new();
    let _ = stderr.read_to_end(&mut buf).await;
    String::from_utf8_lossy(&buf).into_owned()
}
