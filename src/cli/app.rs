//! Interactive recorder runner

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::application::ports::ConfigStore;
use crate::application::{
    RecordingCatalog, RecordingController, RecordingExporter, SessionError, SessionSnapshot,
};
use crate::domain::config::AppConfig;
use crate::domain::recording::SessionState;
use crate::infrastructure::{
    CaptureBackend, FanoutNotifier, FfmpegAudioGraph, FfmpegRecorder, FfmpegStreamSource,
    HttpRecordingStore, LocalFileSaver, NotifyRustNotifier, XdgConfigStore,
};

use super::commands::{UiCommand, HELP};
use super::console_notifier::ConsoleNotifier;
use super::input::spawn_input;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

type Notify = Arc<FanoutNotifier>;
type Store = Arc<HttpRecordingStore>;
type Controller =
    RecordingController<FfmpegStreamSource, FfmpegAudioGraph, FfmpegRecorder, Notify>;
type Exporter = RecordingExporter<Store, LocalFileSaver, Notify>;
type Catalog = RecordingCatalog<Store, Notify>;

/// Everything the prompt loop acts on
struct Ui {
    controller: Controller,
    exporter: Arc<Exporter>,
    catalog: Arc<Catalog>,
    api_url: String,
    presenter: Presenter,
    uploads: JoinSet<()>,
}

/// Run the interactive recorder until `quit`, end of input or Ctrl-C
pub async fn run_interactive(config: AppConfig) -> ExitCode {
    let mut ui = build_ui(&config);

    ui.presenter.info(&format!("Recordings service: {}", ui.api_url));
    ui.presenter.info(&format!(
        "Downloads go to: {}",
        config.download_dir_or_default().display()
    ));
    ui.presenter.output(HELP);

    // Catalog is fetched once up front; failures are already notified
    let catalog = Arc::clone(&ui.catalog);
    tokio::spawn(async move {
        if let Ok(list) = catalog.refresh().await {
            debug!(count = list.len(), "Initial catalog loaded");
        }
    });

    tokio::spawn(render_session(ui.controller.subscribe()));

    let mut input = spawn_input();
    while let Some(line) = input.recv().await {
        match line {
            Ok(UiCommand::Quit) => break,
            Ok(command) => ui.handle(command).await,
            Err(unknown) => ui.presenter.warn(&unknown.to_string()),
        }
    }

    ui.shutdown().await;
    ExitCode::from(EXIT_SUCCESS)
}

fn build_ui(config: &AppConfig) -> Ui {
    let mut notifier = FanoutNotifier::new().with(ConsoleNotifier::new());
    if config.notify_or_default() {
        notifier = notifier.with(NotifyRustNotifier::new());
    }
    let notifier = Arc::new(notifier);

    let mut backend = CaptureBackend::for_current_platform();
    if let Some(display) = &config.display {
        backend = backend.with_display(display.clone());
    }
    if !config.system_audio_or_default() {
        backend = backend.without_system_audio();
    }
    debug!(?backend, "Capture backend");

    let api_url = config.api_url_or_default();
    let store = Arc::new(HttpRecordingStore::new(api_url.clone()));
    let catalog = Arc::new(RecordingCatalog::new(
        Arc::clone(&store),
        Arc::clone(&notifier),
    ));
    let exporter = Arc::new(RecordingExporter::new(
        store,
        LocalFileSaver::new(config.download_dir_or_default()),
        Arc::clone(&notifier),
        Arc::clone(&catalog),
    ));
    let controller = RecordingController::new(
        FfmpegStreamSource::new(backend),
        FfmpegAudioGraph::new(),
        FfmpegRecorder::new(),
        notifier,
    );

    Ui {
        controller,
        exporter,
        catalog,
        api_url,
        presenter: Presenter::new(),
        uploads: JoinSet::new(),
    }
}

impl Ui {
    async fn handle(&mut self, command: UiCommand) {
        debug!(%command, "Command");
        match command {
            UiCommand::Start => match self.controller.start().await {
                Err(SessionError::InvalidState(_)) => {
                    self.presenter.warn("Already recording; stop first")
                }
                // Other failures have been notified by the session
                Ok(()) | Err(_) => {}
            },
            UiCommand::Stop => {
                if let Ok(false) = self.controller.stop().await {
                    self.presenter.warn("Not recording");
                }
            }
            UiCommand::Status => {
                let line = self.presenter.format_status(&self.controller.snapshot());
                self.presenter.output(&line);
            }
            UiCommand::Download => {
                let Some(recording) = self.controller.latest_recording().await else {
                    self.presenter.warn("No recording to download yet");
                    return;
                };
                let _ = self.exporter.download_locally(&recording).await;
            }
            UiCommand::Upload => {
                let Some(recording) = self.controller.latest_recording().await else {
                    self.presenter.warn("No recording to upload yet");
                    return;
                };
                self.presenter.info(&format!(
                    "Uploading {}...",
                    recording.human_readable_size()
                ));
                // Runs on its own so the prompt stays responsive
                let exporter = Arc::clone(&self.exporter);
                self.uploads.spawn(async move {
                    let _ = exporter.upload(&recording).await;
                });
            }
            UiCommand::List => self.list().await,
            UiCommand::Help => self.presenter.output(HELP),
            UiCommand::Quit => {}
        }
    }

    async fn list(&self) {
        let Ok(list) = self.catalog.refresh().await else {
            return;
        };
        if list.is_empty() {
            self.presenter.info("No recordings uploaded yet");
            return;
        }
        for record in &list {
            self.presenter.output(&self.presenter.format_recording(record));
            self.presenter
                .output(&format!("  {}", record.media_url(&self.api_url)));
        }
    }

    /// Stop an active recording and let pending uploads finish
    async fn shutdown(mut self) {
        if self.controller.state() == SessionState::Recording {
            self.presenter.info("Stopping active recording...");
            let _ = self.controller.stop().await;
        }
        if self.controller.state() == SessionState::Finalizing {
            self.controller.wait_finalized().await;
        }
        if !self.uploads.is_empty() {
            self.presenter.info("Waiting for uploads to finish...");
            while self.uploads.join_next().await.is_some() {}
        }
        info!("Exiting");
    }
}

/// Draw the timer while a session runs
async fn render_session(mut updates: watch::Receiver<SessionSnapshot>) {
    let mut presenter = Presenter::new();
    while updates.changed().await.is_ok() {
        let snapshot = *updates.borrow_and_update();
        presenter.render_session(&snapshot);
    }
    presenter.stop_spinner();
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    let env_config = AppConfig {
        api_url: env::var("API_URL").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
