//! Screen Recorder CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use screen_recorder::cli::{
    app::{load_merged_config, run_interactive, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use screen_recorder::domain::config::AppConfig;
use screen_recorder::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    // Diagnostics go to stderr, quiet unless RUST_LOG asks for more
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        api_url: cli.api_url,
        download_dir: cli.download_dir,
        notify: cli.notify.then_some(true),
        display: cli.display,
        system_audio: cli.no_system_audio.then_some(false),
    };

    let config = load_merged_config(cli_config).await;
    tracing::debug!(?config, "Configuration loaded");

    run_interactive(config).await
}
