//! WFC console entry point.

use std::{
    error::Error,
    path::{Path, PathBuf},
};

use clap::Parser;
use tokio::sync::mpsc;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use wfc_app::{Runtime, bootstrap};
use wfc_core::SystemClock;
use wfc_tui::{Config, ConsoleView, DEFAULT_CONFIG_PATH, TerminalSink, input};

/// Controls rarely queue; quit and redraw are idempotent.
const CONTROL_CHANNEL_CAPACITY: usize = 8;

/// Waiting-for-caller console
#[derive(Parser, Debug)]
#[command(name = "wfc")]
#[command(about = "Live node status console for a multi-node BBS")]
#[command(version)]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Activity log to follow (overrides `log_path`)
    #[arg(short, long)]
    log: Option<PathBuf>,

    /// Number of nodes to display (overrides `max_nodes`)
    #[arg(short = 'n', long)]
    max_nodes: Option<u32>,

    /// File receiving the console's own diagnostics
    #[arg(long, default_value = "wfc-trace.log")]
    trace_file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Log to a file: the terminal belongs to the console.
fn init_tracing(trace_file: &Path, level: &str) -> Result<WorkerGuard, Box<dyn Error>> {
    let dir = trace_file.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let name = trace_file
        .file_name()
        .ok_or_else(|| format!("trace file {} has no file name", trace_file.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy())
        .build(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _guard = init_tracing(&args.trace_file, &args.log_level)?;

    let config = Config::load(&args.config)?.with_overrides(args.log, args.max_nodes).validate()?;
    tracing::info!(
        config = %args.config.display(),
        log = %config.log_path.display(),
        max_nodes = config.max_nodes,
        "starting console"
    );

    let monitor_config = config.monitor_config();
    let (monitor, follower) =
        bootstrap(&config.log_path, &monitor_config, SystemClock, config.poll_interval()).await?;

    let view = ConsoleView::new(
        config.system_name.clone(),
        config.max_nodes,
        config.excluded_users.iter().cloned(),
    );
    let sink = TerminalSink::new(view)?;

    let (controls_tx, controls_rx) = mpsc::channel(CONTROL_CHANNEL_CAPACITY);
    let keys = tokio::spawn(async move {
        if let Err(e) = input::watch_keys(controls_tx).await {
            tracing::error!(error = %e, "key watcher failed");
        }
    });

    let result =
        Runtime::new(monitor, follower, sink, controls_rx, config.redraw_interval()).run().await;
    keys.abort();

    match result {
        Ok(monitor) => {
            tracing::info!(
                todays_calls = monitor.stats().calls().count,
                last_user = monitor.stats().last_logged_off().unwrap_or("None"),
                "console stopped"
            );
            Ok(())
        },
        Err(e) => {
            tracing::error!(error = %e, "console failed");
            Err(e.into())
        },
    }
}
