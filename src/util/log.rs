use directories::ProjectDirs;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE: &str = "groovelog.log";

fn data_dir() -> std::path::PathBuf {
    ProjectDirs::from("", "", "groovelog")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| std::path::PathBuf::from(".groovelog"))
}

/// Log to a file in the platform data directory. The terminal itself is
/// owned by the UI, so nothing is ever written to stdout or stderr.
pub fn initialize_logging() -> color_eyre::Result<()> {
    let directory = data_dir();
    std::fs::create_dir_all(&directory)?;
    let log_file = std::fs::File::create(directory.join(LOG_FILE))?;

    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        let level = std::env::var("GROOVELOG_LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string());
        EnvFilter::try_new(level)
    })?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
