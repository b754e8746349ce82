use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

/// Log file: `PERMAUDIT_LOG` > `~/.permaudit/permaudit.log`.
fn log_path() -> Option<PathBuf> {
    std::env::var_os("PERMAUDIT_LOG")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".permaudit").join("permaudit.log")))
}

/// Installs the global subscriber. Falls back to stderr when the log file
/// cannot be opened; `verbose` lowers that fallback to DEBUG.
pub fn init_tracing(verbose: bool) {
    let log_file = log_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(&path).ok()
    });

    let layer: Box<dyn Layer<_> + Send + Sync> = match log_file {
        Some(file) => tracing_subscriber::fmt::layer()
            .with_writer(file)
            .pretty()
            .with_ansi(false)
            .with_filter(LevelFilter::from_level(Level::DEBUG))
            .boxed(),
        None => {
            let level = if verbose { Level::DEBUG } else { Level::INFO };
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .pretty()
                .with_ansi(false)
                .with_filter(LevelFilter::from_level(level))
                .boxed()
        }
    };

    tracing_subscriber::registry().with(layer).init()
}
