//! Tracing subscriber setup for the command line front end

use std::fs::{File, OpenOptions};
use std::io;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LOG_ENV_VAR, LogConfig};

/// Build the filter: `VARIANT_PROVIDER_LOG` wins over the configured level
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_LEVEL))
}

/// Install the global subscriber
///
/// Logs go to stderr unless a file is configured, keeping stdout free for
/// command output. The returned guard flushes pending records on drop and
/// must be held until the process exits.
pub fn init_logging(config: &LogConfig) -> io::Result<WorkerGuard> {
    let (writer, guard) = match &config.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file: File = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(io::stderr()),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_writer(writer)
        .with_ansi(config.file.is_none());

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        return Err(io::Error::other(e));
    }

    Ok(guard)
}
