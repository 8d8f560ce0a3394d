use crate::config::Logging;
use std::fs::File;
use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),
    #[error("failed to create log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to set global default subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

pub fn filter_directives(module_name: &str, level: &str) -> String {
    format!("{module_name}={level},common={level},tower_http={level}")
}

pub fn setup_logging(module_name: &str, config: &Logging) -> Result<(), LoggingError> {
    let directives = filter_directives(module_name, &config.level);

    let stdout_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_filter(EnvFilter::try_new(&directives)?);

    let file_log = match &config.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory)?;
            let file = File::create(directory.join("log.txt"))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_level(true)
                    .with_filter(EnvFilter::try_new(&directives)?),
            )
        }
        None => None,
    };

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(stdout_log)
            .with(file_log),
    )?;

    Ok(())
}
