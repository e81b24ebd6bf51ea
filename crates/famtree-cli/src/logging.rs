//! Tracing setup.
//!
//! Logs go to the configured file when there is one. Otherwise they go to
//! stderr, except in the interactive view where they are dropped so the
//! terminal stays clean.

use std::fs::OpenOptions;
use std::sync::Mutex;

use famtree_core::config::DEFAULT_LOG_LEVEL;
use famtree_core::LoggingConfig;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub fn init(config: &LoggingConfig, interactive: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let file_layer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };
    let stderr_layer = (file_layer.is_none() && !interactive)
        .then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}
