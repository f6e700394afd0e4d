use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::Result;

fn filter(debug: bool) -> EnvFilter {
    let default = if debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Logs into `path`; the terminal belongs to the dashboard while it runs.
pub fn init_file(path: &Path, debug: bool) -> Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

pub fn init_stderr(debug: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
