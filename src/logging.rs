//! `tracing` subscriber setup for the binary.
//!
//! Logs go to stderr so they never interleave with rendered screens on stdout.
//! `RUST_LOG`, when set, wins over the configured level.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::GeneralConfig;
use crate::error::{Result, ScanError};

/// Install the global subscriber described by `config`
pub fn init_tracing(config: &GeneralConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match config.log_format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        "pretty" => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        "compact" => registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
        other => {
            return Err(ScanError::Config(format!(
                "unknown log format '{other}', expected 'compact', 'pretty' or 'json'"
            )));
        }
    };

    installed.map_err(|e| ScanError::Config(format!("failed to initialize tracing: {e}")))
}
