//! Logging configuration using tracing

use crate::error::{Error, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "COMMANDER_LOG";

const DEFAULT_FILTER: &str = "commander_core=info,commander_server=info,warn";

/// Installs a stderr fmt subscriber filtered by `COMMANDER_LOG`.
///
/// ```bash
/// COMMANDER_LOG=debug commander-server
/// ```
pub fn init() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(|e| Error::Logging {
            message: e.to_string(),
        })?;

    tracing::debug!("logging initialised");
    Ok(())
}
