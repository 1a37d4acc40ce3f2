//! Log subscriber installation.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::CliError;

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "MATCHMAKER_LOG";

/// Install a stderr formatter filtered by [`LOG_ENV_VAR`], defaulting to
/// `info`.
///
/// Records emitted through the `log` facade by the library crates are
/// forwarded to the same subscriber.
///
/// # Errors
///
/// Returns [`CliError::Logging`] when a global subscriber is already set.
pub fn init_logging() -> Result<(), CliError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var(LOG_ENV_VAR)
                .from_env_lossy(),
        )
        .try_init()?;
    Ok(())
}
