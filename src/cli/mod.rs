//! CLI module
//!
//! Contains the logic behind the `robot-e2e` binary: suite runs and the
//! ad-hoc `view`/`call` commands. Both share configuration loading and
//! logging setup from this module.

pub mod call;
pub mod run;

use crate::config::{ConfigLoader, LoggingSettings, Settings};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Load settings without validating them
///
/// Configuration precedence:
/// 1. Command line arguments (applied by the caller)
/// 2. Environment variables
/// 3. Configuration file (from --config, ROBOT_E2E_CONFIG or default location)
/// 4. Default values
///
/// A file named by `--config` or ROBOT_E2E_CONFIG must exist.
pub fn load_settings(config: Option<&str>) -> crate::Result<Settings> {
    let config_path = match config {
        Some(path) => Some(PathBuf::from(path)),
        None => ConfigLoader::get_config_path()?,
    };

    ConfigLoader::new().load_unvalidated(config_path.as_deref())
}

/// Initialize the global subscriber. Logs go to stderr so stdout only
/// carries reports and call results.
///
/// Filter precedence:
/// 1. CLI --verbose flag -> debug
/// 2. RUST_LOG environment variable
/// 3. Config file logging.level
pub fn init_logging(logging: &LoggingSettings, verbose: bool) {
    let env_filter = if verbose || logging.verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    // A second init (tests, embedding) keeps the first subscriber
    let _ = if logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
}
