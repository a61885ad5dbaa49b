use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    Config, DashboardSettings, DataSettings, LoggingSettings, MapSettings, OutputFormat, ServerSettings,
};

/// The prefix of environment variables that override file settings,
/// e.g. `DASHBOARD__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "DASHBOARD";

/// Loads the application configuration.
///
/// Values are layered: built-in defaults, then the TOML file at `path` (which
/// may be absent), then `DASHBOARD__*` environment variables. The result is
/// validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}
