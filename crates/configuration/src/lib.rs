use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    CacheConfig, Config, DashboardConfig, LoggingConfig, ServerConfig, SourceConfig, SourceKind,
};

/// The prefix for environment overrides, e.g. `LEGUP__SOURCE__KIND=sheet`.
pub const ENV_PREFIX: &str = "LEGUP";

/// Loads the application configuration from the given TOML file.
///
/// The file is optional: every section has defaults, and environment variables
/// prefixed with `LEGUP__` are layered on top. The result is validated before
/// it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
