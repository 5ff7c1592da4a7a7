mod settings;

use std::path::Path;

use config::{Config, ConfigError, Environment, File};

pub use settings::{BrokerSettings, LogSettings, PartialSettings, ServerSettings, Settings};

/// Prefix for environment overrides, e.g. `SOCKETY_SERVER_PORT=9000`.
pub const ENV_PREFIX: &str = "SOCKETY";

/// Loads the configuration from `config/default` (if present) and
/// `SOCKETY_*` environment variables, merged over the defaults.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from("config/default")
}

/// Same as [`load_config`] with an explicit file stem; the extension is
/// resolved by the `config` crate and the file may be absent.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    let name = path.as_ref().to_string_lossy();
    let builder = Config::builder()
        .add_source(File::with_name(&name).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("_"));

    let partial: PartialSettings = builder.build()?.try_deserialize()?;
    Ok(Settings::merge(partial))
}

#[cfg(test)]
mod tests;
