//! Builds an `AppConfig` from layered sources:
//! `config/base.toml`, `config/{environment}.toml` and the process environment.
//!
//! Environment variables prefixed with `APP_` override file values, `__` separates nested keys:
//! `APP_NET_CONFIG__APP_PORT=9000`.
//! The MailerLite API key is read from `MAILERLITE_API_KEY`.

mod data;
mod error;

use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use tracing::info;

pub use data::{AppConfig, Environment, NetConfig, ProviderConfig};
pub use error::{ConfigError, ConfigResult};

/// Name of the environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "MAILERLITE_API_KEY";
/// Name of the environment variable selecting the config file to layer on top of `base.toml`.
pub const ENVIRONMENT_ENV: &str = "APP_ENVIRONMENT";

impl AppConfig {
    /// Loads the configuration from the `config` directory in the current working directory.
    pub fn load() -> ConfigResult<Self> {
        let config_dir = std::env::current_dir()?.join("config");
        let environment: Environment = std::env::var(ENVIRONMENT_ENV)
            .unwrap_or_else(|_| "local".into())
            .try_into()?;

        Self::load_from(&config_dir, environment)
    }

    pub fn load_from(config_dir: &Path, environment: Environment) -> ConfigResult<Self> {
        info!(
            "{:<20} - Initializing the configuration for: {}",
            "config",
            environment.as_ref()
        );

        let mut config: AppConfig = Self::figment(config_dir, &environment).extract()?;
        config.provider_config.drop_blank_api_key();

        Ok(config)
    }

    /// The layered `Figment` the configuration gets extracted from. Later sources take precedence.
    pub fn figment(config_dir: &Path, environment: &Environment) -> Figment {
        let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

        Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment_filename)))
            .merge(Env::prefixed("APP_").split("__"))
            .merge(
                Env::raw()
                    .only(&[API_KEY_ENV])
                    .map(|_| "provider_config.api_key".into()),
            )
    }
}
