//! The configuration structs used to build the AppConfig, and their impls.
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::config::ConfigError;

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub provider_config: ProviderConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

/// MailerLite connection settings.
#[derive(Deserialize, Clone, Debug)]
pub struct ProviderConfig {
    /// Base URL of the API, e.g. `https://connect.mailerlite.com/api/`
    pub url: String,
    /// Subscriber group every new subscriber gets added to.
    pub group_id: String,
    /// Missing keys are reported per request, not at startup.
    #[serde(default)]
    pub api_key: Option<SecretString>,
    pub timeout_millis: u64,
}

// ###################################
// ->   IMPLs
// ###################################
impl ProviderConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_millis)
    }

    /// An empty (or whitespace only) key counts as no key at all.
    pub(super) fn drop_blank_api_key(&mut self) {
        if self
            .api_key
            .as_ref()
            .is_some_and(|key| key.expose_secret().trim().is_empty())
        {
            self.api_key = None;
        }
    }
}

// ###################################
// ->   TRY FROMs
// ###################################
impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail(value)),
        }
    }
}
