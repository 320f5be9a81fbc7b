//! Centralized bot configuration.
//!
//! This module provides strongly-typed configuration for the bot, loaded via
//! the `config` crate from `NUKKAD_`-prefixed environment variables. Nested
//! keys use `__`, e.g. `NUKKAD_CONNECTION__RECONNECT_DELAY_SECS=10` or
//! `NUKKAD_BUSINESS__HOURS__OPEN_HOUR=10`.

use nukkad_conversation::BusinessProfile;
use nukkad_gateway::{ConnectionConfig, RendererConfig};
use serde::Deserialize;
use std::path::PathBuf;

/// Bot configuration composed from library configs.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Connection lifecycle timing.
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Response rendering limits.
    #[serde(default)]
    pub renderer: RendererConfig,

    /// Business details shown in replies.
    #[serde(default)]
    pub business: BusinessProfile,

    /// File holding the transport credentials between runs.
    #[serde(default = "default_auth_state_path")]
    pub auth_state_path: PathBuf,
}

fn default_auth_state_path() -> PathBuf {
    PathBuf::from("auth_state.json")
}

impl BotConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_builder(config::Config::builder().add_source(
            config::Environment::with_prefix("NUKKAD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        ))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_defaults() {
        let config = BotConfig::from_builder(config::Config::builder()).expect("config");

        assert_eq!(config.connection, ConnectionConfig::default());
        assert_eq!(config.renderer.max_buttons, 3);
        assert_eq!(config.business, BusinessProfile::default());
        assert_eq!(config.auth_state_path, PathBuf::from("auth_state.json"));
    }

    #[test]
    fn nested_overrides_apply() {
        let builder = config::Config::builder()
            .set_override("connection.reconnect_delay_secs", 10)
            .expect("override")
            .set_override("business.name", "Test Traders")
            .expect("override")
            .set_override("business.hours.open_hour", 10)
            .expect("override");

        let config = BotConfig::from_builder(builder).expect("config");

        assert_eq!(config.connection.reconnect_delay_secs, 10);
        assert_eq!(config.connection.heartbeat_interval_secs, 30);
        assert_eq!(config.business.name, "Test Traders");
        assert_eq!(config.business.hours.open_hour, 10);
        assert_eq!(config.business.hours.close_hour, 21);
    }
}
