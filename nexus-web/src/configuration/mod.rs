// Nexus Agent - A desktop remote-control agent built with Rust
// Copyright (C) 2025 Nexus Agent Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fmt, path::Path, str::FromStr};

pub mod defaults;
pub mod parser;

/// Main configuration structure containing all sub-configurations
///
/// # Example
///
/// ```rust,no_run
/// use nexus_web::configuration::Configuration;
///
/// let config = Configuration::load().expect("Failed to load configuration");
/// println!("Agent listening on: {}", config.bind_addr());
/// println!("Unknown actions: {}", config.dispatch.unknown_action);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Configuration {
    pub server: ServerConfig,
    pub dispatch: DispatchConfig,
    pub max_body_size: usize,
}

/// Server configuration for host and port settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// How `/execute` treats requests
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatchConfig {
    pub unknown_action: UnknownActionPolicy,
    /// Run one action at a time so key presses never interleave
    pub serialize_actions: bool,
}

/// What to do with an action type the agent does not know
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownActionPolicy {
    /// Acknowledge with success and do nothing
    Noop,
    /// Answer 400
    Reject,
}

impl UnknownActionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnknownActionPolicy::Noop => "noop",
            UnknownActionPolicy::Reject => "reject",
        }
    }
}

impl FromStr for UnknownActionPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "noop" => Ok(UnknownActionPolicy::Noop),
            "reject" => Ok(UnknownActionPolicy::Reject),
            other => bail!("Unknown action policy must be 'noop' or 'reject', got '{}'", other),
        }
    }
}

impl fmt::Display for UnknownActionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: defaults::default_host(),
                port: defaults::default_port(),
            },
            dispatch: DispatchConfig {
                unknown_action: defaults::default_unknown_action(),
                serialize_actions: defaults::default_serialize_actions(),
            },
            max_body_size: defaults::default_max_body_size(),
        }
    }
}

impl Configuration {
    /// Load configuration from environment variables and optional configuration files
    ///
    /// Configuration loading order (later sources override earlier ones):
    /// 1. Default values
    /// 2. /etc/nexus-agent.conf (if exists)
    /// 3. ~/.nexus-agent.conf (if exists)
    /// 4. ./nexus-agent.toml (if exists)
    /// 5. Environment variables
    pub fn load() -> Result<Self> {
        Self::load_with(None)
    }

    /// Like [`Configuration::load`], with one more file layered on top of
    /// the standard locations. That file must exist.
    pub fn load_with(extra_file: Option<&Path>) -> Result<Self> {
        let mut configs = Self::load_standard_files();

        if let Some(path) = extra_file {
            if !path.exists() {
                bail!("Configuration file not found: {}", path.display());
            }
            configs.push(parser::parse_toml_file(path)?);
        }

        Self::from_toml(&parser::merge_toml_configs(configs))
    }

    /// Build the configuration from merged TOML values and the environment
    pub fn from_toml(toml_config: &parser::TomlConfig) -> Result<Self> {
        let server = ServerConfig::load(toml_config)?;
        let dispatch = DispatchConfig::load(toml_config)?;

        let max_body_size = match env::var("NEXUS_MAX_BODY_SIZE") {
            Ok(value) => value
                .parse()
                .context("Invalid NEXUS_MAX_BODY_SIZE environment variable")?,
            Err(_) => toml_config
                .max_body_size
                .unwrap_or_else(defaults::default_max_body_size),
        };

        Ok(Self {
            server,
            dispatch,
            max_body_size,
        })
    }

    fn load_standard_files() -> Vec<parser::TomlConfig> {
        let mut configs = Vec::new();

        for path in parser::get_config_file_paths() {
            match parser::parse_toml_file(&path) {
                Ok(config) => configs.push(config),
                Err(e) => {
                    // Log the error but continue - a broken optional file should not stop the agent
                    tracing::warn!("Could not load config file {}: {:#}", path.display(), e);
                }
            }
        }

        configs
    }

    /// Convert the current configuration to TOML format
    pub fn to_toml(&self) -> Result<String> {
        let toml_config = parser::TomlConfig {
            server: Some(parser::TomlServerConfig {
                host: Some(self.server.host.clone()),
                port: Some(self.server.port),
            }),
            dispatch: Some(parser::TomlDispatchConfig {
                unknown_action: Some(self.dispatch.unknown_action.to_string()),
                serialize_actions: Some(self.dispatch.serialize_actions),
            }),
            max_body_size: Some(self.max_body_size),
        };

        toml::to_string_pretty(&toml_config).context("Failed to serialize configuration to TOML")
    }

    /// Get the server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn load(toml_config: &parser::TomlConfig) -> Result<Self> {
        let host = env::var("HOST")
            .ok()
            .or_else(|| toml_config.server.as_ref().and_then(|s| s.host.clone()))
            .unwrap_or_else(defaults::default_host);

        let port = match env::var("PORT") {
            Ok(value) => value.parse().context("Invalid PORT environment variable")?,
            Err(_) => toml_config
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or_else(defaults::default_port),
        };

        Ok(Self { host, port })
    }
}

impl DispatchConfig {
    fn load(toml_config: &parser::TomlConfig) -> Result<Self> {
        let unknown_action = match env::var("NEXUS_UNKNOWN_ACTION") {
            Ok(value) => value
                .parse()
                .context("Invalid NEXUS_UNKNOWN_ACTION environment variable")?,
            Err(_) => match toml_config
                .dispatch
                .as_ref()
                .and_then(|d| d.unknown_action.as_deref())
            {
                Some(value) => value.parse().context("Invalid unknown_action setting")?,
                None => defaults::default_unknown_action(),
            },
        };

        let serialize_actions = match env::var("NEXUS_SERIALIZE_ACTIONS") {
            Ok(value) => value
                .parse()
                .context("Invalid NEXUS_SERIALIZE_ACTIONS environment variable")?,
            Err(_) => toml_config
                .dispatch
                .as_ref()
                .and_then(|d| d.serialize_actions)
                .unwrap_or_else(defaults::default_serialize_actions),
        };

        Ok(Self {
            unknown_action,
            serialize_actions,
        })
    }
}
