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

//! TOML configuration parser for Nexus Agent
//!
//! This module reads TOML configuration files from standard locations and
//! merges them before environment variables are applied.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Raw TOML configuration structure that mirrors the main Configuration
/// but with all fields optional to support partial configuration files
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    #[serde(flatten)]
    pub server: Option<TomlServerConfig>,
    #[serde(flatten)]
    pub dispatch: Option<TomlDispatchConfig>,
    pub max_body_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlDispatchConfig {
    pub unknown_action: Option<String>,
    pub serialize_actions: Option<bool>,
}

/// Parse a TOML configuration file if it exists
pub fn parse_toml_file<P: AsRef<Path>>(path: P) -> Result<TomlConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

    let config: TomlConfig = toml::from_str(&content).with_context(|| {
        format!(
            "Failed to parse TOML configuration file: {}",
            path.display()
        )
    })?;

    Ok(config)
}

/// Get standard configuration file paths in order of precedence (lowest to highest)
pub fn get_config_file_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // System-wide configuration
    paths.push(PathBuf::from("/etc/nexus-agent.conf"));

    // User-specific configuration
    if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        paths.push(PathBuf::from(home).join(".nexus-agent.conf"));
    }

    // Current directory configuration (highest precedence)
    paths.push(PathBuf::from("./nexus-agent.toml"));

    paths
}

/// Merge multiple TOML configurations, with later configs taking precedence
pub fn merge_toml_configs(configs: Vec<TomlConfig>) -> TomlConfig {
    let mut merged = TomlConfig::default();

    for config in configs {
        if let Some(server) = config.server {
            let mut merged_server = merged.server.unwrap_or_default();
            if server.host.is_some() {
                merged_server.host = server.host;
            }
            if server.port.is_some() {
                merged_server.port = server.port;
            }
            merged.server = Some(merged_server);
        }

        if let Some(dispatch) = config.dispatch {
            let mut merged_dispatch = merged.dispatch.unwrap_or_default();
            if dispatch.unknown_action.is_some() {
                merged_dispatch.unknown_action = dispatch.unknown_action;
            }
            if dispatch.serialize_actions.is_some() {
                merged_dispatch.serialize_actions = dispatch.serialize_actions;
            }
            merged.dispatch = Some(merged_dispatch);
        }

        if config.max_body_size.is_some() {
            merged.max_body_size = config.max_body_size;
        }
    }

    merged
}
