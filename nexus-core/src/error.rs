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

use thiserror::Error;

/// Failure to start an action on the host.
///
/// Only start-time failures are represented; a detached process that exits
/// badly later is never reported.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch `{target}`: {reason}")]
    LaunchFailed { target: String, reason: String },

    #[error("unrecognized key name: {0}")]
    UnknownKey(String),

    #[error("key `{key}` is not supported on {platform}")]
    UnsupportedKey { key: String, platform: String },

    #[error("input subsystem unavailable: {0}")]
    InputUnavailable(String),

    #[error("`{program}` exited with {status}: {stderr}")]
    HelperFailed {
        program: String,
        status: String,
        stderr: String,
    },
}

impl ExecutionError {
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExecutionError>;
