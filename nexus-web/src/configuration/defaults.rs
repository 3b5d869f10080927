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

//! Default configuration values for Nexus Agent
//!
//! Each function returns the default value for a specific configuration field.

use super::UnknownActionPolicy;

// Server defaults
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    8080
}

// Dispatch defaults
pub fn default_unknown_action() -> UnknownActionPolicy {
    UnknownActionPolicy::Noop
}

pub fn default_serialize_actions() -> bool {
    true
}

pub fn default_max_body_size() -> usize {
    65_536 // 64KB
}
