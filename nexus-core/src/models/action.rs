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

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used in response messages when the client sends no description
pub const DEFAULT_DESCRIPTION: &str = "İşlem yapılıyor";

/// Kind of side effect requested by the companion client
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionType {
    OpenUrl,
    LaunchApp,
    Command,
    Macro,
    Keypress,
    /// Any value the agent does not know how to perform
    Unknown(String),
}

impl ActionType {
    /// Wire representation, e.g. `OPEN_URL`
    pub fn as_str(&self) -> &str {
        match self {
            ActionType::OpenUrl => "OPEN_URL",
            ActionType::LaunchApp => "LAUNCH_APP",
            ActionType::Command => "COMMAND",
            ActionType::Macro => "MACRO",
            ActionType::Keypress => "KEYPRESS",
            ActionType::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ActionType::Unknown(_))
    }
}

impl From<String> for ActionType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "OPEN_URL" => ActionType::OpenUrl,
            "LAUNCH_APP" => ActionType::LaunchApp,
            "COMMAND" => ActionType::Command,
            "MACRO" => ActionType::Macro,
            "KEYPRESS" => ActionType::Keypress,
            _ => ActionType::Unknown(raw),
        }
    }
}

impl From<ActionType> for String {
    fn from(action_type: ActionType) -> Self {
        action_type.as_str().to_string()
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single action as posted to `/execute`.
///
/// Older companion builds send `{"action": ..., "payload": ...}`, so both
/// spellings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    #[serde(rename = "type", alias = "action")]
    pub action_type: ActionType,
    #[serde(default, alias = "payload")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ActionRequest {
    pub fn new(action_type: ActionType, value: impl Into<String>) -> Self {
        Self {
            action_type,
            value: value.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description shown to the user, falling back to the generic label
    pub fn description(&self) -> &str {
        match self.description.as_deref() {
            Some(description) if !description.trim().is_empty() => description,
            _ => DEFAULT_DESCRIPTION,
        }
    }

    /// Human-readable acknowledgement sent back on success
    pub fn success_message(&self) -> String {
        format!("{} başarıyla çalıştırıldı", self.description())
    }
}
