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

use crate::error::Result;
use crate::models::{ActionRequest, ActionType};
use std::sync::Arc;
use tracing::{info, warn};

/// OS-level effects an action can trigger.
///
/// Implementations must be safe to call from several threads at once.
pub trait DesktopEffects: Send + Sync {
    fn open_url(&self, url: &str) -> Result<()>;
    fn launch_app(&self, target: &str) -> Result<()>;
    fn run_shell(&self, command_line: &str) -> Result<()>;
    fn press_key(&self, key: &str) -> Result<()>;
}

/// What the executor did with a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Performed(ActionType),
    /// Unknown action type, nothing was done
    Ignored(String),
}

/// Routes each action to exactly one desktop effect
#[derive(Clone)]
pub struct ActionExecutor {
    effects: Arc<dyn DesktopEffects>,
}

impl ActionExecutor {
    pub fn new(effects: Arc<dyn DesktopEffects>) -> Self {
        Self { effects }
    }

    pub fn execute(&self, request: &ActionRequest) -> Result<Dispatch> {
        info!(
            action = %request.action_type,
            value = %request.value,
            "Executing action"
        );

        let value = request.value.as_str();
        let outcome = match &request.action_type {
            ActionType::OpenUrl => self.effects.open_url(value),
            ActionType::LaunchApp => self.effects.launch_app(value),
            ActionType::Command | ActionType::Macro => self.effects.run_shell(value),
            ActionType::Keypress => self.effects.press_key(value),
            ActionType::Unknown(raw) => {
                warn!(action = %raw, "Ignoring unknown action type");
                return Ok(Dispatch::Ignored(raw.clone()));
            }
        };

        outcome.map(|()| Dispatch::Performed(request.action_type.clone()))
    }
}
