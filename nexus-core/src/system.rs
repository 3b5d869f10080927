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
use crate::executor::DesktopEffects;
use crate::keys::KeyName;
use crate::platform::{launcher_for, Platform, ProcessLauncher};
use crate::spawn::{run_hand_off, run_helper, spawn_detached};

/// Desktop effects backed by the host OS
#[derive(Debug)]
pub struct SystemEffects {
    launcher: Box<dyn ProcessLauncher>,
}

impl SystemEffects {
    pub fn new(launcher: Box<dyn ProcessLauncher>) -> Self {
        Self { launcher }
    }

    /// Use the launcher for the platform we are running on
    pub fn detect() -> Self {
        Self::new(launcher_for(Platform::detect()))
    }

    pub fn platform(&self) -> Platform {
        self.launcher.platform()
    }
}

impl DesktopEffects for SystemEffects {
    fn open_url(&self, url: &str) -> Result<()> {
        spawn_detached(self.launcher.open_url(url)).map(|_| ())
    }

    fn launch_app(&self, target: &str) -> Result<()> {
        let command = self.launcher.launch(target);
        if self.launcher.launch_hands_off() {
            run_hand_off(command, target)
        } else {
            spawn_detached(command).map(|_| ())
        }
    }

    fn run_shell(&self, command_line: &str) -> Result<()> {
        spawn_detached(self.launcher.shell(command_line)).map(|_| ())
    }

    fn press_key(&self, key: &str) -> Result<()> {
        let key = KeyName::parse(key)?;
        run_helper(self.launcher.key_press(&key)?)
    }
}
