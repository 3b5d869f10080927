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

//! Host platform detection and the per-platform process launchers.
//!
//! A launcher only builds commands; spawning is left to [`crate::spawn`].

use crate::error::{ExecutionError, Result};
use crate::keys::{KeyName, MacKey};
use std::fmt;
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    /// Linux and every other Unix-like host
    Unix,
}

impl Platform {
    /// Platform this binary was built for
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            _ => Platform::Unix,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Unix => "unix",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the OS commands behind each action
pub trait ProcessLauncher: Send + Sync + fmt::Debug {
    fn platform(&self) -> Platform;

    /// Open a URL with the default handler
    fn open_url(&self, url: &str) -> Command;

    /// Start an application or file
    fn launch(&self, target: &str) -> Command;

    /// True when `launch` builds a helper that exits once the target has
    /// been started, so its exit status tells whether the launch worked
    fn launch_hands_off(&self) -> bool {
        false
    }

    /// Run a command line through the platform shell
    fn shell(&self, command_line: &str) -> Command;

    /// Inject a single key press
    fn key_press(&self, key: &KeyName) -> Result<Command>;
}

/// Pick the launcher for a platform
pub fn launcher_for(platform: Platform) -> Box<dyn ProcessLauncher> {
    match platform {
        Platform::Windows => Box::new(WindowsLauncher),
        Platform::MacOs => Box::new(MacLauncher),
        Platform::Unix => Box::new(UnixLauncher),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsLauncher;

impl ProcessLauncher for WindowsLauncher {
    fn platform(&self) -> Platform {
        Platform::Windows
    }

    fn open_url(&self, url: &str) -> Command {
        let mut command = Command::new("rundll32");
        command.arg("url.dll,FileProtocolHandler").arg(url);
        command
    }

    // `start` hands the file to the shell the same way double-clicking it would
    fn launch(&self, target: &str) -> Command {
        cmd_line(&format!("start \"\" \"{}\"", target))
    }

    fn launch_hands_off(&self) -> bool {
        true
    }

    fn shell(&self, command_line: &str) -> Command {
        cmd_line(command_line)
    }

    fn key_press(&self, key: &KeyName) -> Result<Command> {
        let script = format!(
            "(New-Object -ComObject WScript.Shell).SendKeys({})",
            key.send_keys_expr()
        );
        let mut command = Command::new("powershell");
        command
            .args(["-NoProfile", "-NonInteractive", "-Command"])
            .arg(script);
        Ok(command)
    }
}

/// `cmd /S /C "<line>"`: cmd strips the outer quotes and runs the rest as typed
fn cmd_line(line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/S", "/C"]);
    raw_arg(&mut command, &format!("\"{}\"", line));
    command
}

// cmd.exe parses its own command line and does not understand the `\"`
// escaping `Command::arg` applies
#[cfg(windows)]
fn raw_arg(command: &mut Command, arg: &str) {
    use std::os::windows::process::CommandExt;
    command.raw_arg(arg);
}

#[cfg(not(windows))]
fn raw_arg(command: &mut Command, arg: &str) {
    command.arg(arg);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MacLauncher;

impl ProcessLauncher for MacLauncher {
    fn platform(&self) -> Platform {
        Platform::MacOs
    }

    fn open_url(&self, url: &str) -> Command {
        let mut command = Command::new("open");
        command.arg(url);
        command
    }

    fn launch(&self, target: &str) -> Command {
        let mut command = Command::new("open");
        // Bare names like "Safari" are looked up as applications
        if !target.contains('/') && !target.contains("://") && !target.ends_with(".app") {
            command.arg("-a");
        }
        command.arg(target);
        command
    }

    fn launch_hands_off(&self) -> bool {
        true
    }

    fn shell(&self, command_line: &str) -> Command {
        let mut command = Command::new("sh");
        command.arg("-c").arg(command_line);
        command
    }

    fn key_press(&self, key: &KeyName) -> Result<Command> {
        let statement = match key.mac_key() {
            Some(MacKey::Code(code)) => format!("key code {}", code),
            Some(MacKey::Keystroke(c)) => format!("keystroke \"{}\"", c),
            None => {
                return Err(ExecutionError::UnsupportedKey {
                    key: key.name().to_string(),
                    platform: self.platform().to_string(),
                })
            }
        };
        let mut command = Command::new("osascript");
        command
            .arg("-e")
            .arg(format!("tell application \"System Events\" to {}", statement));
        Ok(command)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnixLauncher;

impl ProcessLauncher for UnixLauncher {
    fn platform(&self) -> Platform {
        Platform::Unix
    }

    fn open_url(&self, url: &str) -> Command {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    }

    fn launch(&self, target: &str) -> Command {
        Command::new(target)
    }

    fn shell(&self, command_line: &str) -> Command {
        let mut command = Command::new("sh");
        command.arg("-c").arg(command_line);
        command
    }

    fn key_press(&self, key: &KeyName) -> Result<Command> {
        let mut command = Command::new("xdotool");
        command
            .args(["key", "--clearmodifiers"])
            .arg(key.xdotool_keysym());
        Ok(command)
    }
}
