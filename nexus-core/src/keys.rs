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

//! Key names accepted by `KEYPRESS` actions.
//!
//! Each key resolves to the token understood by the key injection helper of
//! every supported platform: an xdotool keysym, a macOS System Events key
//! code (or keystroke) and a PowerShell expression passed to
//! `WScript.Shell.SendKeys`.

use crate::error::{ExecutionError, Result};

/// How System Events should type a key on macOS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacKey {
    Code(u16),
    Keystroke(char),
}

struct NamedKey {
    names: &'static [&'static str],
    xdotool: &'static str,
    mac: Option<MacKey>,
    send_keys: &'static str,
}

#[rustfmt::skip]
const NAMED_KEYS: &[NamedKey] = &[
    NamedKey { names: &["enter", "return"], xdotool: "Return", mac: Some(MacKey::Code(36)), send_keys: "'{ENTER}'" },
    NamedKey { names: &["tab"], xdotool: "Tab", mac: Some(MacKey::Code(48)), send_keys: "'{TAB}'" },
    NamedKey { names: &["escape", "esc"], xdotool: "Escape", mac: Some(MacKey::Code(53)), send_keys: "'{ESC}'" },
    NamedKey { names: &["backspace"], xdotool: "BackSpace", mac: Some(MacKey::Code(51)), send_keys: "'{BACKSPACE}'" },
    NamedKey { names: &["delete"], xdotool: "Delete", mac: Some(MacKey::Code(117)), send_keys: "'{DELETE}'" },
    NamedKey { names: &["up", "arrowup"], xdotool: "Up", mac: Some(MacKey::Code(126)), send_keys: "'{UP}'" },
    NamedKey { names: &["down", "arrowdown"], xdotool: "Down", mac: Some(MacKey::Code(125)), send_keys: "'{DOWN}'" },
    NamedKey { names: &["left", "arrowleft"], xdotool: "Left", mac: Some(MacKey::Code(123)), send_keys: "'{LEFT}'" },
    NamedKey { names: &["right", "arrowright"], xdotool: "Right", mac: Some(MacKey::Code(124)), send_keys: "'{RIGHT}'" },
    NamedKey { names: &["home"], xdotool: "Home", mac: Some(MacKey::Code(115)), send_keys: "'{HOME}'" },
    NamedKey { names: &["end"], xdotool: "End", mac: Some(MacKey::Code(119)), send_keys: "'{END}'" },
    NamedKey { names: &["pageup"], xdotool: "Prior", mac: Some(MacKey::Code(116)), send_keys: "'{PGUP}'" },
    NamedKey { names: &["pagedown"], xdotool: "Next", mac: Some(MacKey::Code(121)), send_keys: "'{PGDN}'" },
    NamedKey { names: &["insert"], xdotool: "Insert", mac: None, send_keys: "'{INSERT}'" },
    NamedKey { names: &["space"], xdotool: "space", mac: Some(MacKey::Code(49)), send_keys: "' '" },
    NamedKey { names: &["f1"], xdotool: "F1", mac: Some(MacKey::Code(122)), send_keys: "'{F1}'" },
    NamedKey { names: &["f2"], xdotool: "F2", mac: Some(MacKey::Code(120)), send_keys: "'{F2}'" },
    NamedKey { names: &["f3"], xdotool: "F3", mac: Some(MacKey::Code(99)), send_keys: "'{F3}'" },
    NamedKey { names: &["f4"], xdotool: "F4", mac: Some(MacKey::Code(118)), send_keys: "'{F4}'" },
    NamedKey { names: &["f5"], xdotool: "F5", mac: Some(MacKey::Code(96)), send_keys: "'{F5}'" },
    NamedKey { names: &["f6"], xdotool: "F6", mac: Some(MacKey::Code(97)), send_keys: "'{F6}'" },
    NamedKey { names: &["f7"], xdotool: "F7", mac: Some(MacKey::Code(98)), send_keys: "'{F7}'" },
    NamedKey { names: &["f8"], xdotool: "F8", mac: Some(MacKey::Code(100)), send_keys: "'{F8}'" },
    NamedKey { names: &["f9"], xdotool: "F9", mac: Some(MacKey::Code(101)), send_keys: "'{F9}'" },
    NamedKey { names: &["f10"], xdotool: "F10", mac: Some(MacKey::Code(109)), send_keys: "'{F10}'" },
    NamedKey { names: &["f11"], xdotool: "F11", mac: Some(MacKey::Code(103)), send_keys: "'{F11}'" },
    NamedKey { names: &["f12"], xdotool: "F12", mac: Some(MacKey::Code(111)), send_keys: "'{F12}'" },
    // Media keys have no System Events key code
    NamedKey { names: &["volumeup"], xdotool: "XF86AudioRaiseVolume", mac: None, send_keys: "[char]175" },
    NamedKey { names: &["volumedown"], xdotool: "XF86AudioLowerVolume", mac: None, send_keys: "[char]174" },
    NamedKey { names: &["mute"], xdotool: "XF86AudioMute", mac: None, send_keys: "[char]173" },
    NamedKey { names: &["playpause"], xdotool: "XF86AudioPlay", mac: None, send_keys: "[char]179" },
    NamedKey { names: &["nexttrack"], xdotool: "XF86AudioNext", mac: None, send_keys: "[char]176" },
    NamedKey { names: &["prevtrack"], xdotool: "XF86AudioPrev", mac: None, send_keys: "[char]177" },
];

/// A key resolved from a client-supplied name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyName {
    name: String,
    xdotool: String,
    mac: Option<MacKey>,
    send_keys: String,
}

impl KeyName {
    /// Resolve a key name (case-insensitive).
    ///
    /// Named keys come from a fixed table; a single ASCII letter or digit is
    /// accepted as itself. Anything else is rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let lower = input.trim().to_ascii_lowercase();

        if let Some(key) = NAMED_KEYS
            .iter()
            .find(|key| key.names.contains(&lower.as_str()))
        {
            return Ok(Self {
                name: key.names[0].to_string(),
                xdotool: key.xdotool.to_string(),
                mac: key.mac,
                send_keys: key.send_keys.to_string(),
            });
        }

        let mut chars = lower.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphanumeric() => Ok(Self {
                name: c.to_string(),
                xdotool: c.to_string(),
                mac: Some(MacKey::Keystroke(c)),
                send_keys: format!("'{}'", c),
            }),
            _ => Err(ExecutionError::UnknownKey(input.to_string())),
        }
    }

    /// Canonical lowercase name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn xdotool_keysym(&self) -> &str {
        &self.xdotool
    }

    pub fn mac_key(&self) -> Option<MacKey> {
        self.mac
    }

    pub fn send_keys_expr(&self) -> &str {
        &self.send_keys
    }
}
