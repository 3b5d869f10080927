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

//! Process spawning primitives.
//!
//! [`spawn_detached`] is fire-and-forget: only a failure to start is
//! reported. [`run_helper`] waits for short-lived helpers such as the key
//! injection tools, whose exit status matters.

use crate::error::{ExecutionError, Result};
use std::io::ErrorKind;
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, warn};

fn program_name(command: &Command) -> String {
    command.get_program().to_string_lossy().into_owned()
}

/// Start `command` without tying its lifetime to the caller.
///
/// Returns the child pid. The child is reaped on a background thread so it
/// never lingers as a zombie; its exit status is only logged.
pub fn spawn_detached(mut command: Command) -> Result<u32> {
    let program = program_name(&command);

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    detach(&mut command);

    let mut child = command
        .spawn()
        .map_err(|e| ExecutionError::spawn(&program, e))?;
    let pid = child.id();
    debug!(pid, program = %program, "Spawned detached process");

    let reaper = thread::Builder::new()
        .name(format!("reap-{}", pid))
        .spawn(move || match child.wait() {
            Ok(status) => debug!(pid, program = %program, %status, "Detached process exited"),
            Err(e) => warn!(pid, program = %program, error = %e, "Failed to wait for detached process"),
        });
    if let Err(e) = reaper {
        warn!(pid, "Could not start reaper thread: {}", e);
    }

    Ok(pid)
}

/// Run a launch helper such as `open` or `cmd /C start` to completion.
///
/// These helpers exit as soon as the OS has started `target`, so a non-zero
/// status means the target could not be launched.
pub fn run_hand_off(mut command: Command, target: &str) -> Result<()> {
    let program = program_name(&command);

    command.stdin(Stdio::null()).stdout(Stdio::null());
    hand_off_stderr(&mut command);
    detach(&mut command);

    let output = command
        .output()
        .map_err(|e| ExecutionError::spawn(&program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let reason = if stderr.is_empty() {
            format!("`{}` exited with {}", program, output.status)
        } else {
            stderr
        };
        return Err(ExecutionError::LaunchFailed {
            target: target.to_string(),
            reason,
        });
    }

    debug!(program = %program, launch_target = %target, "Launch handed off");
    Ok(())
}

/// Run a short-lived helper to completion and check its exit status.
///
/// A helper that is not installed means the input subsystem is unavailable.
pub fn run_helper(mut command: Command) -> Result<()> {
    let program = program_name(&command);

    let output = command
        .stdin(Stdio::null())
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                ExecutionError::InputUnavailable(format!("`{}` is not installed", program))
            }
            _ => ExecutionError::spawn(&program, e),
        })?;

    if !output.status.success() {
        return Err(ExecutionError::HelperFailed {
            program,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    debug!(program = %program, "Helper finished");
    Ok(())
}

// A program started through `start` inherits the helper's handles and would
// keep a stderr pipe open for as long as it runs
#[cfg(windows)]
fn hand_off_stderr(command: &mut Command) {
    command.stderr(Stdio::null());
}

#[cfg(not(windows))]
fn hand_off_stderr(command: &mut Command) {
    command.stderr(Stdio::piped());
}

#[cfg(unix)]
fn detach(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    // Own process group, so a Ctrl-C aimed at the agent does not reach the child
    command.process_group(0);
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_command: &mut Command) {}
