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

//! Host identification for `/ping` and the startup banner.

use std::{
    env, fs,
    net::{IpAddr, UdpSocket},
    process::Command,
};

/// Machine name reported to the companion client
pub fn host_name() -> String {
    host_name_from_env()
        .or_else(|| {
            fs::read_to_string("/etc/hostname")
                .ok()
                .and_then(non_empty)
        })
        .or_else(|| {
            Command::new("hostname")
                .output()
                .ok()
                .filter(|output| output.status.success())
                .and_then(|output| non_empty(String::from_utf8_lossy(&output.stdout).into_owned()))
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn host_name_from_env() -> Option<String> {
    ["COMPUTERNAME", "HOSTNAME"]
        .iter()
        .find_map(|var| env::var(var).ok().and_then(non_empty))
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Address other machines on the LAN can reach us at.
///
/// Connecting a UDP socket sends no packets; it only makes the OS pick the
/// outbound interface.
pub fn local_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket
        .local_addr()
        .ok()
        .map(|addr| addr.ip())
        .filter(|ip| !ip.is_unspecified())
}

/// URL the operator types into the companion client
pub fn connect_url(ip: IpAddr, port: u16) -> String {
    match ip {
        IpAddr::V4(ip) => format!("http://{}:{}", ip, port),
        IpAddr::V6(ip) => format!("http://[{}]:{}", ip, port),
    }
}
