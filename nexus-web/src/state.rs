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

use crate::configuration::Configuration;
use nexus_core::ActionExecutor;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone)]
pub struct AppState {
    pub executor: ActionExecutor,
    pub config: Configuration,
    pub host_name: String,
    dispatch_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(executor: ActionExecutor, config: Configuration, host_name: String) -> Self {
        Self {
            executor,
            config,
            host_name,
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Wait for our turn to dispatch, when actions are serialized.
    ///
    /// The permit must stay alive until the action's effect returns.
    /// Returns `None` when concurrent dispatch is allowed.
    pub async fn dispatch_permit(&self) -> Option<OwnedMutexGuard<()>> {
        if self.config.dispatch.serialize_actions {
            Some(self.dispatch_lock.clone().lock_owned().await)
        } else {
            None
        }
    }
}
