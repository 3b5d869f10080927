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

use crate::{configuration::Configuration, AppState};
use axum::{
    body::{to_bytes, Body},
    http::Request,
    response::Response,
};
use nexus_core::{error::Result, ActionExecutor, DesktopEffects, ExecutionError};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Desktop effects that only remember what they were asked to do
#[derive(Default)]
pub struct RecordingEffects {
    calls: Mutex<Vec<(&'static str, String)>>,
    failure: Mutex<Option<String>>,
}

impl RecordingEffects {
    /// Make every following effect fail to start with `message`
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<(&'static str, String)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, effect: &'static str, arg: &str) -> Result<()> {
        self.calls.lock().unwrap().push((effect, arg.to_string()));
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(ExecutionError::InputUnavailable(message.clone())),
            None => Ok(()),
        }
    }
}

impl DesktopEffects for RecordingEffects {
    fn open_url(&self, url: &str) -> Result<()> {
        self.record("open_url", url)
    }

    fn launch_app(&self, target: &str) -> Result<()> {
        self.record("launch_app", target)
    }

    fn run_shell(&self, command_line: &str) -> Result<()> {
        self.record("run_shell", command_line)
    }

    fn press_key(&self, key: &str) -> Result<()> {
        self.record("press_key", key)
    }
}

pub fn app_state_with(effects: Arc<RecordingEffects>) -> AppState {
    AppState::new(
        ActionExecutor::new(effects),
        Configuration::default(),
        "test-pc".to_string(),
    )
}

pub fn create_test_app_state() -> (AppState, Arc<RecordingEffects>) {
    let effects = Arc::new(RecordingEffects::default());
    (app_state_with(effects.clone()), effects)
}

pub fn post_json(uri: &str, body: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?)
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    serde_json::from_slice(&bytes).expect("JSON response body")
}
