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

use axum::{
    body::{to_bytes, Body},
    http::Request,
    response::Response,
    Router,
};
use nexus_core::{error::Result, ActionExecutor, DesktopEffects, ExecutionError};
use nexus_web::{configuration::Configuration, routes::create_router, AppState};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records each effect call; optionally fails or stalls
#[derive(Default)]
pub struct MockEffects {
    pub calls: Mutex<Vec<(&'static str, String)>>,
    pub error: Mutex<Option<fn() -> ExecutionError>>,
    pub delay: Option<Duration>,
    pub in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

impl MockEffects {
    pub fn calls(&self) -> Vec<(&'static str, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// Most effects that were ever running at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, effect: &'static str, arg: &str) -> Result<()> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.calls.lock().unwrap().push((effect, arg.to_string()));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match *self.error.lock().unwrap() {
            Some(make_error) => Err(make_error()),
            None => Ok(()),
        }
    }
}

impl DesktopEffects for MockEffects {
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

pub fn app_with(effects: Arc<MockEffects>, config: Configuration) -> Router {
    let state = AppState::new(ActionExecutor::new(effects), config, "desk-pc".to_string());
    create_router(state)
}

pub fn app(effects: Arc<MockEffects>) -> Router {
    app_with(effects, Configuration::default())
}

pub fn execute_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/execute")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
