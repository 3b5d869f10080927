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

use axum::{body::Bytes, extract::State, Json};
use nexus_core::{ActionRequest, Dispatch};
use serde::Serialize;
use serde_json::Value;

use crate::{configuration::UnknownActionPolicy, error::AppError, AppState};

#[derive(Debug, Serialize)]
pub struct ExecuteResponse {
    pub success: bool,
    pub message: String,
}

/// Parse the raw `/execute` body.
///
/// The body is read by hand so a missing `Content-Type` or an empty body
/// still produces our own JSON error instead of axum's rejection.
pub fn parse_action_request(body: &[u8]) -> Result<ActionRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::bad_request("no data"));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::bad_request(format!("invalid request body: {}", e)))?;
    if value.is_null() {
        return Err(AppError::bad_request("no data"));
    }

    serde_json::from_value(value)
        .map_err(|e| AppError::bad_request(format!("invalid request body: {}", e)))
}

/// Run one action on this machine
pub async fn execute_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ExecuteResponse>, AppError> {
    let request = parse_action_request(&body)?;

    if !request.action_type.is_known()
        && state.config.dispatch.unknown_action == UnknownActionPolicy::Reject
    {
        return Err(AppError::bad_request(format!(
            "unsupported action type: {}",
            request.action_type
        )));
    }

    let permit = state.dispatch_permit().await;

    let executor = state.executor.clone();
    let action = request.clone();
    // Held until the effect returns, even if the client goes away first
    let dispatch = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        executor.execute(&action)
    })
    .await
    .map_err(|e| {
        AppError::internal_server_error("action executor stopped unexpectedly")
            .with_details(e.to_string())
    })??;

    if let Dispatch::Ignored(action_type) = &dispatch {
        tracing::debug!(action = %action_type, "Acknowledged unknown action without effect");
    }

    Ok(Json(ExecuteResponse {
        success: true,
        message: request.success_message(),
    }))
}
