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
    body::Body,
    http::{Request, Response},
    middleware::Next,
};
use std::time::Instant;
use tracing::info;

/// Middleware to log every request with its outcome and timing
pub async fn request_logging_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response<Body>, axum::http::StatusCode> {
    let start = Instant::now();

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let client = request
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string();

    info!("REQUEST: {} {} ({})", method, path, client);

    let response = next.run(request).await;

    info!(
        "RESPONSE: {} {} - {} in {:?}",
        method,
        path,
        response.status(),
        start.elapsed()
    );

    Ok(response)
}
