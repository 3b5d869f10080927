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

//! End-to-end tests of the `/ping` and `/execute` surface with mocked
//! desktop effects.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{app, app_with, body_json, execute_request, MockEffects};
use nexus_core::ExecutionError;
use nexus_web::configuration::Configuration;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::ServiceExt;

fn ping_request() -> Request<Body> {
    Request::builder().uri("/ping").body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_each_action_type_dispatches_once() {
    let cases = [
        ("OPEN_URL", "https://example.com", "open_url"),
        ("LAUNCH_APP", "/usr/bin/steam", "launch_app"),
        ("COMMAND", "echo hello", "run_shell"),
        ("MACRO", "echo one && echo two", "run_shell"),
        ("KEYPRESS", "enter", "press_key"),
    ];

    for (action_type, value, effect) in cases {
        let effects = Arc::new(MockEffects::default());
        let body = json!({ "type": action_type, "value": value }).to_string();

        let response = app(effects.clone())
            .oneshot(execute_request(&body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{}", action_type);
        assert_eq!(body_json(response).await["success"], json!(true));
        assert_eq!(effects.calls(), vec![(effect, value.to_string())]);
    }
}

#[tokio::test]
async fn test_open_url_default_description() {
    let effects = Arc::new(MockEffects::default());

    let response = app(effects.clone())
        .oneshot(execute_request(
            r#"{"type":"OPEN_URL","value":"https://example.com"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "success": true, "message": "İşlem yapılıyor başarıyla çalıştırıldı" })
    );
    assert_eq!(
        effects.calls(),
        vec![("open_url", "https://example.com".to_string())]
    );
}

#[tokio::test]
async fn test_keypress_with_description() {
    let effects = Arc::new(MockEffects::default());

    let response = app(effects.clone())
        .oneshot(execute_request(
            r#"{"type":"KEYPRESS","value":"enter","description":"Enter tuşu"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "success": true, "message": "Enter tuşu başarıyla çalıştırıldı" })
    );
    assert_eq!(effects.calls(), vec![("press_key", "enter".to_string())]);
}

#[tokio::test]
async fn test_legacy_action_payload_body() {
    let effects = Arc::new(MockEffects::default());

    let response = app(effects.clone())
        .oneshot(execute_request(
            r#"{"action":"COMMAND","payload":"steam://rungameid/730"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        effects.calls(),
        vec![("run_shell", "steam://rungameid/730".to_string())]
    );
}

#[tokio::test]
async fn test_unknown_action_is_successful_noop() {
    let effects = Arc::new(MockEffects::default());

    let response = app(effects.clone())
        .oneshot(execute_request(r#"{"type":"FOO","value":"anything"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], json!(true));
    assert!(effects.calls().is_empty());
}

#[tokio::test]
async fn test_missing_or_invalid_body_is_400() {
    let bodies = ["", "not json", "null", r#"{"value":"no type"}"#];

    for body in bodies {
        let effects = Arc::new(MockEffects::default());

        let response = app(effects.clone())
            .oneshot(execute_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{:?}", body);
        let payload = body_json(response).await;
        assert!(payload["error"].is_string());
        assert!(payload.get("success").is_none());
        assert!(effects.calls().is_empty());
    }
}

#[tokio::test]
async fn test_execution_error_is_500_with_message() {
    fn missing_app() -> ExecutionError {
        ExecutionError::spawn(
            "/opt/missing/app",
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        )
    }

    let effects = Arc::new(MockEffects::default());
    *effects.error.lock().unwrap() = Some(missing_app);

    let response = app(effects.clone())
        .oneshot(execute_request(
            r#"{"type":"LAUNCH_APP","value":"/opt/missing/app"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "success": false, "error": missing_app().to_string() })
    );
    // Reported once, never retried
    assert_eq!(effects.calls().len(), 1);
}

#[tokio::test]
async fn test_ping_is_stateless() {
    let effects = Arc::new(MockEffects::default());
    let app = app(effects);

    let before = body_json(app.clone().oneshot(ping_request()).await.unwrap()).await;

    app.clone()
        .oneshot(execute_request(r#"{"type":"KEYPRESS","value":"space"}"#))
        .await
        .unwrap();
    app.clone()
        .oneshot(execute_request("garbage"))
        .await
        .unwrap();

    let response = app.oneshot(ping_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let after = body_json(response).await;

    assert_eq!(before, json!({ "status": "online", "pc_name": "desk-pc" }));
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_cross_origin_allowed() {
    let effects = Arc::new(MockEffects::default());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/execute")
        .header(header::ORIGIN, "http://192.168.1.34:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app(effects.clone()).oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(effects.calls().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_serialized_dispatch_runs_one_at_a_time() {
    let effects = Arc::new(MockEffects {
        delay: Some(Duration::from_millis(100)),
        ..Default::default()
    });
    let app = app(effects.clone());

    let start = Instant::now();
    let first = tokio::spawn(
        app.clone()
            .oneshot(execute_request(r#"{"type":"KEYPRESS","value":"a"}"#)),
    );
    let second = tokio::spawn(
        app.clone()
            .oneshot(execute_request(r#"{"type":"KEYPRESS","value":"b"}"#)),
    );

    assert_eq!(first.await.unwrap().unwrap().status(), StatusCode::OK);
    assert_eq!(second.await.unwrap().unwrap().status(), StatusCode::OK);

    assert!(start.elapsed() >= Duration::from_millis(200));
    assert_eq!(effects.calls().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_abandoned_request_keeps_dispatch_serialized() {
    let effects = Arc::new(MockEffects {
        delay: Some(Duration::from_millis(300)),
        ..Default::default()
    });
    let app = app(effects.clone());

    // The client hangs up while the first key press is still being injected
    let abandoned = tokio::time::timeout(
        Duration::from_millis(50),
        app.clone()
            .oneshot(execute_request(r#"{"type":"KEYPRESS","value":"a"}"#)),
    )
    .await;
    assert!(abandoned.is_err());

    let response = app
        .oneshot(execute_request(r#"{"type":"KEYPRESS","value":"b"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(effects.peak_in_flight(), 1);
    assert_eq!(
        effects.calls(),
        vec![("press_key", "a".to_string()), ("press_key", "b".to_string())]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_dispatch_when_not_serialized() {
    let effects = Arc::new(MockEffects {
        delay: Some(Duration::from_millis(300)),
        ..Default::default()
    });
    let mut config = Configuration::default();
    config.dispatch.serialize_actions = false;
    let app = app_with(effects.clone(), config);

    let start = Instant::now();
    let first = tokio::spawn(
        app.clone()
            .oneshot(execute_request(r#"{"type":"COMMAND","value":"one"}"#)),
    );
    let second = tokio::spawn(
        app.clone()
            .oneshot(execute_request(r#"{"type":"COMMAND","value":"two"}"#)),
    );

    assert_eq!(first.await.unwrap().unwrap().status(), StatusCode::OK);
    assert_eq!(second.await.unwrap().unwrap().status(), StatusCode::OK);

    assert!(start.elapsed() < Duration::from_millis(600));
    assert_eq!(effects.calls().len(), 2);
}
