//! HTTP server for the relay.
//!
//! # Endpoints
//!
//! - `POST /h/{project}/{key}` - Accepts a webhook for a registered hook
//! - `GET /api/v1/services` - Lists supported services and their config schemas
//! - `GET /health` - Returns 200 if the server is running

use std::sync::Arc;

pub mod hook;
pub mod status;

pub use hook::{HookError, hook_handler};
pub use status::{health_handler, services_handler};

use crate::dispatch::{DispatchSink, HookStore};
use crate::services::Registry;

/// Shared application state.
///
/// Handlers receive it through axum's `State` extractor. Everything in it is
/// read-only; requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    registry: Registry,
    store: Arc<dyn HookStore>,
    sink: Arc<dyn DispatchSink>,
}

impl AppState {
    pub fn new(
        registry: Registry,
        store: impl HookStore + 'static,
        sink: impl DispatchSink + 'static,
    ) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                registry,
                store: Arc::new(store),
                sink: Arc::new(sink),
            }),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn store(&self) -> &dyn HookStore {
        self.inner.store.as_ref()
    }

    pub fn sink(&self) -> &dyn DispatchSink {
        self.inner.sink.as_ref()
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/h/{project}/{key}", post(hook_handler))
        .route("/api/v1/services", get(services_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tower::ServiceExt;

    use crate::dispatch::{
        ChannelSink, ChannelTarget, DispatchError, HookRecord, MemoryHookStore, Outbound,
    };
    use crate::message::FormattedLine;
    use crate::shortener::GitIoShortener;
    use crate::types::{HookConfig, ProjectId, ServiceId};

    /// A shortener that can never connect, so every link stays as sent.
    fn offline_registry() -> Registry {
        Registry::new(
            GitIoShortener::new()
                .with_endpoint("http://127.0.0.1:9")
                .with_timeout(Duration::from_millis(200)),
        )
    }

    fn hook(key: &str, service_id: u32, channels: &[&str]) -> HookRecord {
        HookRecord {
            project: ProjectId::new("proj"),
            key: key.to_string(),
            service_id: ServiceId(service_id),
            channels: channels
                .iter()
                .map(|c| ChannelTarget::new("libera", *c))
                .collect(),
        }
    }

    fn test_app() -> (axum::Router, UnboundedReceiver<Outbound>) {
        let mut store: MemoryHookStore = [
            hook("gh", 10, &["#proj", "#dev"]),
            hook("tea", 30, &["#proj"]),
            hook("old", 99, &["#proj"]),
        ]
        .into_iter()
        .collect();
        store.set_config(
            ProjectId::new("proj"),
            ServiceId(10),
            HookConfig {
                use_colors: false,
                ..HookConfig::default()
            },
        );

        let (sink, rx) = ChannelSink::new();
        let app = build_router(AppState::new(offline_registry(), store, sink));
        (app, rx)
    }

    fn form_request(uri: &str, payload: Option<&serde_json::Value>) -> Request<Body> {
        let body = match payload {
            Some(p) => format!("payload={}", url_encode(&p.to_string())),
            None => String::new(),
        };
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn url_encode(s: &str) -> String {
        s.bytes()
            .map(|b| match b {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    (b as char).to_string()
                }
                _ => format!("%{:02X}", b),
            })
            .collect()
    }

    fn drain(rx: &mut UnboundedReceiver<Outbound>) -> Vec<(String, String)> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push((msg.target.channel, msg.line.into_string()));
        }
        out
    }

    fn push_payload() -> serde_json::Value {
        json!({
            "ref": "refs/heads/main",
            "pusher": { "name": "alice" },
            "commits": [{
                "id": "abcdef0123",
                "message": "fix bug",
                "modified": ["a.py"]
            }],
            "repository": { "name": "proj", "owner": { "name": "org" } },
            "compare": "https://github.com/org/proj/compare/x...y"
        })
    }

    // ─── Health and catalogue ───

    #[tokio::test]
    async fn health_returns_200() {
        let (app, _rx) = test_app();

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn services_lists_catalogue() {
        let (app, _rx) = test_app();

        let request = Request::builder()
            .uri("/api/v1/services")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let ids: Vec<u64> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![10, 30]);
        assert_eq!(json[0]["config_schema"][1]["key"], "use_colors");
    }

    // ─── Hook endpoint ───

    #[tokio::test]
    async fn push_is_delivered_to_every_channel_in_order() {
        let (app, mut rx) = test_app();

        let response = app
            .oneshot(form_request("/h/proj/gh", Some(&push_payload())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let summary = "[proj] alice pushed 1 commit to main [+0/-0/±1] \
                       https://github.com/org/proj/compare/x...y";
        let commit = "[proj] alice abcdef0 - fix bug";
        assert_eq!(
            drain(&mut rx),
            vec![
                ("#proj".to_string(), summary.to_string()),
                ("#dev".to_string(), summary.to_string()),
                ("#proj".to_string(), commit.to_string()),
                ("#dev".to_string(), commit.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn missing_config_uses_defaults() {
        let (app, mut rx) = test_app();
        let payload = json!({
            "ref": "refs/heads/main",
            "compare_url": "https://gitea.example/c",
            "pusher": { "username": "bob" },
            "commits": [{ "id": "0123456789", "message": "hello" }],
            "repository": { "name": "proj" }
        });

        let response = app
            .oneshot(form_request("/h/proj/tea", Some(&payload)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let lines = drain(&mut rx);
        assert_eq!(lines.len(), 2);
        // Colours are on by default.
        assert!(lines[0].1.starts_with("\x03["));
    }

    #[tokio::test]
    async fn unknown_hook_is_404() {
        let (app, mut rx) = test_app();

        let response = app
            .oneshot(form_request("/h/proj/nope", Some(&push_payload())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn unknown_service_is_404() {
        let (app, mut rx) = test_app();

        let response = app
            .oneshot(form_request("/h/proj/old", Some(&push_payload())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"unknown hook service id 99");
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn missing_payload_is_accepted_silently() {
        let (app, mut rx) = test_app();

        let response = app.oneshot(form_request("/h/proj/gh", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn malformed_payload_is_accepted_silently() {
        let (app, mut rx) = test_app();

        let request = Request::builder()
            .method("POST")
            .uri("/h/proj/gh")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("payload=%7Bnot%20json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn wrong_content_type_is_treated_as_no_payload() {
        let (app, mut rx) = test_app();

        let request = Request::builder()
            .method("POST")
            .uri("/h/proj/gh")
            .header("content-type", "application/json")
            .body(Body::from(push_payload().to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn delivery_failures_do_not_fail_the_request() {
        struct Refusing;
        impl DispatchSink for Refusing {
            fn deliver(
                &self,
                _target: &ChannelTarget,
                _line: &FormattedLine,
            ) -> Result<(), DispatchError> {
                Err(DispatchError::Closed)
            }
        }

        let store: MemoryHookStore = [hook("gh", 10, &["#proj"])].into_iter().collect();
        let app = build_router(AppState::new(offline_registry(), store, Refusing));

        let response = app
            .oneshot(form_request("/h/proj/gh", Some(&push_payload())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn get_on_hook_is_not_allowed() {
        let (app, _rx) = test_app();

        let request = Request::builder()
            .uri("/h/proj/gh")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
