//! Inbound webhook endpoint.

use axum::Form;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::AppState;
use crate::services::UnknownService;
use crate::types::ProjectId;

/// Errors that end a hook request early.
#[derive(Debug, Error)]
pub enum HookError {
    /// No hook with this project and key.
    #[error("unknown hook")]
    UnknownHook,

    /// The hook is bound to a service this relay does not provide.
    #[error(transparent)]
    UnknownService(#[from] UnknownService),
}

impl IntoResponse for HookError {
    fn into_response(self) -> Response {
        let status = match &self {
            HookError::UnknownHook | HookError::UnknownService(_) => StatusCode::NOT_FOUND,
        };
        (status, self.to_string()).into_response()
    }
}

/// The form body webhook senders post.
#[derive(Debug, Deserialize)]
pub struct HookForm {
    pub payload: Option<String>,
}

/// Hook handler.
///
/// Formats the `payload` form field and hands every line to every channel
/// bound to the hook, in order.
///
/// # Response
///
/// - 200 OK once all lines have been handed to the sink, including when the
///   payload was absent or unusable and no lines were produced
/// - 404 Not Found for an unknown hook, or a hook bound to an unknown service
///
/// # Example
///
/// ```ignore
/// POST /h/notifico/s3cr3t HTTP/1.1
/// Content-Type: application/x-www-form-urlencoded
///
/// payload=%7B%22ref%22%3A...
///
/// HTTP/1.1 200 OK
/// ```
pub async fn hook_handler(
    State(app_state): State<AppState>,
    Path((project, key)): Path<(String, String)>,
    form: Result<Form<HookForm>, FormRejection>,
) -> Result<(StatusCode, &'static str), HookError> {
    let project = ProjectId::new(project);

    let Some(hook) = app_state.store().find_hook(&project, &key) else {
        debug!(project = %project, "Request for unknown hook");
        return Err(HookError::UnknownHook);
    };

    let payload = match form {
        Ok(Form(form)) => form.payload,
        Err(e) => {
            debug!(project = %project, error = %e, "Unreadable form body");
            None
        }
    };

    let config = app_state
        .store()
        .load_config(&project, hook.service_id)
        .unwrap_or_default();

    let lines = app_state
        .registry()
        .handle_request(hook.service_id, payload.as_deref(), &config)
        .await
        .inspect_err(|e| warn!(project = %project, error = %e, "Hook bound to unknown service"))?;

    let line_count = lines.len();
    let sink = app_state.sink();
    for line in lines {
        for target in &hook.channels {
            if let Err(e) = sink.deliver(target, &line) {
                warn!(
                    project = %project,
                    target = %target,
                    error = %e,
                    "Failed to deliver line"
                );
            }
        }
    }

    info!(
        project = %project,
        service_id = %hook.service_id,
        lines = line_count,
        channels = hook.channels.len(),
        "Handled hook"
    );
    Ok((StatusCode::OK, "OK"))
}
