//! Render endpoints.
//!
//! Both accept either the request envelope
//! `{"template": "memo.docx", "payload": {...}}` or a bare payload
//! `{"template": ..., "title": ..., "blocks": [...]}`. The body is parsed here rather than by
//! the `Json` extractor so malformed JSON gets the pipeline's own error code.

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use blockdoc::{process_request, Artifact, RawPayload, RenderRequest, ValidationError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Base64 render response
#[derive(Debug, Serialize, Deserialize)]
pub struct Base64Response {
    pub docx_base64: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: usize,
}

/// Render a payload and return the `.docx` as an attachment
pub async fn render_document(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> ServerResult<Response> {
    let request = parse_request(&body)?;
    let artifact = run_pipeline(state, request).await?;

    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    Ok((
        [
            (CONTENT_TYPE, artifact.content_type.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}

/// Render a payload and return the `.docx` base64-encoded in JSON
pub async fn render_base64(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> ServerResult<Json<Base64Response>> {
    let request = parse_request(&body)?;
    let artifact = run_pipeline(state, request).await?;

    Ok(Json(Base64Response {
        docx_base64: STANDARD.encode(&artifact.bytes),
        size_bytes: artifact.len(),
        file_name: artifact.file_name,
        content_type: artifact.content_type.to_string(),
    }))
}

/// A bare payload may still name its template at the top level.
#[derive(Deserialize)]
struct BareRequest {
    #[serde(default)]
    template: Option<String>,
    #[serde(flatten)]
    payload: RawPayload,
}

/// Accepts the envelope when the body has a `payload` key, otherwise treats
/// the whole body as the payload.
fn parse_request(body: &[u8]) -> Result<RenderRequest, ValidationError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(malformed)?;
    if value.get("payload").is_some() {
        serde_json::from_value(value).map_err(malformed)
    } else {
        let BareRequest { template, payload } =
            serde_json::from_value(value).map_err(malformed)?;
        Ok(RenderRequest { template, payload })
    }
}

fn malformed(err: serde_json::Error) -> ValidationError {
    ValidationError::MalformedPayload(err.to_string())
}

/// Rendering is CPU-bound and reads templates synchronously, so it runs on the
/// blocking pool.
async fn run_pipeline(state: Arc<ServerState>, request: RenderRequest) -> ServerResult<Artifact> {
    let outcome = tokio::task::spawn_blocking(move || {
        process_request(
            request,
            &state.validate_cfg,
            &state.render_cfg,
            state.templates.as_ref(),
        )
    })
    .await
    .map_err(|err| ServerError::Internal(format!("render task failed: {err}")))?;

    Ok(outcome?)
}
