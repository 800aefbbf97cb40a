//! Workspace umbrella crate for Blockdoc.
//!
//! This crate stitches block validation and document rendering together so
//! callers can go from an untrusted payload to a finished `.docx` artifact with
//! a single call.

pub mod config;

pub use blocks::{
    BULLET_STYLE, Block, BlockKind, BlockType, DocumentPayload, HeadingLevel, NORMAL_STYLE,
    NOTE_STYLE, RawBlock, RawPayload, ValidateConfig, ValidationError, allowed_styles,
    default_style, is_allowed_style, validate, validate_json,
};
pub use docx::{
    DOCX_CONTENT_TYPE, DocumentBuilder, DocxDocument, DocxError, Element, ElementKind,
    RecordingBuilder,
};
pub use render::{
    Artifact, DirTemplateStore, InMemoryTemplateStore, RenderConfig, RenderError,
    TemplateHandle, TemplateStore, render, render_artifact, render_blocks,
};

use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while taking a payload through the pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PipelineError {
    #[error("validation failure: {0}")]
    Validation(#[from] ValidationError),

    #[error("render failure: {0}")]
    Render(#[from] RenderError),
}

impl PipelineError {
    /// Stable machine-readable code of the underlying error.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Validation(err) => err.kind(),
            PipelineError::Render(err) => err.kind(),
        }
    }

    /// True when the caller can fix the problem by changing the payload.
    pub fn is_client_error(&self) -> bool {
        match self {
            PipelineError::Validation(err) => err.is_client_error(),
            PipelineError::Render(err) => err.is_client_error(),
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            PipelineError::Validation(err) => err.http_status_code(),
            PipelineError::Render(err) => err.http_status_code(),
        }
    }
}

/// A render request as sent by clients: an optional template name plus the
/// payload itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderRequest {
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub payload: RawPayload,
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_validate(&self, latency: Duration, result: Result<(), ValidationError>);
    fn record_render(&self, latency: Duration, result: Result<(), RenderError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_validate(self, result: Result<(), ValidationError>) {
        self.recorder.record_validate(self.start.elapsed(), result);
    }

    fn record_render(self, result: Result<(), RenderError>) {
        self.recorder.record_render(self.start.elapsed(), result);
    }
}

fn validate_stage(raw: RawPayload, cfg: &ValidateConfig) -> Result<DocumentPayload, ValidationError> {
    let span = MetricsSpan::start();
    let result = validate(raw, cfg);
    if let Some(span) = span {
        span.record_validate(result.as_ref().map(|_| ()).map_err(Clone::clone));
    }
    result
}

fn render_stage(
    payload: &DocumentPayload,
    template: Option<&str>,
    store: &dyn TemplateStore,
) -> Result<Artifact, RenderError> {
    let span = MetricsSpan::start();
    let result = render_artifact(payload, template, store);
    if let Some(span) = span {
        span.record_render(result.as_ref().map(|_| ()).map_err(Clone::clone));
    }
    result
}

/// Validate a raw payload and render it into a `.docx` artifact.
///
/// Validation completes before the template is touched, so a bad payload
/// never costs a template load.
pub fn process_payload(
    raw: RawPayload,
    template: Option<&str>,
    cfg: &ValidateConfig,
    store: &dyn TemplateStore,
) -> Result<Artifact, PipelineError> {
    let start = Instant::now();
    let block_count = raw.blocks.as_ref().map_or(0, Vec::len);

    let outcome = validate_stage(raw, cfg)
        .map_err(PipelineError::from)
        .and_then(|payload| render_stage(&payload, template, store).map_err(PipelineError::from));

    let elapsed_micros = start.elapsed().as_micros();
    match &outcome {
        Ok(artifact) => info!(
            template = ?template,
            block_count,
            bytes = artifact.len(),
            file_name = %artifact.file_name,
            elapsed_micros,
            "pipeline_success"
        ),
        Err(err) => warn!(
            template = ?template,
            block_count,
            kind = err.kind(),
            block_index = ?block_index(err),
            error = %err,
            elapsed_micros,
            "pipeline_failure"
        ),
    }
    outcome
}

fn block_index(err: &PipelineError) -> Option<usize> {
    match err {
        PipelineError::Validation(err) => err.block_index(),
        PipelineError::Render(_) => None,
    }
}

/// [`process_payload`] for a JSON request body. Unparseable JSON fails with
/// [`ValidationError::MalformedPayload`].
pub fn process_json(
    json: &str,
    template: Option<&str>,
    cfg: &ValidateConfig,
    store: &dyn TemplateStore,
) -> Result<Artifact, PipelineError> {
    let raw = parse_json::<RawPayload>(json)?;
    process_payload(raw, template, cfg, store)
}

/// Runs a [`RenderRequest`], falling back to the configured default template
/// when the request names none.
pub fn process_request(
    request: RenderRequest,
    validate_cfg: &ValidateConfig,
    render_cfg: &RenderConfig,
    store: &dyn TemplateStore,
) -> Result<Artifact, PipelineError> {
    let RenderRequest { template, payload } = request;
    let template = render_cfg.effective_template(template.as_deref());
    process_payload(payload, template, validate_cfg, store)
}

/// Parse a JSON body, mapping failures to [`ValidationError::MalformedPayload`].
pub fn parse_json<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, ValidationError> {
    serde_json::from_str(json).map_err(|err| ValidationError::MalformedPayload(err.to_string()))
}

/// Validate and render into a [`RecordingBuilder`]: the element sequence a
/// real render would append, without a template and without packaging.
pub fn preview_payload(raw: RawPayload, cfg: &ValidateConfig) -> Result<Vec<Element>, PipelineError> {
    let payload = validate_stage(raw, cfg)?;
    let mut builder = RecordingBuilder::new();
    render_blocks(&payload, &mut builder);
    Ok(builder.into_elements())
}
