//! Error types produced by the render crate.
//!
//! Every variant here is caused by the environment (a missing or broken
//! template, a packaging failure), never by the payload. Payload problems are
//! [`blocks::ValidationError`] and are caught before rendering starts.
//!
//! | Error | Status | Description |
//! |-------|--------|-------------|
//! | [`TemplateNotFound`](RenderError::TemplateNotFound) | 404 | Name does not resolve in the template store |
//! | [`TemplateUnreadable`](RenderError::TemplateUnreadable) | 500 | Resolved, but the bytes could not be read |
//! | [`InvalidTemplate`](RenderError::InvalidTemplate) | 500 | Bytes are not a usable `.docx` package |
//! | [`Serialization`](RenderError::Serialization) | 500 | The finished document could not be packaged |
use docx::DocxError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RenderError {
    #[error("template not found: {name}")]
    TemplateNotFound { name: String },

    #[error("template {name} could not be read: {reason}")]
    TemplateUnreadable { name: String, reason: String },

    #[error("template {name} is not a valid document package: {reason}")]
    InvalidTemplate { name: String, reason: String },

    /// Packaging the finished document failed. No partial output exists.
    #[error("failed to serialize document: {0}")]
    Serialization(String),
}

impl RenderError {
    pub(crate) fn invalid_template(name: &str, err: DocxError) -> Self {
        RenderError::InvalidTemplate {
            name: name.to_string(),
            reason: err.to_string(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::TemplateNotFound { .. } => "TemplateNotFound",
            RenderError::TemplateUnreadable { .. } => "TemplateUnreadable",
            RenderError::InvalidTemplate { .. } => "InvalidTemplate",
            RenderError::Serialization(_) => "Serialization",
        }
    }

    /// Render failures are never the caller's fault.
    pub fn is_client_error(&self) -> bool {
        false
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            RenderError::TemplateNotFound { .. } => 404,
            _ => 500,
        }
    }
}

impl From<DocxError> for RenderError {
    fn from(err: DocxError) -> Self {
        RenderError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404_everything_else_to_500() {
        let missing = RenderError::TemplateNotFound {
            name: "letter.docx".into(),
        };
        assert_eq!(missing.http_status_code(), 404);
        assert_eq!(missing.kind(), "TemplateNotFound");
        assert_eq!(missing.to_string(), "template not found: letter.docx");

        let broken = RenderError::invalid_template("letter.docx", DocxError::MissingPart("word/document.xml".into()));
        assert_eq!(broken.http_status_code(), 500);
        assert!(!broken.is_client_error());
        assert!(broken.to_string().contains("word/document.xml"));
    }
}
