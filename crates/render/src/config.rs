//! Configuration types for rendering.
//!
//! # Quick Start
//!
//! ```rust
//! use render::RenderConfig;
//!
//! let config = RenderConfig {
//!     template_dir: Some("templates".into()),
//!     default_template: Some("house-style.docx".into()),
//!     ..Default::default()
//! };
//! config.validate().expect("valid config");
//!
//! // An explicit request wins over the configured default.
//! assert_eq!(config.effective_template(Some("memo.docx")), Some("memo.docx"));
//! assert_eq!(config.effective_template(None), Some("house-style.docx"));
//! ```
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::template::{DirTemplateStore, InMemoryTemplateStore, TemplateStore};

/// Runtime configuration for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Version of the render configuration. Must be at least 1.
    ///
    /// Default: `1`
    #[serde(default = "default_version")]
    pub version: u32,

    /// Directory templates are looked up in.
    ///
    /// When unset no template name resolves, so only requests without a
    /// template (and without a default) can render.
    ///
    /// Default: `None`
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Template used when a request names none.
    ///
    /// Default: `None` (start from the built-in blank document)
    #[serde(default)]
    pub default_template: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            template_dir: None,
            default_template: None,
        }
    }
}

fn default_version() -> u32 {
    1
}

/// Errors raised by [`RenderConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("render config version must be >= 1")]
    InvalidVersion,

    #[error("default_template must not be blank")]
    BlankDefaultTemplate,
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 {
            return Err(ConfigError::InvalidVersion);
        }
        if let Some(name) = &self.default_template {
            if name.trim().is_empty() {
                return Err(ConfigError::BlankDefaultTemplate);
            }
        }
        Ok(())
    }

    /// The template a request should render with.
    pub fn effective_template<'a>(&'a self, requested: Option<&'a str>) -> Option<&'a str> {
        requested.or(self.default_template.as_deref())
    }

    /// Builds the template store this configuration describes.
    pub fn template_store(&self) -> Box<dyn TemplateStore> {
        match &self.template_dir {
            Some(dir) => Box::new(DirTemplateStore::new(dir.clone())),
            None => Box::new(InMemoryTemplateStore::new()),
        }
    }
}
