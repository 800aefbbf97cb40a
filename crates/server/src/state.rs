use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use blockdoc::{RenderConfig, TemplateStore, ValidateConfig};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Validator limits derived from the configuration
    pub validate_cfg: ValidateConfig,

    /// Template settings derived from the configuration
    pub render_cfg: RenderConfig,

    /// Where named templates are looked up
    pub templates: Arc<dyn TemplateStore>,
}

impl ServerState {
    /// Create new server state, with templates served from the configured
    /// directory.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let templates: Arc<dyn TemplateStore> = Arc::from(config.render_config().template_store());
        Self::with_template_store(config, templates)
    }

    /// Create server state around an explicit template store.
    pub fn with_template_store(
        config: ServerConfig,
        templates: Arc<dyn TemplateStore>,
    ) -> ServerResult<Self> {
        let validate_cfg = config.validate_config();
        validate_cfg
            .validate()
            .map_err(|err| ServerError::Config(err.to_string()))?;

        let render_cfg = config.render_config();
        render_cfg
            .validate()
            .map_err(|err| ServerError::Config(err.to_string()))?;

        Ok(Self {
            config: Arc::new(config),
            validate_cfg,
            render_cfg,
            templates,
        })
    }

    /// Check if API key is valid
    pub fn is_valid_api_key(&self, key: &str) -> bool {
        self.config.api_keys.contains(key)
    }
}
