use blockdoc::{RenderConfig, ValidateConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// API keys for authentication
    #[serde(default)]
    pub api_keys: HashSet<String>,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory holding `.docx` templates. Without one, only requests that
    /// name no template can be served.
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Template used when a request names none
    #[serde(default)]
    pub default_template: Option<String>,

    /// Maximum number of blocks per payload
    #[serde(default = "default_max_blocks")]
    pub max_blocks: Option<usize>,

    /// Maximum UTF-8 byte length of a single block's text
    #[serde(default = "default_max_text_bytes")]
    pub max_text_bytes: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            api_keys: HashSet::new(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            template_dir: None,
            default_template: None,
            max_blocks: default_max_blocks(),
            max_text_bytes: default_max_text_bytes(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.*` file and
    /// `BLOCKDOC_SERVER__*` environment variables, in increasing precedence.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(
                config::Environment::with_prefix("BLOCKDOC_SERVER")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("api_keys")
                    .try_parsing(true),
            );

        let mut config: ServerConfig = builder.build()?.try_deserialize()?;

        // Add demo API key if none configured (for development)
        if config.api_keys.is_empty() {
            tracing::warn!("No API keys configured, using demo key 'demo-key-12345'");
            config.api_keys.insert("demo-key-12345".to_string());
        }

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    /// Validator limits for incoming payloads.
    pub fn validate_config(&self) -> ValidateConfig {
        ValidateConfig {
            max_blocks: self.max_blocks,
            max_text_bytes: self.max_text_bytes,
            ..ValidateConfig::default()
        }
    }

    /// Template settings for the renderer.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            template_dir: self.template_dir.clone(),
            default_template: self.default_template.clone(),
            ..RenderConfig::default()
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_blocks() -> Option<usize> {
    Some(10_000)
}

fn default_max_text_bytes() -> Option<usize> {
    Some(1024 * 1024)
}
