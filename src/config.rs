//! YAML Configuration File Support for Blockdoc
//!
//! This module loads the pipeline configuration (validation limits and
//! template settings) from a single YAML file.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # Blockdoc Pipeline Configuration
//! version: "1.0"
//! name: "house documents"
//!
//! validate:
//!   version: 1
//!   max_blocks: 2000
//!   max_text_bytes: 262144
//!
//! render:
//!   version: 1
//!   template_dir: "templates"
//!   default_template: "house-style.docx"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use render::RenderConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use blocks::ValidateConfig;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration structure for the Blockdoc pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BlockdocConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Block validation configuration
    #[serde(default)]
    pub validate: ValidateYamlConfig,

    /// Rendering and template configuration
    #[serde(default)]
    pub render: RenderYamlConfig,
}

impl BlockdocConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: BlockdocConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.validate_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("validate: {err}")))?;
        self.render_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("render: {err}")))?;

        Ok(())
    }

    /// Validator settings described by this file.
    pub fn validate_config(&self) -> ValidateConfig {
        ValidateConfig {
            version: self.validate.version,
            max_blocks: self.validate.max_blocks,
            max_text_bytes: self.validate.max_text_bytes,
        }
    }

    /// Renderer settings described by this file.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            version: self.render.version,
            template_dir: self.render.template_dir.clone(),
            default_template: self.render.default_template.clone(),
        }
    }
}

impl Default for BlockdocConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            validate: ValidateYamlConfig::default(),
            render: RenderYamlConfig::default(),
        }
    }
}

/// Validation stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub max_blocks: Option<usize>,

    #[serde(default)]
    pub max_text_bytes: Option<usize>,
}

impl Default for ValidateYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_blocks: Some(10_000),
            max_text_bytes: Some(1024 * 1024), // 1MB
        }
    }
}

/// Render stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Directory holding `.docx` templates
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Template used when a request names none
    #[serde(default)]
    pub default_template: Option<String>,
}

impl Default for RenderYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            template_dir: None,
            default_template: None,
        }
    }
}

fn default_version() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
validate:
  max_blocks: 50
render:
  template_dir: "templates"
"#;

        let config = BlockdocConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.name, Some("test config".to_string()));
        assert_eq!(config.validate_config().max_blocks, Some(50));
        assert_eq!(config.validate_config().max_text_bytes, None);
        assert_eq!(
            config.render_config().template_dir,
            Some(PathBuf::from("templates"))
        );
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1"
render:
  default_template: "memo.docx"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = BlockdocConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.render_config().effective_template(None),
            Some("memo.docx")
        );
    }

    #[test]
    fn test_default_config() {
        let config = BlockdocConfig::default();
        assert_eq!(config.version, "1.0");
        assert!(config.name.is_none());
        assert_eq!(config.validate_config().max_blocks, Some(10_000));
        assert_eq!(config.render_config().version, 1);
    }

    #[test]
    fn test_unsupported_version() {
        let result = BlockdocConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(
            result,
            Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"
        ));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let yaml = r#"
version: "1.0"
validate:
  max_blocks: 0
"#;

        let result = BlockdocConfig::from_yaml(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("max_blocks"));
    }

    #[test]
    fn test_blank_default_template_rejected() {
        let yaml = r#"
version: "1.0"
render:
  default_template: " "
"#;

        let result = BlockdocConfig::from_yaml(yaml);
        assert!(matches!(result, Err(ConfigLoadError::Validation(_))));
    }
}
