//! Configuration types for block validation.
//!
//! [`ValidateConfig`] carries the request-size limits that sit on top of the
//! fixed schema contract. The schema itself (block types, style whitelist,
//! level rules) is not configurable.
//!
//! # Quick Start
//!
//! ```rust
//! use blocks::ValidateConfig;
//!
//! let config = ValidateConfig::default();
//! config.validate().expect("default config is valid");
//! ```
//!
//! # Production Configuration
//!
//! ```rust
//! use blocks::ValidateConfig;
//!
//! let config = ValidateConfig {
//!     version: 1,
//!     max_blocks: Some(2_000),
//!     max_text_bytes: Some(256 * 1024),
//! };
//!
//! if let Err(e) = config.validate() {
//!     eprintln!("Configuration error: {}", e);
//!     std::process::exit(1);
//! }
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Runtime configuration for the validator.
///
/// # Serialization
///
/// ```json
/// {
///   "version": 1,
///   "max_blocks": 2000,
///   "max_text_bytes": 262144
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateConfig {
    /// Version of the validation configuration. Must be at least 1.
    ///
    /// Default: `1`
    pub version: u32,

    /// Maximum number of blocks accepted in one payload.
    ///
    /// Payloads above the limit fail with
    /// [`ValidationError::TooManyBlocks`](crate::ValidationError::TooManyBlocks)
    /// before any block is inspected.
    ///
    /// Default: `None` (unlimited)
    #[serde(default)]
    pub max_blocks: Option<usize>,

    /// Maximum byte length of a single block's `text`.
    ///
    /// Default: `None` (unlimited)
    #[serde(default)]
    pub max_text_bytes: Option<usize>,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_blocks: None,
            max_text_bytes: None,
        }
    }
}

/// Errors raised by [`ValidateConfig::validate`].
///
/// These are start-up problems, not request-time ones.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("validate config version must be >= 1")]
    InvalidVersion,

    /// A limit of zero would reject every payload.
    #[error("{field} must be greater than zero when set")]
    ZeroLimit { field: &'static str },
}

impl ValidateConfig {
    /// Checks internal consistency. Call once at start-up.
    ///
    /// ```rust
    /// use blocks::{ConfigError, ValidateConfig};
    ///
    /// let bad = ValidateConfig { max_blocks: Some(0), ..Default::default() };
    /// assert_eq!(bad.validate(), Err(ConfigError::ZeroLimit { field: "max_blocks" }));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 {
            return Err(ConfigError::InvalidVersion);
        }
        if self.max_blocks == Some(0) {
            return Err(ConfigError::ZeroLimit {
                field: "max_blocks",
            });
        }
        if self.max_text_bytes == Some(0) {
            return Err(ConfigError::ZeroLimit {
                field: "max_text_bytes",
            });
        }
        Ok(())
    }
}
