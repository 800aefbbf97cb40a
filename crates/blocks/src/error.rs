//! Error types produced by the blocks crate.
//!
//! Every variant is a schema violation: the caller sent something the
//! renderer cannot accept, and resending the same payload will fail the same
//! way. Each error carries enough detail (block index, offending value, the
//! allowed set) for the caller to fix the payload in a single retry.
//!
//! # Error Categories
//!
//! | Error | Description |
//! |-------|-------------|
//! | [`MalformedPayload`](ValidationError::MalformedPayload) | Body is not JSON of the expected shape |
//! | [`EmptyBlockSequence`](ValidationError::EmptyBlockSequence) | `blocks` missing or empty |
//! | [`TooManyBlocks`](ValidationError::TooManyBlocks) | Block count above the configured limit |
//! | [`UnknownBlockType`](ValidationError::UnknownBlockType) | `type` missing or not in the closed set |
//! | [`NullText`](ValidationError::NullText) | `text` missing or `null` |
//! | [`TextTooLarge`](ValidationError::TextTooLarge) | `text` above the configured byte limit |
//! | [`DisallowedStyle`](ValidationError::DisallowedStyle) | `word_style` not whitelisted |
//! | [`MissingHeadingLevel`](ValidationError::MissingHeadingLevel) | heading without a level in 1..=3 |
//! | [`UnexpectedLevel`](ValidationError::UnexpectedLevel) | `level` on a non-heading block |
//!
//! # Examples
//!
//! ```rust
//! use blocks::{validate, RawBlock, RawPayload, ValidateConfig, ValidationError};
//!
//! let raw = RawPayload {
//!     blocks: Some(vec![RawBlock::new("paragraph", "hi").with_style("Comic Sans")]),
//!     ..Default::default()
//! };
//!
//! match validate(raw, &ValidateConfig::default()) {
//!     Err(ValidationError::DisallowedStyle { index, allowed, .. }) => {
//!         assert_eq!(index, 0);
//!         assert!(allowed.contains(&"Normal".to_string()));
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
use serde_json::Number;
use thiserror::Error;

/// Errors that can occur while validating a block payload.
///
/// The enum is `#[non_exhaustive]`; callers matching on it should keep a
/// catch-all arm.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// The request body could not be parsed into a payload at all.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// `blocks` was absent or contained zero elements.
    #[error("payload must contain at least one block")]
    EmptyBlockSequence,

    /// More blocks than [`ValidateConfig::max_blocks`](crate::ValidateConfig::max_blocks) allows.
    #[error("payload has {count} blocks; at most {limit} are allowed")]
    TooManyBlocks { count: usize, limit: usize },

    /// `type` was absent or not one of heading, paragraph, bullet_list, note, raw.
    #[error("block {index}: unknown block type {found:?}; expected one of heading, paragraph, bullet_list, note, raw")]
    UnknownBlockType { index: usize, found: Option<String> },

    /// `text` was absent or `null`. An empty string is accepted.
    #[error("block {index}: text is required")]
    NullText { index: usize },

    /// `text` exceeds [`ValidateConfig::max_text_bytes`](crate::ValidateConfig::max_text_bytes).
    #[error("block {index}: text is {len} bytes; at most {limit} are allowed")]
    TextTooLarge {
        index: usize,
        len: usize,
        limit: usize,
    },

    /// `word_style` is not in the whitelist. `allowed` is the full sorted
    /// whitelist.
    #[error("block {index}: style {style:?} is not allowed; allowed styles: {}", .allowed.join(", "))]
    DisallowedStyle {
        index: usize,
        style: String,
        allowed: Vec<String>,
    },

    /// A heading block had no level, or a level outside 1..=3.
    #[error("block {index}: heading requires level 1, 2 or 3 (got {})", display_level(.found))]
    MissingHeadingLevel { index: usize, found: Option<Number> },

    /// A non-heading block carried a level.
    #[error("block {index}: level {level} is only valid on heading blocks")]
    UnexpectedLevel { index: usize, level: Number },
}

fn display_level(found: &Option<Number>) -> String {
    match found {
        Some(level) => level.to_string(),
        None => "none".to_string(),
    }
}

impl ValidationError {
    /// Stable machine-readable code for this error.
    ///
    /// ```rust
    /// use blocks::ValidationError;
    ///
    /// assert_eq!(ValidationError::EmptyBlockSequence.kind(), "EmptyBlockSequence");
    /// ```
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MalformedPayload(_) => "MalformedPayload",
            ValidationError::EmptyBlockSequence => "EmptyBlockSequence",
            ValidationError::TooManyBlocks { .. } => "TooManyBlocks",
            ValidationError::UnknownBlockType { .. } => "UnknownBlockType",
            ValidationError::NullText { .. } => "NullText",
            ValidationError::TextTooLarge { .. } => "TextTooLarge",
            ValidationError::DisallowedStyle { .. } => "DisallowedStyle",
            ValidationError::MissingHeadingLevel { .. } => "MissingHeadingLevel",
            ValidationError::UnexpectedLevel { .. } => "UnexpectedLevel",
        }
    }

    /// Index of the offending block, when the error concerns one block.
    pub fn block_index(&self) -> Option<usize> {
        match self {
            ValidationError::UnknownBlockType { index, .. }
            | ValidationError::NullText { index }
            | ValidationError::TextTooLarge { index, .. }
            | ValidationError::DisallowedStyle { index, .. }
            | ValidationError::MissingHeadingLevel { index, .. }
            | ValidationError::UnexpectedLevel { index, .. } => Some(*index),
            ValidationError::MalformedPayload(_)
            | ValidationError::EmptyBlockSequence
            | ValidationError::TooManyBlocks { .. } => None,
        }
    }

    /// Validation failures are always caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        true
    }

    /// Suggested HTTP status: 400 for unparseable bodies, 422 for schema
    /// violations.
    ///
    /// ```rust
    /// use blocks::ValidationError;
    ///
    /// assert_eq!(ValidationError::MalformedPayload("eof".into()).http_status_code(), 400);
    /// assert_eq!(ValidationError::NullText { index: 2 }.http_status_code(), 422);
    /// ```
    pub fn http_status_code(&self) -> u16 {
        match self {
            ValidationError::MalformedPayload(_) => 400,
            _ => 422,
        }
    }
}
