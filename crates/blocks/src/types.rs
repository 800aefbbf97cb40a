//! Core data model types for the blocks crate.
//!
//! Two layers live here: the permissive wire shapes that come straight out of
//! JSON ([`RawPayload`], [`RawBlock`]) and the strict, validated shapes the
//! renderer consumes ([`DocumentPayload`], [`Block`]).
//!
//! # Type Hierarchy
//!
//! ```text
//! RawPayload
//! ├── title: Option<String>
//! ├── document_type: Option<String>
//! └── blocks: Option<Vec<RawBlock>>      (alias: styled_blocks)
//!     ├── type: Option<String>
//!     ├── text: Option<String>
//!     ├── word_style: Option<String>
//!     └── level: Option<i64>
//!
//!         ↓ validate()
//!
//! DocumentPayload
//! ├── title: Option<String>
//! ├── document_type: Option<String>
//! └── blocks: Vec<Block>                 (never empty)
//!     ├── kind: BlockKind
//!     │   ├── Heading { level: HeadingLevel }
//!     │   ├── Paragraph
//!     │   ├── BulletList
//!     │   ├── Note
//!     │   └── Raw
//!     ├── text: String
//!     └── word_style: String             (default applied)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use blocks::{RawBlock, RawPayload};
//!
//! let raw: RawPayload = serde_json::from_str(
//!     r#"{"title": "Report", "blocks": [{"type": "paragraph", "text": "Hi"}]}"#,
//! ).unwrap();
//!
//! assert_eq!(raw.title.as_deref(), Some("Report"));
//! assert_eq!(raw.blocks.as_ref().map(Vec::len), Some(1));
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Top-level request body as it arrives on the wire.
///
/// Every field is optional here so that shape problems are reported by
/// [`validate`](crate::validate) with a precise diagnostic instead of a generic
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawPayload {
    /// Document title, rendered first when non-blank.
    #[serde(default)]
    pub title: Option<String>,

    /// Document type annotation, rendered second when non-blank.
    #[serde(default)]
    pub document_type: Option<String>,

    /// Ordered content blocks. Older clients send this as `styled_blocks`.
    #[serde(default, alias = "styled_blocks")]
    pub blocks: Option<Vec<RawBlock>>,
}

/// One block as it arrives on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawBlock {
    /// Block type name, e.g. `"heading"` or `"bullet_list"`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Block text. `null` and absent are rejected; `""` is fine.
    #[serde(default)]
    pub text: Option<String>,

    /// Requested style name. Must be whitelisted when present.
    #[serde(default)]
    pub word_style: Option<String>,

    /// Heading level. Required for headings, forbidden elsewhere. Kept as
    /// the JSON number it arrived as so `2.5` or `1e20` reach the level
    /// rules instead of failing to parse.
    #[serde(default)]
    pub level: Option<Number>,
}

impl RawBlock {
    /// Shorthand for building a raw block in code and tests.
    pub fn new(kind: &str, text: &str) -> Self {
        Self {
            kind: Some(kind.to_string()),
            text: Some(text.to_string()),
            word_style: None,
            level: None,
        }
    }

    pub fn with_style(mut self, style: &str) -> Self {
        self.word_style = Some(style.to_string());
        self
    }

    pub fn with_level(mut self, level: impl Into<Number>) -> Self {
        self.level = Some(level.into());
        self
    }
}

/// The closed set of block type names accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Heading,
    Paragraph,
    BulletList,
    Note,
    Raw,
}

impl BlockType {
    pub const ALL: [BlockType; 5] = [
        BlockType::Heading,
        BlockType::Paragraph,
        BlockType::BulletList,
        BlockType::Note,
        BlockType::Raw,
    ];

    /// Parses a wire type name. Matching is exact (case-sensitive).
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Heading => "heading",
            BlockType::Paragraph => "paragraph",
            BlockType::BulletList => "bullet_list",
            BlockType::Note => "note",
            BlockType::Raw => "raw",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heading depth. Only three levels are part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum HeadingLevel {
    One,
    Two,
    Three,
}

impl HeadingLevel {
    /// Numeric level, 1 through 3.
    pub fn get(self) -> u8 {
        match self {
            HeadingLevel::One => 1,
            HeadingLevel::Two => 2,
            HeadingLevel::Three => 3,
        }
    }

    /// Style name derived from the level, e.g. `"Heading 2"`.
    pub fn style_name(self) -> String {
        format!("Heading {}", self.get())
    }
}

impl TryFrom<i64> for HeadingLevel {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HeadingLevel::One),
            2 => Ok(HeadingLevel::Two),
            3 => Ok(HeadingLevel::Three),
            other => Err(other),
        }
    }
}

impl From<HeadingLevel> for i64 {
    fn from(level: HeadingLevel) -> Self {
        i64::from(level.get())
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// What a validated block renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Heading { level: HeadingLevel },
    Paragraph,
    BulletList,
    Note,
    Raw,
}

impl BlockKind {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Heading { .. } => BlockType::Heading,
            BlockKind::Paragraph => BlockType::Paragraph,
            BlockKind::BulletList => BlockType::BulletList,
            BlockKind::Note => BlockType::Note,
            BlockKind::Raw => BlockType::Raw,
        }
    }
}

/// A block that passed validation.
///
/// `word_style` always holds a whitelisted style name. For headings it is the
/// level-derived `"Heading {n}"` regardless of what the caller sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(flatten)]
    pub kind: BlockKind,
    pub text: String,
    pub word_style: String,
}

impl Block {
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Heading { level },
            text: text.into(),
            word_style: level.style_name(),
        }
    }

    pub fn heading_level(&self) -> Option<HeadingLevel> {
        match self.kind {
            BlockKind::Heading { level } => Some(level),
            _ => None,
        }
    }
}

/// A payload that passed validation: at least one block, every block
/// well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPayload {
    pub title: Option<String>,
    pub document_type: Option<String>,
    pub blocks: Vec<Block>,
}

impl DocumentPayload {
    /// Title with surrounding whitespace removed, or `None` when blank.
    pub fn trimmed_title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    /// Document type with surrounding whitespace removed, or `None` when blank.
    pub fn trimmed_document_type(&self) -> Option<&str> {
        non_blank(self.document_type.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_payload_accepts_legacy_field_name() {
        let raw: RawPayload = serde_json::from_str(
            r#"{"styled_blocks": [{"type": "raw", "text": "x", "extra": 1}]}"#,
        )
        .expect("parse");
        let blocks = raw.blocks.expect("blocks");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind.as_deref(), Some("raw"));
    }

    #[test]
    fn null_and_missing_fields_are_none() {
        let raw: RawBlock =
            serde_json::from_str(r#"{"type": "note", "text": null, "level": null}"#).unwrap();
        assert_eq!(raw.text, None);
        assert_eq!(raw.level, None);
        assert_eq!(raw.word_style, None);
    }

    #[test]
    fn block_type_parse_is_exact() {
        assert_eq!(BlockType::parse("bullet_list"), Some(BlockType::BulletList));
        assert_eq!(BlockType::parse("Heading"), None);
        assert_eq!(BlockType::parse(""), None);
    }

    #[test]
    fn heading_level_bounds() {
        assert_eq!(HeadingLevel::try_from(1), Ok(HeadingLevel::One));
        assert_eq!(HeadingLevel::try_from(3), Ok(HeadingLevel::Three));
        assert_eq!(HeadingLevel::try_from(0), Err(0));
        assert_eq!(HeadingLevel::try_from(4), Err(4));
        assert_eq!(HeadingLevel::Two.style_name(), "Heading 2");
    }

    #[test]
    fn trimmed_title_drops_blank_values() {
        let payload = DocumentPayload {
            title: Some("  My Title  ".into()),
            document_type: Some(" \t ".into()),
            blocks: vec![Block::heading(HeadingLevel::One, "x")],
        };
        assert_eq!(payload.trimmed_title(), Some("My Title"));
        assert_eq!(payload.trimmed_document_type(), None);
    }

    #[test]
    fn validated_block_serializes_flat() {
        let block = Block::heading(HeadingLevel::Two, "Intro");
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "heading");
        assert_eq!(json["level"], 2);
        assert_eq!(json["word_style"], "Heading 2");
    }
}
