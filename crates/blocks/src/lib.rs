//! Blockdoc block validation layer.
//!
//! This is where untrusted payloads enter. We take a [`RawPayload`] straight
//! off the wire and either hand back a fully typed [`DocumentPayload`] or the
//! first schema violation we find. Nothing is rendered and nothing is
//! corrected: a payload is accepted whole or rejected whole.
//!
//! ## Rules, in the order they are checked
//!
//! 1. `blocks` must be present and non-empty, and within `max_blocks`.
//! 2. For each block, in index order:
//!    1. `type` must be one of heading, paragraph, bullet_list, note, raw
//!    2. `text` must be present (empty is fine), and within `max_text_bytes`
//!    3. `word_style`, when present, must be whitelisted
//!    4. headings need `level` in 1..=3; every other type must omit `level`
//!
//! The first violation wins. The only defaulting performed is the style
//! default for blocks that omit `word_style`.
//!
//! ## Example
//!
//! ```
//! use blocks::{validate, BlockKind, HeadingLevel, RawBlock, RawPayload, ValidateConfig};
//!
//! let raw = RawPayload {
//!     title: Some("Report".into()),
//!     document_type: None,
//!     blocks: Some(vec![
//!         RawBlock::new("heading", "Intro").with_level(1),
//!         RawBlock::new("bullet_list", "x\ny").with_style("GBM Dash Bullet"),
//!     ]),
//! };
//!
//! let payload = validate(raw, &ValidateConfig::default()).unwrap();
//! assert_eq!(payload.blocks[0].kind, BlockKind::Heading { level: HeadingLevel::One });
//! assert_eq!(payload.blocks[1].word_style, "GBM Dash Bullet");
//! ```
mod config;
mod error;
mod styles;
mod types;

pub use crate::config::{ConfigError, ValidateConfig};
pub use crate::error::ValidationError;
pub use crate::styles::{
    allowed_styles, default_style, is_allowed_style, BULLET_STYLE, NORMAL_STYLE, NOTE_STYLE,
};
pub use crate::types::{
    Block, BlockKind, BlockType, DocumentPayload, HeadingLevel, RawBlock, RawPayload,
};

/// Validate a raw payload and produce the normalized, typed payload.
pub fn validate(raw: RawPayload, cfg: &ValidateConfig) -> Result<DocumentPayload, ValidationError> {
    let RawPayload {
        title,
        document_type,
        blocks,
    } = raw;

    let raw_blocks = match blocks {
        Some(blocks) if !blocks.is_empty() => blocks,
        _ => return Err(ValidationError::EmptyBlockSequence),
    };

    if let Some(limit) = cfg.max_blocks {
        if raw_blocks.len() > limit {
            return Err(ValidationError::TooManyBlocks {
                count: raw_blocks.len(),
                limit,
            });
        }
    }

    let blocks = raw_blocks
        .into_iter()
        .enumerate()
        .map(|(index, raw)| validate_block(index, raw, cfg))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DocumentPayload {
        title,
        document_type,
        blocks,
    })
}

/// Parse a JSON document into a [`RawPayload`] and validate it.
///
/// Bodies that are not JSON, or whose fields have the wrong JSON type, fail
/// with [`ValidationError::MalformedPayload`].
pub fn validate_json(
    json: &str,
    cfg: &ValidateConfig,
) -> Result<DocumentPayload, ValidationError> {
    let raw: RawPayload = serde_json::from_str(json)
        .map_err(|err| ValidationError::MalformedPayload(err.to_string()))?;
    validate(raw, cfg)
}

/// Validate one block. `index` is its position in the payload and is
/// reported in every error.
pub fn validate_block(
    index: usize,
    raw: RawBlock,
    cfg: &ValidateConfig,
) -> Result<Block, ValidationError> {
    let RawBlock {
        kind,
        text,
        word_style,
        level,
    } = raw;

    let parsed = kind.as_deref().and_then(BlockType::parse);
    let block_type = match parsed {
        Some(block_type) => block_type,
        None => return Err(ValidationError::UnknownBlockType { index, found: kind }),
    };

    let text = text.ok_or(ValidationError::NullText { index })?;
    if let Some(limit) = cfg.max_text_bytes {
        if text.len() > limit {
            return Err(ValidationError::TextTooLarge {
                index,
                len: text.len(),
                limit,
            });
        }
    }

    if let Some(style) = word_style.as_deref() {
        if !is_allowed_style(style) {
            return Err(ValidationError::DisallowedStyle {
                index,
                style: style.to_string(),
                allowed: allowed_styles().map(str::to_string).collect(),
            });
        }
    }

    let kind = match (block_type, level) {
        (BlockType::Heading, Some(raw_level)) => {
            match raw_level.as_i64().and_then(|n| HeadingLevel::try_from(n).ok()) {
                Some(level) => BlockKind::Heading { level },
                None => {
                    return Err(ValidationError::MissingHeadingLevel {
                        index,
                        found: Some(raw_level),
                    })
                }
            }
        }
        (BlockType::Heading, None) => {
            return Err(ValidationError::MissingHeadingLevel { index, found: None })
        }
        (_, Some(level)) => return Err(ValidationError::UnexpectedLevel { index, level }),
        (BlockType::Paragraph, None) => BlockKind::Paragraph,
        (BlockType::BulletList, None) => BlockKind::BulletList,
        (BlockType::Note, None) => BlockKind::Note,
        (BlockType::Raw, None) => BlockKind::Raw,
    };

    // Heading styles come from the level; the requested style only had to be
    // whitelisted.
    let word_style = match kind {
        BlockKind::Heading { level } => level.style_name(),
        _ => match word_style {
            Some(style) => style,
            None => default_style(block_type)
                .unwrap_or(NORMAL_STYLE)
                .to_string(),
        },
    };

    Ok(Block {
        kind,
        text,
        word_style,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(blocks: Vec<RawBlock>) -> RawPayload {
        RawPayload {
            title: None,
            document_type: None,
            blocks: Some(blocks),
        }
    }

    fn check(blocks: Vec<RawBlock>) -> Result<DocumentPayload, ValidationError> {
        validate(payload(blocks), &ValidateConfig::default())
    }

    #[test]
    fn empty_or_missing_blocks_rejected() {
        assert_eq!(check(vec![]), Err(ValidationError::EmptyBlockSequence));
        let missing = RawPayload {
            title: Some("t".into()),
            ..Default::default()
        };
        assert_eq!(
            validate(missing, &ValidateConfig::default()),
            Err(ValidationError::EmptyBlockSequence)
        );
    }

    #[test]
    fn defaults_applied_per_type() {
        let out = check(vec![
            RawBlock::new("paragraph", "p"),
            RawBlock::new("bullet_list", "b"),
            RawBlock::new("note", "n"),
            RawBlock::new("raw", "r"),
        ])
        .expect("valid");
        let styles: Vec<&str> = out.blocks.iter().map(|b| b.word_style.as_str()).collect();
        assert_eq!(styles, ["Normal", "List Bullet", "GBM Note", "Normal"]);
    }

    #[test]
    fn disallowed_style_names_exact_index_and_whitelist() {
        let err = check(vec![
            RawBlock::new("paragraph", "ok"),
            RawBlock::new("note", "bad").with_style("Title"),
        ])
        .unwrap_err();
        match err {
            ValidationError::DisallowedStyle {
                index,
                style,
                allowed,
            } => {
                assert_eq!(index, 1);
                assert_eq!(style, "Title");
                let expected: Vec<String> = allowed_styles().map(String::from).collect();
                assert_eq!(allowed, expected);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bullet_lists_are_style_checked() {
        let err = check(vec![RawBlock::new("bullet_list", "a").with_style("Bullets")]).unwrap_err();
        assert_eq!(err.kind(), "DisallowedStyle");
    }

    #[test]
    fn heading_level_must_be_in_range() {
        for good in 1..=3 {
            let out = check(vec![RawBlock::new("heading", "h").with_level(good)]).expect("valid");
            assert_eq!(out.blocks[0].word_style, format!("Heading {good}"));
        }
        for bad in [0, 4, -1, 100] {
            assert_eq!(
                check(vec![RawBlock::new("heading", "h").with_level(bad)]),
                Err(ValidationError::MissingHeadingLevel {
                    index: 0,
                    found: Some(bad.into())
                })
            );
        }
        assert_eq!(
            check(vec![RawBlock::new("heading", "h")]),
            Err(ValidationError::MissingHeadingLevel {
                index: 0,
                found: None
            })
        );
    }

    #[test]
    fn non_integer_heading_levels_are_missing() {
        for level in ["2.5", "1.0", "1e20", "99999999999999999999"] {
            let json = format!(r#"{{"blocks": [{{"type": "heading", "text": "h", "level": {level}}}]}}"#);
            let err = validate_json(&json, &ValidateConfig::default()).unwrap_err();
            assert_eq!(err.kind(), "MissingHeadingLevel", "level {level}");
            assert_eq!(err.block_index(), Some(0));
        }
    }

    #[test]
    fn any_numeric_level_on_non_heading_is_unexpected() {
        for level in ["2.5", "1.0", "1e20", "99999999999999999999"] {
            let json = format!(r#"{{"blocks": [{{"type": "paragraph", "text": "p", "level": {level}}}]}}"#);
            let err = validate_json(&json, &ValidateConfig::default()).unwrap_err();
            assert_eq!(err.kind(), "UnexpectedLevel", "level {level}");
        }
    }

    #[test]
    fn level_on_non_heading_rejected_regardless_of_value() {
        for kind in ["paragraph", "bullet_list", "note", "raw"] {
            for level in [1, 2, 0, 9] {
                assert_eq!(
                    check(vec![RawBlock::new(kind, "x").with_level(level)]),
                    Err(ValidationError::UnexpectedLevel {
                        index: 0,
                        level: level.into()
                    }),
                    "{kind} with level {level}"
                );
            }
        }
    }

    #[test]
    fn heading_style_is_level_derived() {
        let out = check(vec![RawBlock::new("heading", "h")
            .with_level(3)
            .with_style("Heading 1")])
        .expect("valid");
        assert_eq!(out.blocks[0].word_style, "Heading 3");
    }

    #[test]
    fn heading_with_unlisted_style_still_rejected() {
        let err = check(vec![RawBlock::new("heading", "h")
            .with_level(1)
            .with_style("Heading 4")])
        .unwrap_err();
        assert_eq!(err.block_index(), Some(0));
        assert_eq!(err.kind(), "DisallowedStyle");
    }

    #[test]
    fn style_check_precedes_level_check() {
        let err = check(vec![RawBlock::new("paragraph", "x")
            .with_style("Nope")
            .with_level(2)])
        .unwrap_err();
        assert_eq!(err.kind(), "DisallowedStyle");

        let err = check(vec![RawBlock::new("heading", "x").with_style("Nope")]).unwrap_err();
        assert_eq!(err.kind(), "DisallowedStyle");
    }

    #[test]
    fn first_failing_block_wins() {
        let err = check(vec![
            RawBlock::new("paragraph", "fine"),
            RawBlock::new("note", "x").with_level(1),
            RawBlock::new("paragraph", "x").with_style("Nope"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnexpectedLevel {
                index: 1,
                level: 1.into()
            }
        );
    }

    #[test]
    fn null_text_is_distinct_from_empty_text() {
        let null = RawBlock {
            text: None,
            ..RawBlock::new("paragraph", "")
        };
        assert_eq!(check(vec![null]), Err(ValidationError::NullText { index: 0 }));

        let out = check(vec![RawBlock::new("paragraph", "")]).expect("empty text ok");
        assert_eq!(out.blocks[0].text, "");
    }

    #[test]
    fn unknown_type_rejected() {
        let err = check(vec![RawBlock::new("table", "x")]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownBlockType {
                index: 0,
                found: Some("table".into())
            }
        );
        let untyped = RawBlock {
            kind: None,
            ..RawBlock::new("paragraph", "x")
        };
        assert_eq!(
            check(vec![untyped]),
            Err(ValidationError::UnknownBlockType {
                index: 0,
                found: None
            })
        );
    }

    #[test]
    fn limits_enforced() {
        let cfg = ValidateConfig {
            max_blocks: Some(1),
            max_text_bytes: Some(4),
            ..Default::default()
        };
        let two = payload(vec![RawBlock::new("raw", "a"), RawBlock::new("raw", "b")]);
        assert_eq!(
            validate(two, &cfg),
            Err(ValidationError::TooManyBlocks { count: 2, limit: 1 })
        );
        let long = payload(vec![RawBlock::new("raw", "hello")]);
        assert_eq!(
            validate(long, &cfg),
            Err(ValidationError::TextTooLarge {
                index: 0,
                len: 5,
                limit: 4
            })
        );
    }

    #[test]
    fn text_preserved_verbatim() {
        let out = check(vec![RawBlock::new("raw", "  spaced \n")]).expect("valid");
        assert_eq!(out.blocks[0].text, "  spaced \n");
    }

    #[test]
    fn validate_json_reports_malformed_input() {
        let cfg = ValidateConfig::default();
        assert!(matches!(
            validate_json("{not json", &cfg),
            Err(ValidationError::MalformedPayload(_))
        ));
        assert!(matches!(
            validate_json(r#"{"blocks": [{"type": "heading", "text": "x", "level": "2"}]}"#, &cfg),
            Err(ValidationError::MalformedPayload(_))
        ));
        let ok = validate_json(
            r#"{"title": "T", "blocks": [{"type": "heading", "text": "x", "level": 2}]}"#,
            &cfg,
        )
        .expect("valid");
        assert_eq!(ok.blocks[0].heading_level(), Some(HeadingLevel::Two));
    }
}
