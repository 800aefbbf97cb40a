//! The style whitelist.
//!
//! Every style name a caller may request must appear here, and every name here
//! must be defined by any template the renderer is pointed at. The table is
//! built once per process and never changes afterwards.
use std::collections::BTreeSet;

use once_cell::sync::Lazy;

use crate::types::BlockType;

/// Style used for the document type annotation and the default for notes.
pub const NOTE_STYLE: &str = "GBM Note";

/// Default style for paragraph and raw blocks.
pub const NORMAL_STYLE: &str = "Normal";

/// Default style for bullet lists.
pub const BULLET_STYLE: &str = "List Bullet";

static STYLE_WHITELIST: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    [
        "GBM Body",
        "GBM Dash Bullet",
        NOTE_STYLE,
        "Heading 1",
        "Heading 2",
        "Heading 3",
        BULLET_STYLE,
        NORMAL_STYLE,
        "Quote",
    ]
    .into_iter()
    .collect()
});

/// Membership test against the whitelist. Matching is exact.
pub fn is_allowed_style(name: &str) -> bool {
    STYLE_WHITELIST.contains(name)
}

/// All whitelisted style names in sorted order.
pub fn allowed_styles() -> impl Iterator<Item = &'static str> {
    STYLE_WHITELIST.iter().copied()
}

/// Default style applied when a non-heading block omits `word_style`.
///
/// Headings return `None`: their style always comes from the level.
pub fn default_style(block_type: BlockType) -> Option<&'static str> {
    match block_type {
        BlockType::Heading => None,
        BlockType::Paragraph | BlockType::Raw => Some(NORMAL_STYLE),
        BlockType::BulletList => Some(BULLET_STYLE),
        BlockType::Note => Some(NOTE_STYLE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitelist_is_sorted_and_contains_defaults() {
        let names: Vec<_> = allowed_styles().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);

        for block_type in BlockType::ALL {
            if let Some(style) = default_style(block_type) {
                assert!(is_allowed_style(style), "{style} must be whitelisted");
            }
        }
    }

    #[test]
    fn level_styles_are_whitelisted() {
        for level in 1..=3 {
            assert!(is_allowed_style(&format!("Heading {level}")));
        }
        assert!(!is_allowed_style("Heading 4"));
        assert!(!is_allowed_style("normal"));
    }
}
