use serde::{Deserialize, Serialize};

/// How an element is styled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementKind {
    /// A heading; its style is `"Heading {level}"`.
    Heading { level: u8 },
    /// A paragraph carrying an explicitly named style.
    Styled { style: String },
}

/// One appended content element: a single paragraph in the output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    #[serde(flatten)]
    pub kind: ElementKind,
    pub text: String,
}

impl Element {
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Self {
            kind: ElementKind::Heading { level },
            text: text.into(),
        }
    }

    pub fn styled(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Styled {
                style: style.into(),
            },
            text: text.into(),
        }
    }

    /// Style name this element is written with.
    pub fn style_name(&self) -> String {
        match &self.kind {
            ElementKind::Heading { level } => format!("Heading {level}"),
            ElementKind::Styled { style } => style.clone(),
        }
    }

    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            ElementKind::Heading { level } => Some(level),
            ElementKind::Styled { .. } => None,
        }
    }
}
