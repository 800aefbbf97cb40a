//! Style name to style id resolution.
//!
//! Paragraphs reference styles by id (`Heading1`), callers name them by
//! display name (`Heading 1`). Word stores its built-in names in lower case
//! (`heading 1`), so names are matched case-insensitively.
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::DocxError;

/// Paragraph style ids keyed by lower-cased display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    by_name: HashMap<String, String>,
    ids: HashSet<String>,
}

impl StyleMap {
    /// Reads the paragraph styles out of a `styles.xml` part.
    pub fn parse(part: &str, xml: &[u8]) -> Result<Self, DocxError> {
        let mut reader = Reader::from_reader(xml);
        let mut map = StyleMap::default();
        let mut current: Option<String> = None;

        loop {
            let event = reader.read_event().map_err(|err| DocxError::Xml {
                part: part.to_string(),
                reason: err.to_string(),
            })?;
            match event {
                Event::Start(e) if e.local_name().as_ref() == b"style" => {
                    current = paragraph_style_id(&e);
                }
                Event::Empty(e) if e.local_name().as_ref() == b"style" => {
                    // A style without children has no name to map.
                    if let Some(id) = paragraph_style_id(&e) {
                        map.ids.insert(id);
                    }
                }
                Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"name" => {
                    if let (Some(id), Some(name)) = (current.as_ref(), attribute(&e, b"val")) {
                        map.insert(&name, id);
                    }
                }
                Event::End(e) if e.local_name().as_ref() == b"style" => {
                    if let Some(id) = current.take() {
                        map.ids.insert(id);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(map)
    }

    fn insert(&mut self, name: &str, id: &str) {
        self.by_name
            .entry(name.to_lowercase())
            .or_insert_with(|| id.to_string());
    }

    /// Style id for a display name.
    ///
    /// Unknown names fall back to the name with whitespace removed, which is
    /// how Word derives ids for new styles.
    pub fn resolve<'a>(&'a self, name: &'a str) -> Cow<'a, str> {
        if let Some(id) = self.by_name.get(&name.to_lowercase()) {
            return Cow::Borrowed(id.as_str());
        }
        if self.ids.contains(name) {
            return Cow::Borrowed(name);
        }
        Cow::Owned(name.split_whitespace().collect())
    }

    /// Whether the display name is defined by this style sheet.
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// The `w:styleId` of a paragraph style element. Other style types are
/// skipped so that e.g. a character style cannot shadow a paragraph style.
fn paragraph_style_id(e: &BytesStart<'_>) -> Option<String> {
    match attribute(e, b"type").as_deref() {
        None | Some("paragraph") => attribute(e, b"styleId"),
        Some(_) => None,
    }
}

fn attribute(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == local)
        .and_then(|attr| attr.unescape_value().ok().map(Cow::into_owned))
}
