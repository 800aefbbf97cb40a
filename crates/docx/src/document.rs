//! The WordprocessingML backend for [`DocumentBuilder`].
//!
//! A [`DocxDocument`] is seeded from either the built-in blank package or a
//! template package. Appended elements are kept as an ordered list and only
//! turned into XML at [`to_bytes`](DocxDocument::to_bytes) time, so the seed
//! package is never mutated.
//!
//! # Examples
//!
//! ```rust
//! use docx::{DocumentBuilder, DocxDocument};
//!
//! let mut doc = DocxDocument::blank().unwrap();
//! doc.append_heading("Report", 1);
//! doc.append_styled("First point", "List Bullet");
//!
//! let bytes = doc.to_bytes().unwrap();
//! assert_eq!(&bytes[..2], b"PK");
//! assert_eq!(doc.elements().len(), 2);
//! ```
use quick_xml::Writer;

use crate::builder::DocumentBuilder;
use crate::element::Element;
use crate::error::DocxError;
use crate::package::Package;
use crate::styles::StyleMap;
use crate::xml::{main_document_target, splice_into_body, write_paragraph};

const DEFAULT_DOCUMENT_PART: &str = "word/document.xml";

/// An in-memory document: a seed package plus the elements appended to it.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    package: Package,
    document_part: String,
    styles: StyleMap,
    elements: Vec<Element>,
}

impl DocxDocument {
    /// A document seeded from the built-in blank package.
    pub fn blank() -> Result<Self, DocxError> {
        Self::from_package(Package::skeleton())
    }

    /// A document seeded from the bytes of a `.docx` template.
    ///
    /// Existing body content, headers, footers, styles and every other part of
    /// the template are kept; new content is appended after the body content.
    pub fn from_template_bytes(bytes: &[u8]) -> Result<Self, DocxError> {
        Self::from_package(Package::read(bytes)?)
    }

    fn from_package(package: Package) -> Result<Self, DocxError> {
        let document_part = match package.part("_rels/.rels") {
            Some(rels) => main_document_target(rels)?,
            None => None,
        }
        .unwrap_or_else(|| DEFAULT_DOCUMENT_PART.to_string());

        let Some(main_part) = package.part(&document_part) else {
            return Err(DocxError::MissingPart(document_part));
        };
        // Reject a main part we could never append into now, not at `to_bytes`.
        splice_into_body(&document_part, main_part, b"")?;

        let styles_part = styles_part_for(&document_part);
        let styles = match package.part(&styles_part) {
            Some(xml) => StyleMap::parse(&styles_part, xml)?,
            None => StyleMap::default(),
        };

        Ok(Self {
            package,
            document_part,
            styles,
            elements: Vec::new(),
        })
    }

    /// Elements appended so far, in order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Style sheet of the seed package.
    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    /// Serializes the finished package. Either the whole package is produced
    /// or an error is returned.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocxError> {
        let mut fragment = Writer::new(Vec::new());
        for element in &self.elements {
            let style_name = element.style_name();
            let style_id = self.styles.resolve(&style_name);
            write_paragraph(&mut fragment, &style_id, &element.text)?;
        }
        let fragment = fragment.into_inner();

        let original = self
            .package
            .part(&self.document_part)
            .ok_or_else(|| DocxError::MissingPart(self.document_part.clone()))?;
        let document = splice_into_body(&self.document_part, original, &fragment)?;

        self.package
            .write_with((self.document_part.as_str(), document.as_slice()))
    }
}

impl DocumentBuilder for DocxDocument {
    fn append_heading(&mut self, text: &str, level: u8) {
        self.elements.push(Element::heading(text, level));
    }

    fn append_styled(&mut self, text: &str, style: &str) {
        self.elements.push(Element::styled(text, style));
    }
}

/// `word/document.xml` → `word/styles.xml`.
fn styles_part_for(document_part: &str) -> String {
    match document_part.rsplit_once('/') {
        Some((dir, _)) => format!("{dir}/styles.xml"),
        None => "styles.xml".to_string(),
    }
}
