//! Blockdoc Render Layer
//!
//! Turns a validated [`DocumentPayload`] into a finished `.docx` document.
//! The payload has already passed [`blocks::validate`], so nothing here checks
//! styles, levels or types again.
//!
//! ## What we do here
//!
//! - **Resolve the template** - Look the name up in a [`TemplateStore`] and load
//!   it. This is the only I/O and it happens before any content is appended,
//!   so a missing template leaves no partial document behind.
//! - **Map blocks to elements** - [`render_blocks`] applies the fixed
//!   type → operation mapping against any [`docx::DocumentBuilder`].
//! - **Package** - [`render_artifact`] serializes the document into an
//!   [`Artifact`] ready to hand to a transport.
//!
//! ## Example
//!
//! ```
//! use blocks::{validate, RawBlock, RawPayload, ValidateConfig};
//! use render::{render_artifact, InMemoryTemplateStore};
//!
//! let payload = validate(
//!     RawPayload {
//!         title: Some("Report".into()),
//!         document_type: None,
//!         blocks: Some(vec![RawBlock::new("paragraph", "Hello")]),
//!     },
//!     &ValidateConfig::default(),
//! )
//! .unwrap();
//!
//! let artifact = render_artifact(&payload, None, &InMemoryTemplateStore::new()).unwrap();
//! assert!(artifact.file_name.starts_with("output-"));
//! assert!(artifact.file_name.ends_with(".docx"));
//! ```
use blocks::DocumentPayload;
use bytes::Bytes;
use docx::{DocxDocument, DOCX_CONTENT_TYPE};
use uuid::Uuid;

mod config;
mod error;
mod renderer;
mod template;

pub use crate::config::{ConfigError, RenderConfig};
pub use crate::error::RenderError;
pub use crate::renderer::render_blocks;
pub use crate::template::{DirTemplateStore, InMemoryTemplateStore, TemplateHandle, TemplateStore};

/// A finished document package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub bytes: Bytes,
    /// `output-<uuid>.docx`, unique per render.
    pub file_name: String,
    pub content_type: &'static str,
}

impl Artifact {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Seeds a document from `template` (or the blank document) and appends the
/// payload to it.
pub fn render(
    payload: &DocumentPayload,
    template: Option<&str>,
    store: &dyn TemplateStore,
) -> Result<DocxDocument, RenderError> {
    let mut document = open_document(template, store)?;
    render_blocks(payload, &mut document);
    Ok(document)
}

fn open_document(template: Option<&str>, store: &dyn TemplateStore) -> Result<DocxDocument, RenderError> {
    match template {
        Some(name) => {
            let handle = store.resolve(name)?;
            let bytes = store.load(&handle)?;
            DocxDocument::from_template_bytes(&bytes).map_err(|err| RenderError::invalid_template(name, err))
        }
        None => Ok(DocxDocument::blank()?),
    }
}

/// Renders and serializes in one step.
pub fn render_artifact(
    payload: &DocumentPayload,
    template: Option<&str>,
    store: &dyn TemplateStore,
) -> Result<Artifact, RenderError> {
    let document = render(payload, template, store)?;
    let bytes = document.to_bytes()?;
    Ok(Artifact {
        bytes: Bytes::from(bytes),
        file_name: format!("output-{}.docx", Uuid::new_v4()),
        content_type: DOCX_CONTENT_TYPE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocks::{validate, RawBlock, RawPayload, ValidateConfig};
    use docx::{DocumentBuilder, Element, Package};

    fn payload() -> DocumentPayload {
        validate(
            RawPayload {
                title: Some("Report".into()),
                document_type: Some("Memo".into()),
                blocks: Some(vec![
                    RawBlock::new("heading", "Intro").with_level(1),
                    RawBlock::new("bullet_list", "x\ny").with_style("GBM Dash Bullet"),
                    RawBlock::new("paragraph", "body"),
                ]),
            },
            &ValidateConfig::default(),
        )
        .expect("valid")
    }

    fn template_bytes(existing: &str) -> Vec<u8> {
        let mut doc = DocxDocument::blank().unwrap();
        doc.append_styled(existing, "Normal");
        doc.to_bytes().unwrap()
    }

    #[test]
    fn renders_without_template() {
        let doc = render(&payload(), None, &InMemoryTemplateStore::new()).unwrap();
        let styles: Vec<String> = doc.elements().iter().map(Element::style_name).collect();
        assert_eq!(
            styles,
            ["Heading 1", "GBM Note", "Heading 1", "GBM Dash Bullet", "GBM Dash Bullet", "Normal"]
        );
    }

    #[test]
    fn rendering_twice_gives_the_same_elements() {
        let store = InMemoryTemplateStore::new().with_template("t.docx", template_bytes("seed"));
        let first = render(&payload(), Some("t.docx"), &store).unwrap();
        let second = render(&payload(), Some("t.docx"), &store).unwrap();
        assert_eq!(first.elements(), second.elements());
    }

    #[test]
    fn missing_template_fails_before_rendering() {
        let err = render(&payload(), Some("nope.docx"), &InMemoryTemplateStore::new()).unwrap_err();
        assert_eq!(err, RenderError::TemplateNotFound { name: "nope.docx".into() });
        assert_eq!(err.http_status_code(), 404);
    }

    #[test]
    fn garbage_template_is_invalid() {
        let store = InMemoryTemplateStore::new().with_template("bad.docx", b"not a zip".to_vec());
        let err = render(&payload(), Some("bad.docx"), &store).unwrap_err();
        assert_eq!(err.kind(), "InvalidTemplate");
    }

    #[test]
    fn bodyless_template_is_invalid_before_rendering() {
        let bytes = Package::skeleton()
            .write_with(("word/document.xml", br#"<w:document xmlns:w="x"/>"#.as_slice()))
            .unwrap();
        let store = InMemoryTemplateStore::new().with_template("empty.docx", bytes);

        let err = render(&payload(), Some("empty.docx"), &store).unwrap_err();
        assert_eq!(err.kind(), "InvalidTemplate");
        assert!(!err.is_client_error());

        let err = render_artifact(&payload(), Some("empty.docx"), &store).unwrap_err();
        assert_eq!(err.kind(), "InvalidTemplate");
    }

    #[test]
    fn artifact_keeps_template_content_and_appends() {
        let store = InMemoryTemplateStore::new().with_template("t.docx", template_bytes("Letterhead"));
        let artifact = render_artifact(&payload(), Some("t.docx"), &store).unwrap();
        assert_eq!(artifact.content_type, DOCX_CONTENT_TYPE);

        let package = Package::read(&artifact.bytes).unwrap();
        let xml = String::from_utf8(package.part("word/document.xml").unwrap().to_vec()).unwrap();
        let seed = xml.find("Letterhead").unwrap();
        let title = xml.find(">Report<").unwrap();
        assert!(seed < title);
    }

    #[test]
    fn artifact_names_are_unique() {
        let store = InMemoryTemplateStore::new();
        let a = render_artifact(&payload(), None, &store).unwrap();
        let b = render_artifact(&payload(), None, &store).unwrap();
        assert_ne!(a.file_name, b.file_name);
        assert!(!a.is_empty());
    }
}
