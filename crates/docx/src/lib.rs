//! Blockdoc DOCX Backend
//!
//! An append-only WordprocessingML writer. Content is appended as styled
//! paragraphs through the [`DocumentBuilder`] trait and written out as a
//! complete `.docx` package.
//!
//! ## What we do here
//!
//! - **Seed** - Start from a built-in blank package or from a template's bytes.
//!   Template parts (styles, headers, footers, numbering, media) are carried over
//!   untouched.
//! - **Append** - Headings and styled paragraphs go after any existing body
//!   content, before the final section properties.
//! - **Resolve styles** - Display names such as `Heading 1` are mapped to the
//!   style ids the package actually uses.
//!
//! We do not parse or edit existing content. Tables, images, inline formatting
//! and numbering restarts are out of reach by construction.
//!
//! ## Example
//!
//! ```
//! use docx::{DocumentBuilder, DocxDocument, RecordingBuilder};
//!
//! fn outline<B: DocumentBuilder>(builder: &mut B) {
//!     builder.append_heading("Summary", 1);
//!     builder.append_styled("Everything went fine.", "Normal");
//! }
//!
//! let mut recorded = RecordingBuilder::new();
//! outline(&mut recorded);
//! assert_eq!(recorded.elements()[0].style_name(), "Heading 1");
//!
//! let mut doc = DocxDocument::blank().unwrap();
//! outline(&mut doc);
//! assert!(!doc.to_bytes().unwrap().is_empty());
//! ```
mod builder;
mod document;
mod element;
mod error;
mod package;
mod skeleton;
mod styles;
mod xml;

pub use crate::builder::{DocumentBuilder, RecordingBuilder};
pub use crate::document::DocxDocument;
pub use crate::element::{Element, ElementKind};
pub use crate::error::DocxError;
pub use crate::package::Package;
pub use crate::styles::StyleMap;

/// MIME type of a WordprocessingML package.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
