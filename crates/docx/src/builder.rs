//! The append-only document building interface.
//!
//! Renderers talk to a [`DocumentBuilder`] and never to a file format. The
//! real backend is [`DocxDocument`](crate::DocxDocument); [`RecordingBuilder`]
//! only remembers what was appended, which is all a test or a preview needs.
use crate::element::Element;

/// Sink for styled content elements, appended strictly in order.
pub trait DocumentBuilder {
    /// Append a heading at `level` (1 is the top-most heading style).
    fn append_heading(&mut self, text: &str, level: u8);

    /// Append one paragraph carrying the named style.
    fn append_styled(&mut self, text: &str, style: &str);
}

/// A builder that records the element sequence and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingBuilder {
    elements: Vec<Element>,
}

impl RecordingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}

impl DocumentBuilder for RecordingBuilder {
    fn append_heading(&mut self, text: &str, level: u8) {
        self.elements.push(Element::heading(text, level));
    }

    fn append_styled(&mut self, text: &str, style: &str) {
        self.elements.push(Element::styled(text, style));
    }
}
