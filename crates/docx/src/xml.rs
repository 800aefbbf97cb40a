//! WordprocessingML fragments and the body splice.
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::DocxError;

const MAIN_DOCUMENT_REL: &[u8] =
    b"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

fn xml_error(part: &str, err: impl std::fmt::Display) -> DocxError {
    DocxError::Xml {
        part: part.to_string(),
        reason: err.to_string(),
    }
}

fn emit<W: std::io::Write>(writer: &mut Writer<W>, part: &str, event: Event<'_>) -> Result<(), DocxError> {
    writer.write_event(event).map_err(|err| xml_error(part, err))
}

/// Writes one `w:p` element with the given style id.
///
/// `\n`, `\r\n` and `\r` become line breaks and `\t` becomes a tab. Characters
/// that XML 1.0 cannot carry are dropped.
pub(crate) fn write_paragraph<W: std::io::Write>(
    writer: &mut Writer<W>,
    style_id: &str,
    text: &str,
) -> Result<(), DocxError> {
    const PART: &str = "word/document.xml";

    emit(writer, PART, Event::Start(BytesStart::new("w:p")))?;
    emit(writer, PART, Event::Start(BytesStart::new("w:pPr")))?;
    emit(
        writer,
        PART,
        Event::Empty(BytesStart::new("w:pStyle").with_attributes([("w:val", style_id)])),
    )?;
    emit(writer, PART, Event::End(BytesEnd::new("w:pPr")))?;

    if !text.is_empty() {
        emit(writer, PART, Event::Start(BytesStart::new("w:r")))?;
        let mut segment = String::new();
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            let marker = match ch {
                '\n' => Some("w:br"),
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    Some("w:br")
                }
                '\t' => Some("w:tab"),
                c if is_xml_char(c) => {
                    segment.push(c);
                    None
                }
                _ => None,
            };
            if let Some(marker) = marker {
                flush_text(writer, &mut segment)?;
                emit(writer, PART, Event::Empty(BytesStart::new(marker)))?;
            }
        }
        flush_text(writer, &mut segment)?;
        emit(writer, PART, Event::End(BytesEnd::new("w:r")))?;
    }

    emit(writer, PART, Event::End(BytesEnd::new("w:p")))
}

fn flush_text<W: std::io::Write>(writer: &mut Writer<W>, segment: &mut String) -> Result<(), DocxError> {
    if segment.is_empty() {
        return Ok(());
    }
    const PART: &str = "word/document.xml";
    emit(
        writer,
        PART,
        Event::Start(BytesStart::new("w:t").with_attributes([("xml:space", "preserve")])),
    )?;
    emit(writer, PART, Event::Text(BytesText::new(segment.as_str())))?;
    emit(writer, PART, Event::End(BytesEnd::new("w:t")))?;
    segment.clear();
    Ok(())
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Returns a copy of the main document part with `fragment` spliced into the
/// body, after the existing content and before the body-level `w:sectPr`.
pub(crate) fn splice_into_body(part: &str, document: &[u8], fragment: &[u8]) -> Result<Vec<u8>, DocxError> {
    let mut reader = Reader::from_reader(document);
    let mut writer = Writer::new(Vec::with_capacity(document.len() + fragment.len()));
    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    let mut spliced = false;

    loop {
        match reader.read_event().map_err(|err| xml_error(part, err))? {
            Event::Eof => break,
            Event::Start(e) => {
                if !spliced && body_depth == Some(depth) && e.local_name().as_ref() == b"sectPr" {
                    writer.get_mut().extend_from_slice(fragment);
                    spliced = true;
                }
                depth += 1;
                if body_depth.is_none() && e.local_name().as_ref() == b"body" {
                    body_depth = Some(depth);
                }
                emit(&mut writer, part, Event::Start(e))?;
            }
            Event::Empty(e) => {
                if body_depth.is_none() && e.local_name().as_ref() == b"body" {
                    // <w:body/> has nowhere to append into; open it up.
                    let end = e.to_end().into_owned();
                    emit(&mut writer, part, Event::Start(e))?;
                    writer.get_mut().extend_from_slice(fragment);
                    emit(&mut writer, part, Event::End(end))?;
                    body_depth = Some(depth + 1);
                    spliced = true;
                } else {
                    if !spliced && body_depth == Some(depth) && e.local_name().as_ref() == b"sectPr" {
                        writer.get_mut().extend_from_slice(fragment);
                        spliced = true;
                    }
                    emit(&mut writer, part, Event::Empty(e))?;
                }
            }
            Event::End(e) => {
                if !spliced && body_depth == Some(depth) {
                    writer.get_mut().extend_from_slice(fragment);
                    spliced = true;
                }
                depth = depth.saturating_sub(1);
                emit(&mut writer, part, Event::End(e))?;
            }
            other => emit(&mut writer, part, other)?,
        }
    }

    if !spliced {
        return Err(xml_error(part, "document has no w:body element"));
    }
    Ok(writer.into_inner())
}

/// Finds the main document part named by the package relationships.
pub(crate) fn main_document_target(rels: &[u8]) -> Result<Option<String>, DocxError> {
    const PART: &str = "_rels/.rels";
    let mut reader = Reader::from_reader(rels);
    loop {
        match reader.read_event().map_err(|err| xml_error(PART, err))? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut kind = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.local_name().as_ref() {
                        b"Type" => kind = Some(attr.value.into_owned()),
                        b"Target" => {
                            target = attr.unescape_value().ok().map(|v| v.into_owned());
                        }
                        _ => {}
                    }
                }
                if kind.as_deref() == Some(MAIN_DOCUMENT_REL) {
                    return Ok(target.map(|t| t.trim_start_matches('/').to_string()));
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(style: &str, text: &str) -> String {
        let mut writer = Writer::new(Vec::new());
        write_paragraph(&mut writer, style, text).expect("write");
        String::from_utf8(writer.into_inner()).expect("utf8")
    }

    #[test]
    fn paragraph_markup() {
        assert_eq!(
            paragraph("Heading1", "Intro"),
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t xml:space="preserve">Intro</w:t></w:r></w:p>"#
        );
    }

    #[test]
    fn breaks_tabs_and_escaping() {
        let xml = paragraph("Normal", "a & b\nc\td\r\ne");
        assert!(xml.contains("a &amp; b</w:t><w:br/>"));
        assert!(xml.contains(">c</w:t><w:tab/><w:t xml:space=\"preserve\">d</w:t><w:br/>"));
        assert_eq!(xml.matches("<w:br/>").count(), 2);
    }

    #[test]
    fn whitespace_and_empty_text() {
        assert!(paragraph("Normal", "  x  ").contains(">  x  </w:t>"));
        assert_eq!(
            paragraph("Normal", ""),
            r#"<w:p><w:pPr><w:pStyle w:val="Normal"/></w:pPr></w:p>"#
        );
    }

    #[test]
    fn control_characters_dropped() {
        assert!(paragraph("Normal", "a\u{0}b\u{1b}c").contains(">abc</w:t>"));
    }

    #[test]
    fn splice_before_section_properties() {
        let doc = br#"<w:document xmlns:w="w"><w:body><w:p/><w:sectPr><w:pgSz/></w:sectPr></w:body></w:document>"#;
        let out = splice_into_body("word/document.xml", doc, b"<NEW/>").expect("splice");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"<w:document xmlns:w="w"><w:body><w:p/><NEW/><w:sectPr><w:pgSz/></w:sectPr></w:body></w:document>"#
        );
    }

    #[test]
    fn nested_section_properties_are_not_the_body_one() {
        let doc = br#"<w:document><w:body><w:p><w:pPr><w:sectPr/></w:pPr></w:p></w:body></w:document>"#;
        let out = splice_into_body("word/document.xml", doc, b"<NEW/>").expect("splice");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"<w:document><w:body><w:p><w:pPr><w:sectPr/></w:pPr></w:p><NEW/></w:body></w:document>"#
        );
    }

    #[test]
    fn splice_into_empty_body() {
        let out = splice_into_body("d", b"<w:document><w:body/></w:document>", b"<NEW/>").expect("splice");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<w:document><w:body><NEW/></w:body></w:document>"
        );
    }

    #[test]
    fn missing_body_is_an_error() {
        let err = splice_into_body("d", b"<w:document/>", b"<NEW/>").unwrap_err();
        assert!(matches!(err, DocxError::Xml { .. }));
    }

    #[test]
    fn finds_main_document_target() {
        let rels = br#"<Relationships><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="/word/document2.xml"/></Relationships>"#;
        assert_eq!(
            main_document_target(rels).unwrap().as_deref(),
            Some("word/document2.xml")
        );
        assert_eq!(main_document_target(b"<Relationships/>").unwrap(), None);
    }
}
