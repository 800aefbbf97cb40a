use std::fs;

use blockdoc::config::BlockdocConfig;
use blockdoc::{
    DOCX_CONTENT_TYPE, DocumentBuilder, DocxDocument, PipelineError, RenderRequest,
    ValidateConfig, parse_json, process_request,
};
use docx::Package;

const REQUEST: &str = r#"{
  "template": "house.docx",
  "payload": {
    "title": "Report",
    "document_type": "Board paper",
    "styled_blocks": [
      {"type": "heading", "level": 1, "text": "Intro", "word_style": "Heading 1"},
      {"type": "bullet_list", "text": "x\ny", "word_style": "GBM Dash Bullet"},
      {"type": "paragraph", "text": "Tom & Jerry <3"},
      {"type": "note", "text": "line one\nline two"}
    ]
  }
}"#;

fn document_xml(bytes: &[u8]) -> String {
    let package = Package::read(bytes).expect("valid package");
    String::from_utf8(package.part("word/document.xml").expect("document part").to_vec())
        .expect("utf8")
}

#[test]
fn full_pipeline_renders_into_directory_template() -> Result<(), PipelineError> {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut seed = DocxDocument::blank().expect("blank");
    seed.append_styled("Letterhead", "Normal");
    fs::write(dir.path().join("house.docx"), seed.to_bytes().expect("seed bytes")).expect("write");

    let yaml = format!(
        "version: \"1.0\"\nrender:\n  template_dir: {:?}\n",
        dir.path().display().to_string()
    );
    let config = BlockdocConfig::from_yaml(&yaml).expect("config");
    let store = config.render_config().template_store();

    let request: RenderRequest = parse_json(REQUEST)?;
    let artifact = process_request(
        request,
        &config.validate_config(),
        &config.render_config(),
        store.as_ref(),
    )?;

    assert_eq!(artifact.content_type, DOCX_CONTENT_TYPE);
    assert!(artifact.file_name.starts_with("output-"));

    let xml = document_xml(&artifact.bytes);
    let order = [
        "Letterhead",
        ">Report<",
        ">Board paper<",
        ">Intro<",
        ">x<",
        ">y<",
        "Tom &amp; Jerry &lt;3",
        ">line one</w:t><w:br/>",
        "<w:sectPr",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|needle| xml.find(needle).unwrap_or_else(|| panic!("{needle} missing")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");

    assert!(xml.contains(r#"<w:pStyle w:val="GBMNote"/>"#));
    assert_eq!(xml.matches(r#"<w:pStyle w:val="GBMDashBullet"/>"#).count(), 2);
    Ok(())
}

#[test]
fn blank_document_when_no_template() -> Result<(), PipelineError> {
    let request: RenderRequest = parse_json(
        r#"{"payload": {"blocks": [{"type": "heading", "level": 2, "text": "Only"}]}}"#,
    )?;
    let artifact = process_request(
        request,
        &ValidateConfig::default(),
        &Default::default(),
        &blockdoc::InMemoryTemplateStore::new(),
    )?;

    let package = Package::read(&artifact.bytes).expect("package");
    assert!(package.part("word/styles.xml").is_some());
    assert!(package.part("word/numbering.xml").is_some());
    assert!(document_xml(&artifact.bytes).contains(r#"<w:pStyle w:val="Heading2"/>"#));
    Ok(())
}
