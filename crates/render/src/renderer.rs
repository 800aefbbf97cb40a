use blocks::{BlockKind, DocumentPayload, NOTE_STYLE};
use docx::DocumentBuilder;

/// Appends a validated payload to `builder`, in payload order.
///
/// Title and document type are trimmed and skipped when blank. Bullet list
/// text is split into one element per non-blank, trimmed line. All other
/// block text is appended exactly as given.
pub fn render_blocks<B: DocumentBuilder + ?Sized>(payload: &DocumentPayload, builder: &mut B) {
    if let Some(title) = payload.trimmed_title() {
        builder.append_heading(title, 1);
    }
    if let Some(document_type) = payload.trimmed_document_type() {
        builder.append_styled(document_type, NOTE_STYLE);
    }

    for block in &payload.blocks {
        match block.kind {
            BlockKind::Heading { level } => builder.append_heading(&block.text, level.get()),
            BlockKind::BulletList => {
                for line in block.text.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
                    builder.append_styled(line, &block.word_style);
                }
            }
            BlockKind::Paragraph | BlockKind::Note | BlockKind::Raw => {
                builder.append_styled(&block.text, &block.word_style);
            }
        }
    }
}
