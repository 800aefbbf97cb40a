use axum::response::IntoResponse;
use axum::Json;
use blockdoc::{allowed_styles, NOTE_STYLE};
use serde::Serialize;

/// Style whitelist response
#[derive(Debug, Serialize)]
pub struct StylesResponse {
    pub styles: Vec<&'static str>,
    pub note_style: &'static str,
}

/// List the styles a block may name in `word_style`
pub async fn list_styles() -> impl IntoResponse {
    Json(StylesResponse {
        styles: allowed_styles().collect(),
        note_style: NOTE_STYLE,
    })
}
