//! Wire types for the backend endpoints that are not shared with the core.
//! The enhancement body and result live in `tailor_core::enhancement`.

use serde::Deserialize;

// ── Upload + extraction ─────────────────────────────────────────
// Request is multipart: one file under `ExtractionTarget::form_field()`.

#[derive(Debug, Default, Deserialize)]
pub struct ExtractTextResponse {
    #[serde(default)]
    pub extracted_text: Option<String>,
}

impl ExtractTextResponse {
    /// The extracted text, or an empty string when the backend sent none.
    pub fn into_text(self) -> String {
        self.extracted_text.unwrap_or_default()
    }
}

// ── Enhancement ─────────────────────────────────────────────────
// Request is tailor_core::EnhancementRequest, response tailor_core::EnhancementResult.
