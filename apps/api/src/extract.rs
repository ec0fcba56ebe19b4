//! Upload bytes → plain text, plus the fixed-length truncation helpers used by
//! both analysis modes.

use crate::errors::AppError;

/// Maximum number of characters returned as `preview`.
pub const PREVIEW_LIMIT: usize = 1000;

/// Maximum number of characters in the skills-mode `summary` (before the
/// `...` suffix added when the text is longer).
pub const SUMMARY_LIMIT: usize = 250;

/// Extracts plain text from an uploaded byte stream.
///
/// PDFs (identified by the `%PDF` magic) go through `pdf-extract`; anything
/// else is treated as UTF-8 text, decoded lossily. The uploaded bytes are
/// never written to disk.
pub fn text_from_upload(bytes: &[u8]) -> Result<String, AppError> {
    if bytes.starts_with(b"%PDF") {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Extraction(format!("PDF text extraction failed: {e}")))
    } else {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Returns the first `limit` characters of `text`.
///
/// Operates on characters, not bytes, so multi-byte input never splits a
/// scalar value.
pub fn preview(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Skills-mode summary: first [`SUMMARY_LIMIT`] characters, with a `...`
/// suffix when the input was longer.
pub fn summary(text: &str) -> String {
    if text.chars().count() > SUMMARY_LIMIT {
        let mut s = preview(text, SUMMARY_LIMIT);
        s.push_str("...");
        s
    } else {
        text.to_string()
    }
}
