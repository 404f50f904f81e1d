//! Uploaded-document text extraction.
//!
//! Turns raw file bytes plus a declared extension into a [`Document`],
//! already truncated to the upload character budget. Only plain text and
//! PDF are supported; anything else is rejected before a provider is
//! contacted.

use quorum_core::error::AppError;
use quorum_core::models::{DOCUMENT_CHAR_BUDGET, Document, SourceKind};

/// Extract text from an uploaded file.
///
/// Extension matching is case-insensitive. The returned document has the
/// truncation policy already applied.
pub fn read_document(bytes: &[u8], extension: &str) -> Result<Document, AppError> {
    let text = match extension.to_ascii_lowercase().as_str() {
        "txt" => decode_text(bytes),
        "pdf" => pdf_text(bytes)?,
        other => return Err(AppError::UnsupportedFormat(other.to_string())),
    };

    Ok(Document::new(text, SourceKind::UploadedFile).truncate_to(DOCUMENT_CHAR_BUDGET))
}

/// Decode bytes as UTF-8, falling back to lossy conversion. Never fails:
/// a text upload with bad bytes still produces something to query.
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            tracing::warn!("text file is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

/// Extract text from a PDF, page by page in page order.
///
/// A page that fails extraction contributes nothing rather than failing
/// the whole document; a byte stream that is not a loadable PDF at all is
/// an error.
fn pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| AppError::DocumentError(format!("failed to load PDF: {e}")))?;

    let mut text = String::new();
    for page_number in doc.get_pages().keys().copied() {
        match doc.extract_text(&[page_number]) {
            Ok(page) => text.push_str(&page),
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "skipping unreadable page");
            }
        }
    }

    Ok(text)
}
