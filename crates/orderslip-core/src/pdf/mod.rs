//! PDF text extraction using lopdf and pdf-extract.
//!
//! The PDF partners send single-page text PDFs, so only text extraction is
//! needed here; lopdf is used up front to reject corrupt or empty files
//! with a useful error before pdf-extract runs.

use crate::error::PdfError;

/// Text pulled out of a PDF.
#[derive(Debug, Clone)]
pub struct PdfText {
    /// Extracted text, pages separated by form feeds as pdf-extract emits them.
    pub text: String,
    /// Number of pages in the document.
    pub page_count: u32,
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Extract text from an in-memory PDF.
pub fn extract_text(data: &[u8]) -> Result<PdfText> {
    let document = lopdf::Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

    let page_count = document.get_pages().len() as u32;
    if page_count == 0 {
        return Err(PdfError::NoPages);
    }

    let text = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

    Ok(PdfText { text, page_count })
}
