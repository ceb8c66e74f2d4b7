//! Error types for the orderslip-core library.

use thiserror::Error;

/// Main error type for the orderslip library.
#[derive(Error, Debug)]
pub enum SlipError {
    /// Spreadsheet processing error.
    #[error("sheet error: {0}")]
    Sheet(#[from] SheetError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to spreadsheet processing.
#[derive(Error, Debug)]
pub enum SheetError {
    /// Failed to open/parse the workbook file.
    #[error("failed to open workbook: {0}")]
    Open(String),

    /// The requested worksheet does not exist.
    #[error("worksheet not found: {0}")]
    MissingSheet(String),

    /// A configured header column is absent from the header row.
    #[error("column not found: {0}")]
    MissingColumn(String),

    /// None of the configured quantity candidates holds numeric data.
    #[error("no valid quantity column among candidates")]
    NoQuantityColumn,

    /// A cell reference or column letter could not be parsed.
    #[error("invalid cell reference: {0}")]
    BadCellRef(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Image preprocessing failed.
    #[error("preprocessing failed: {0}")]
    Preprocessing(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Result type for the orderslip library.
pub type Result<T> = std::result::Result<T, SlipError>;
