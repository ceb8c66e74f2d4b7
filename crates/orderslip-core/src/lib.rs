//! Core library for retail order document conversion.
//!
//! Each retail partner ("vendor") sends order/delivery documents in its own
//! format - spreadsheets, PDFs, or photographed paper forms. This crate
//! turns them into normalized JSON line-item records:
//! - spreadsheet access (calamine) with header-based and positional scanning
//! - PDF text extraction (lopdf + pdf-extract)
//! - OCR preprocessing and recognition for photographed forms
//! - seven vendor converters sharing one data model, batch runner, and log sink

pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod runlog;
pub mod runner;
pub mod sheet;
pub mod vendors;

pub use error::{Result, SlipError};
pub use models::config::PathConfig;
pub use models::document::{LineItem, ParsedDocument};
pub use ocr::{PureOcrEngine, TextRecognizer};
pub use runlog::{Level, LogSink, RunLog};
pub use runner::{run_batch, write_document, Converter, FileFailure, RunSummary};
