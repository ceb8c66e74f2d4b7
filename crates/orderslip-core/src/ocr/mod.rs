//! OCR pipeline: image preprocessing and text recognition.

mod engine;
mod preprocessing;

pub use engine::{PureOcrEngine, TextRecognizer};
pub use preprocessing::{suppress_red_ink, ReceiptPreprocessor};
