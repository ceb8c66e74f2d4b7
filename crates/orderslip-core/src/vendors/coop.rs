//! Co.op photographed order forms: red-ink suppression, OCR, then
//! pattern-line parsing. The file name prefix classifies the document as a
//! forecast or a confirmed order.

use std::path::Path;

use image::DynamicImage;

use crate::error::Result;
use crate::extract::dates;
use crate::extract::numbers;
use crate::extract::patterns::{COOP_PRICE, COOP_TRAILING_QTY};
use crate::models::document::{LineItem, ParsedDocument};
use crate::ocr::{ReceiptPreprocessor, TextRecognizer};
use crate::runlog::LogSink;
use crate::runner::Converter;

pub struct CoopConverter {
    engine: Box<dyn TextRecognizer>,
    preprocessor: ReceiptPreprocessor,
    default_year: i32,
}

impl CoopConverter {
    pub fn new(engine: Box<dyn TextRecognizer>, default_year: i32) -> Self {
        Self {
            engine,
            preprocessor: ReceiptPreprocessor::new(),
            default_year,
        }
    }
}

/// Parse OCR lines of the form `name ... grouped-price ... qty`.
///
/// The price is a 5-or-6 digit amount with a grouping mark; the quantity is
/// the last small integer on the line; the name is everything before the
/// price.
pub(crate) fn parse_line_text(text: &str) -> Vec<LineItem> {
    let mut rows = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some(price_caps) = COOP_PRICE.captures(line) else {
            continue;
        };
        let Some(qty_caps) = COOP_TRAILING_QTY.captures(line) else {
            continue;
        };
        let Some(unit_price) = numbers::grouped_digits(&price_caps[1]) else {
            continue;
        };
        let Some(qty) = qty_caps[1].parse::<f64>().ok() else {
            continue;
        };

        let price_start = price_caps.get(1).map(|m| m.start()).unwrap_or(0);
        let product_name = line[..price_start].trim().to_string();
        if product_name.is_empty() {
            continue;
        }

        rows.push(LineItem {
            product_name,
            qty,
            unit_price: Some(unit_price),
            tax: 0.0,
        });
    }

    rows
}

/// Document classification from the file name prefix.
pub(crate) fn classify(filename: &str) -> &'static str {
    let upper = filename.to_uppercase();
    if upper.starts_with("DU KIEN") {
        "forecast"
    } else if upper.starts_with("CHOT") {
        "confirmed"
    } else {
        "unknown"
    }
}

impl Converter for CoopConverter {
    fn name(&self) -> &'static str {
        "coop"
    }

    fn accepts(&self, filename: &str) -> bool {
        let lower = filename.to_lowercase();
        lower.ends_with(".jpg") || lower.ends_with(".jpeg") || lower.ends_with(".png")
    }

    fn convert(&self, path: &Path, _log: &mut dyn LogSink) -> Result<Vec<ParsedDocument>> {
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let image = image::open(path)?;
        let prepared = self.preprocessor.prepare(&image);
        let text = self
            .engine
            .recognize(&DynamicImage::ImageLuma8(prepared))?;

        let delivery_date = dates::date_from_day_month(&filename, self.default_year);
        let rows = parse_line_text(&text);
        if rows.is_empty() {
            return Ok(vec![]);
        }

        Ok(vec![
            ParsedDocument::new(delivery_date, filename.clone(), rows).with_kind(classify(&filename)),
        ])
    }
}
