//! Genshai PDF orders: single-page table rendered as text lines, with a
//! per-row tax column and a labeled delivery date.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::extract::dates;
use crate::extract::numbers;
use crate::extract::patterns::GENSHAI_LINE;
use crate::models::document::{LineItem, ParsedDocument};
use crate::pdf;
use crate::runlog::LogSink;
use crate::runner::Converter;

pub struct GenshaiConverter;

impl GenshaiConverter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GenshaiConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse table lines: ordinal, product, qty, unit price, tax.
///
/// Price and tax fall back to 0 when unparseable; a row without a numeric
/// quantity is dropped.
pub(crate) fn parse_table_text(text: &str) -> Vec<LineItem> {
    let mut rows = Vec::new();

    for line in text.lines().map(str::trim) {
        let Some(caps) = GENSHAI_LINE.captures(line) else {
            continue;
        };
        let product_name = caps[1].trim().to_string();
        if product_name.is_empty() {
            continue;
        }
        let Some(qty) = numbers::to_int(&caps[2]) else {
            continue;
        };
        let unit_price = numbers::to_float(&caps[3]).unwrap_or(0.0);
        let tax = numbers::to_float(&caps[4]).unwrap_or(0.0);

        rows.push(LineItem {
            product_name,
            qty: qty as f64,
            unit_price: Some(unit_price),
            tax,
        });
    }

    rows
}

impl Converter for GenshaiConverter {
    fn name(&self) -> &'static str {
        "genshai"
    }

    fn accepts(&self, filename: &str) -> bool {
        filename.to_lowercase().ends_with(".pdf")
    }

    fn convert(&self, path: &Path, _log: &mut dyn LogSink) -> Result<Vec<ParsedDocument>> {
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let data = fs::read(path)?;
        let content = pdf::extract_text(&data)?;

        let delivery_date = dates::date_from_labeled_text(&content.text);
        let rows = parse_table_text(&content.text);
        if rows.is_empty() {
            return Ok(vec![]);
        }

        Ok(vec![ParsedDocument::new(delivery_date, filename, rows)])
    }
}
