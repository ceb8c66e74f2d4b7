//! Mini Mart PDF orders: SKU-prefixed text lines, a "Store" header line,
//! and a filename filter for the one supplier these orders concern.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::extract::dates;
use crate::extract::numbers;
use crate::extract::patterns::MINI_LINE;
use crate::models::config::MiniConfig;
use crate::models::document::{LineItem, ParsedDocument};
use crate::pdf;
use crate::runlog::LogSink;
use crate::runner::Converter;

/// Only orders for this supplier are converted.
const SUPPLIER_FILTER: &str = "DONG XANH FOOD";

pub struct MiniConverter {
    cfg: MiniConfig,
}

impl MiniConverter {
    pub fn new(cfg: MiniConfig) -> Self {
        Self { cfg }
    }
}

/// The line containing "Store" names the ordering store.
pub(crate) fn extract_store_name(text: &str) -> String {
    text.lines()
        .find(|line| line.contains("Store"))
        .map(|line| line.replace("Store", "").trim().to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Parse order lines: SKU, product, "EA" unit marker, unit price, qty,
/// line total (total unused).
pub(crate) fn parse_order_lines(text: &str, tax: f64) -> Vec<LineItem> {
    let mut rows = Vec::new();

    for line in text.lines() {
        let Some(caps) = MINI_LINE.captures(line) else {
            continue;
        };
        let product_name = caps[2].trim().to_string();
        let Some(qty) = numbers::to_int(&caps[4]) else {
            continue;
        };
        let unit_price = numbers::to_float(&caps[3]);

        rows.push(LineItem {
            product_name,
            qty: qty as f64,
            unit_price,
            tax,
        });
    }

    rows
}

impl Converter for MiniConverter {
    fn name(&self) -> &'static str {
        "mini"
    }

    fn accepts(&self, filename: &str) -> bool {
        filename.to_lowercase().ends_with(".pdf")
            && filename.to_uppercase().contains(SUPPLIER_FILTER)
    }

    fn convert(&self, path: &Path, _log: &mut dyn LogSink) -> Result<Vec<ParsedDocument>> {
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let data = fs::read(path)?;
        let content = pdf::extract_text(&data)?;

        let delivery_date = dates::date_from_dashed_text(&content.text);
        let store = extract_store_name(&content.text);
        let rows = parse_order_lines(&content.text, self.cfg.tax);
        if rows.is_empty() {
            return Ok(vec![]);
        }

        Ok(vec![
            ParsedDocument::new(delivery_date, filename, rows).with_store(store),
        ])
    }
}
