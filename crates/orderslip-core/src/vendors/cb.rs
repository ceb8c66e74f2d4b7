//! CB spreadsheet orders: header-row table, quantity column probed from a
//! candidate list, delivery date in the filename.

use std::path::Path;

use crate::error::{Result, SheetError};
use crate::extract::dates;
use crate::models::config::CbConfig;
use crate::models::document::{LineItem, ParsedDocument};
use crate::runlog::LogSink;
use crate::runner::Converter;
use crate::sheet::Worksheet;

/// Footer labels ending the product table. CB sheets close with a single
/// "tổng cộng" row.
const FOOTER_LABELS: &[&str] = &["tổng cộng"];

pub struct CbConverter {
    cfg: CbConfig,
    default_year: i32,
}

impl CbConverter {
    pub fn new(cfg: CbConfig, default_year: i32) -> Self {
        Self { cfg, default_year }
    }

    /// First candidate header whose column holds at least one numeric value
    /// below the header row.
    fn pick_quantity_column(&self, ws: &Worksheet, header_row: usize) -> Option<usize> {
        self.cfg
            .columns
            .quantity_candidates
            .iter()
            .filter_map(|candidate| ws.find_column(header_row, candidate))
            .find(|&col| {
                (header_row + 1..ws.rows_end()).any(|row| ws.cell_f64(row, col).is_some())
            })
    }
}

impl Converter for CbConverter {
    fn name(&self) -> &'static str {
        "cb"
    }

    fn accepts(&self, filename: &str) -> bool {
        let lower = filename.to_lowercase();
        lower.ends_with(".xlsx") || lower.ends_with(".xls")
    }

    fn convert(&self, path: &Path, log: &mut dyn LogSink) -> Result<Vec<ParsedDocument>> {
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let ws = Worksheet::open(path, Some(&self.cfg.sheet_name))?;
        let header_row = self.cfg.header_row - 1;

        let qty_col = self
            .pick_quantity_column(&ws, header_row)
            .ok_or(SheetError::NoQuantityColumn)?;
        let product_col = ws
            .find_column(header_row, &self.cfg.columns.product_name)
            .ok_or_else(|| SheetError::MissingColumn(self.cfg.columns.product_name.clone()))?;
        let price_col = self
            .cfg
            .columns
            .unit_price
            .as_deref()
            .and_then(|name| ws.find_column(header_row, name));

        let delivery_date = dates::date_from_filename(&filename, self.default_year);
        if delivery_date.is_none() {
            log.warning(&format!("Delivery date set to null for {filename}"));
        }

        let mut rows = Vec::new();
        for row in header_row + 1..ws.rows_end() {
            let Some(product_name) = ws.cell_str(row, product_col) else {
                continue;
            };
            if FOOTER_LABELS.contains(&product_name.to_lowercase().as_str()) {
                continue;
            }
            let Some(qty) = ws.cell_f64(row, qty_col) else {
                continue;
            };
            let unit_price = price_col.and_then(|col| ws.cell_f64(row, col));

            rows.push(LineItem {
                product_name,
                qty,
                unit_price,
                tax: self.cfg.defaults.tax,
            });
        }

        if rows.is_empty() {
            return Ok(vec![]);
        }

        Ok(vec![ParsedDocument::new(delivery_date, filename, rows)])
    }
}
