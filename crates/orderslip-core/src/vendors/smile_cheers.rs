//! Smile Cheers spreadsheet orders: fixed header-row table with the
//! delivery date in a dedicated datetime cell.

use std::path::Path;

use crate::error::{Result, SheetError};
use crate::models::config::SmileCheersConfig;
use crate::models::document::{LineItem, ParsedDocument};
use crate::runlog::LogSink;
use crate::runner::Converter;
use crate::sheet::Worksheet;

const FOOTER_LABELS: &[&str] = &["tổng cộng"];

pub struct SmileCheersConverter {
    cfg: SmileCheersConfig,
}

impl SmileCheersConverter {
    pub fn new(cfg: SmileCheersConfig) -> Self {
        Self { cfg }
    }
}

impl Converter for SmileCheersConverter {
    fn name(&self) -> &'static str {
        "smile_cheers"
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

        // Null unless the cell really holds a spreadsheet datetime
        let delivery_date = ws
            .date_by_ref(&self.cfg.delivery_date_cell)?
            .map(|d| d.format("%Y-%m-%d").to_string());
        if delivery_date.is_none() {
            log.warning(&format!("No delivery date cell value in {filename}"));
        }

        let product_col = ws
            .find_column(header_row, &self.cfg.columns.product_name)
            .ok_or_else(|| SheetError::MissingColumn(self.cfg.columns.product_name.clone()))?;
        let qty_col = ws
            .find_column(header_row, &self.cfg.columns.qty)
            .ok_or_else(|| SheetError::MissingColumn(self.cfg.columns.qty.clone()))?;
        let price_col = self
            .cfg
            .columns
            .unit_price
            .as_deref()
            .and_then(|name| ws.find_column(header_row, name));

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
                tax: self.cfg.tax,
            });
        }

        if rows.is_empty() {
            return Ok(vec![]);
        }

        Ok(vec![ParsedDocument::new(delivery_date, filename, rows)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_shape() {
        let cfg: SmileCheersConfig = serde_json::from_str(
            r#"{
                "sheet_name": "Sheet1",
                "header_row": 1,
                "delivery_date_cell": "B2",
                "columns": {"product_name": "Tên hàng", "qty": "SL", "unit_price": "Đơn giá"},
                "tax": 8
            }"#,
        )
        .unwrap();
        let converter = SmileCheersConverter::new(cfg);
        assert!(converter.accepts("don hang 03.12.xlsx"));
        assert!(!converter.accepts("don hang.jpg"));
    }
}
