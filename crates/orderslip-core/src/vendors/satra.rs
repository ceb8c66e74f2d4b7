//! Satra spreadsheet orders: headerless positional grid scanned per
//! warehouse, each warehouse with its own quantity column.

use std::path::Path;

use crate::error::Result;
use crate::extract::dates;
use crate::models::config::SatraConfig;
use crate::models::document::{LineItem, ParsedDocument};
use crate::runlog::LogSink;
use crate::runner::Converter;
use crate::sheet::{column_index, Worksheet};

const FOOTER_LABELS: &[&str] = &["tổng cộng"];

pub struct SatraConverter {
    cfg: SatraConfig,
    default_year: i32,
}

impl SatraConverter {
    pub fn new(cfg: SatraConfig, default_year: i32) -> Self {
        Self { cfg, default_year }
    }

    /// Scan one warehouse section. Stops at the first row where both
    /// monitored columns are empty.
    fn scan_warehouse(
        &self,
        ws: &Worksheet,
        product_col: usize,
        qty_col: usize,
        start_row: usize,
    ) -> Vec<LineItem> {
        let mut rows = Vec::new();

        for row in start_row..ws.rows_end() {
            let product_name = ws.cell_str(row, product_col);
            let qty = ws.cell_f64(row, qty_col);

            if product_name.is_none() && qty.is_none() {
                break;
            }
            let Some(product_name) = product_name else {
                continue;
            };
            if FOOTER_LABELS.contains(&product_name.to_lowercase().as_str()) {
                continue;
            }
            let Some(qty) = qty else {
                continue;
            };

            rows.push(LineItem {
                product_name,
                qty,
                unit_price: None,
                tax: self.cfg.tax,
            });
        }

        rows
    }
}

impl Converter for SatraConverter {
    fn name(&self) -> &'static str {
        "satra"
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

        let ws = Worksheet::open(path, None)?;

        let delivery_date = ws
            .str_by_ref(&self.cfg.delivery_date_cell)?
            .and_then(|raw| dates::date_from_cell_text(&raw, self.default_year));
        if delivery_date.is_none() {
            log.warning(&format!("Delivery date set to null for {filename}"));
        }

        let product_col = column_index(&self.cfg.product_name_column)?;
        // 1-indexed header rows; data starts on the row after, which is the
        // same number 0-indexed.
        let product_start = self.cfg.product_name_header_row;

        let mut documents = Vec::new();
        for (warehouse, meta) in &self.cfg.warehouse_columns {
            let qty_col = column_index(&meta.qty_col)?;
            let start_row = product_start.max(meta.header_row);

            let rows = self.scan_warehouse(&ws, product_col, qty_col, start_row);
            if rows.is_empty() {
                continue;
            }

            documents.push(
                ParsedDocument::new(delivery_date.clone(), filename.clone(), rows)
                    .with_store(warehouse.clone()),
            );
        }

        Ok(documents)
    }

    fn output_name(&self, source: &Path, doc: &ParsedDocument) -> String {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        match &doc.store {
            Some(store) => format!("{stem}_{}.json", store.to_lowercase()),
            None => format!("{stem}.json"),
        }
    }
}
