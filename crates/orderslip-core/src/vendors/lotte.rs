//! Lotte spreadsheet orders: one sheet carrying several order slips,
//! split on a hyphenated slip identifier in the marker column.

use std::path::Path;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::config::LotteConfig;
use crate::models::document::{LineItem, ParsedDocument};
use crate::runlog::LogSink;
use crate::runner::Converter;
use crate::sheet::Worksheet;

pub struct LotteConverter {
    cfg: LotteConfig,
}

/// One accumulating slip block.
struct Block {
    slip: String,
    delivery_date: Option<String>,
    rows: Vec<LineItem>,
}

impl LotteConverter {
    pub fn new(cfg: LotteConfig) -> Self {
        Self { cfg }
    }

    fn parse_slip_date(&self, raw: &str) -> Option<String> {
        NaiveDate::parse_from_str(raw.trim(), &self.cfg.date_format)
            .ok()
            .map(|d| d.format("%Y-%m-%d").to_string())
    }
}

impl Converter for LotteConverter {
    fn name(&self) -> &'static str {
        "lotte"
    }

    fn accepts(&self, filename: &str) -> bool {
        let lower = filename.to_lowercase();
        lower.ends_with(".xls") || lower.ends_with(".xlsx")
    }

    fn convert(&self, path: &Path, log: &mut dyn LogSink) -> Result<Vec<ParsedDocument>> {
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        // open_workbook_auto reads the legacy .xls files directly; no
        // conversion step like the old xlrd round-trip
        let ws = Worksheet::open(path, None)?;
        let cols = &self.cfg.columns;

        let mut blocks: Vec<Block> = Vec::new();
        let mut current: Option<Block> = None;

        for row in self.cfg.start_row - 1..ws.rows_end() {
            // A hyphenated marker opens a new slip block
            if let Some(marker) = ws.cell_str(row, cols.slip) {
                if marker.contains('-') {
                    if let Some(block) = current.take() {
                        if !block.rows.is_empty() {
                            blocks.push(block);
                        }
                    }

                    let delivery_date = match ws.cell_str(row, cols.delivery_date) {
                        Some(raw) => {
                            let parsed = self.parse_slip_date(&raw);
                            if parsed.is_none() {
                                log.warning(&format!(
                                    "Failed to parse delivery date in slip header (row {}): {raw}",
                                    row + 1
                                ));
                            }
                            parsed
                        }
                        None => None,
                    };

                    current = Some(Block {
                        slip: marker,
                        delivery_date,
                        rows: Vec::new(),
                    });
                }
            }

            let Some(block) = current.as_mut() else {
                continue;
            };
            let Some(product_name) = ws.cell_str(row, cols.product_name) else {
                continue;
            };

            // All three numeric cells must coerce or the row is dropped
            let (Some(unit_price), Some(tax), Some(qty)) = (
                ws.cell_f64(row, cols.unit_price),
                ws.cell_f64(row, cols.tax),
                ws.cell_f64(row, cols.qty),
            ) else {
                continue;
            };

            block.rows.push(LineItem {
                product_name,
                qty,
                unit_price: Some(unit_price),
                tax,
            });
        }

        if let Some(block) = current.take() {
            if !block.rows.is_empty() {
                blocks.push(block);
            }
        }

        Ok(blocks
            .into_iter()
            .map(|block| {
                ParsedDocument::new(block.delivery_date, filename.clone(), block.rows)
                    .with_order_slip(block.slip)
            })
            .collect())
    }

    /// The slip file keeps the full source name, extension included.
    fn output_name(&self, source: &Path, doc: &ParsedDocument) -> String {
        let name = source
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        match &doc.order_slip {
            Some(slip) => format!("{name}__{slip}.json"),
            None => format!("{name}.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn converter() -> LotteConverter {
        let cfg: LotteConfig = serde_json::from_str(
            r#"{
                "start_row": 5,
                "date_format": "%d/%m/%Y",
                "columns": {"slip": 4, "delivery_date": 12, "product_name": 20,
                            "unit_price": 26, "tax": 27, "qty": 28}
            }"#,
        )
        .unwrap();
        LotteConverter::new(cfg)
    }

    #[test]
    fn test_slip_date_parsing() {
        let converter = converter();
        assert_eq!(
            converter.parse_slip_date("07/03/2025"),
            Some("2025-03-07".to_string())
        );
        assert_eq!(converter.parse_slip_date("2025-03-07"), None);
    }

    #[test]
    fn test_output_name_keeps_full_source_name() {
        let converter = converter();
        let doc = ParsedDocument::new(None, "orders.xls", vec![]).with_order_slip("SL-001");
        assert_eq!(
            converter.output_name(Path::new("in/orders.xls"), &doc),
            "orders.xls__SL-001.json"
        );
    }
}
