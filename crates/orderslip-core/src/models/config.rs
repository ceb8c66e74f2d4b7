//! Run configuration loaded from the JSON files under `config/`.
//!
//! Every config is read once at process entry and passed by reference into
//! the conversion code; nothing here is global or mutable during a run.
//! Missing keys surface as deserialization errors that abort that vendor's
//! run before any file is touched.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{Result, SlipError};

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SlipError::Config(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| SlipError::Config(format!("{}: {}", path.display(), e)))
}

/// Named input/output directories shared by all vendors (`paths.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct PathConfig {
    paths: HashMap<String, PathBuf>,
}

impl PathConfig {
    /// Load from a `{"paths": {...}}` JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        read_json(path)
    }

    /// Look up a named directory.
    pub fn dir(&self, name: &str) -> Result<&Path> {
        self.paths
            .get(name)
            .map(PathBuf::as_path)
            .ok_or_else(|| SlipError::Config(format!("missing path entry: {name}")))
    }
}

/// CB spreadsheet layout (`column_map_cb.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct CbConfig {
    pub sheet_name: String,
    /// 1-indexed header row.
    pub header_row: usize,
    pub columns: CbColumns,
    pub defaults: CbDefaults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CbColumns {
    /// Header names to probe, in order, for the quantity column.
    pub quantity_candidates: Vec<String>,
    pub product_name: String,
    #[serde(default)]
    pub unit_price: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CbDefaults {
    pub tax: f64,
}

impl CbConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

/// Smile Cheers spreadsheet layout (`column_map_smile_cheers.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct SmileCheersConfig {
    pub sheet_name: String,
    /// 1-indexed header row.
    pub header_row: usize,
    /// A1 reference of the datetime cell holding the delivery date.
    pub delivery_date_cell: String,
    pub columns: SmileCheersColumns,
    pub tax: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmileCheersColumns {
    pub product_name: String,
    pub qty: String,
    #[serde(default)]
    pub unit_price: Option<String>,
}

impl SmileCheersConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

/// Satra headerless grid layout (`column_map_satra.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct SatraConfig {
    /// A1 reference of the cell holding free-form delivery date text.
    pub delivery_date_cell: String,
    /// Column letter of the product name column.
    pub product_name_column: String,
    /// 1-indexed row of the product name header; data starts on the next row.
    pub product_name_header_row: usize,
    pub tax: f64,
    /// Warehouse sections scanned independently over the same sheet.
    /// BTreeMap keeps output ordering stable across runs.
    pub warehouse_columns: BTreeMap<String, WarehouseColumns>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseColumns {
    /// Column letter of this warehouse's quantity column.
    pub qty_col: String,
    /// 1-indexed row of this warehouse's header.
    pub header_row: usize,
}

impl SatraConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

/// Lotte slip-splitting layout (`column_map_lotte.json`, under `lotte_excel`).
#[derive(Debug, Clone, Deserialize)]
pub struct LotteConfig {
    /// 1-indexed first row scanned for markers and data.
    pub start_row: usize,
    /// chrono format string for the slip-header date cell, e.g. `%d/%m/%Y`.
    pub date_format: String,
    pub columns: LotteColumns,
}

/// 0-indexed column positions; the sheet has no header row.
#[derive(Debug, Clone, Deserialize)]
pub struct LotteColumns {
    pub slip: usize,
    pub delivery_date: usize,
    pub product_name: usize,
    pub unit_price: usize,
    pub tax: usize,
    pub qty: usize,
}

impl LotteConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        #[derive(Deserialize)]
        struct Wrapper {
            lotte_excel: LotteConfig,
        }
        Ok(read_json::<Wrapper>(path)?.lotte_excel)
    }
}

/// Mini Mart PDF defaults (`column_map_mini.json`, under `mini_order`).
#[derive(Debug, Clone, Deserialize)]
pub struct MiniConfig {
    pub tax: f64,
}

impl MiniConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        #[derive(Deserialize)]
        struct Wrapper {
            mini_order: MiniConfig,
        }
        Ok(read_json::<Wrapper>(path)?.mini_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_config_lookup() {
        let cfg: PathConfig = serde_json::from_str(
            r#"{"paths": {"input_cb": "data/cb/input", "output_cb": "data/cb/output"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.dir("input_cb").unwrap(), Path::new("data/cb/input"));
        assert!(cfg.dir("input_missing").is_err());
    }

    #[test]
    fn test_missing_key_is_an_error() {
        // header_row absent
        let err = serde_json::from_str::<CbConfig>(
            r#"{"sheet_name": "Sheet1", "columns": {"quantity_candidates": [], "product_name": "x"}, "defaults": {"tax": 0}}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_lotte_wrapper_shape() {
        let json = r#"{
            "lotte_excel": {
                "start_row": 5,
                "date_format": "%d/%m/%Y",
                "columns": {"slip": 4, "delivery_date": 12, "product_name": 20,
                            "unit_price": 26, "tax": 27, "qty": 28}
            }
        }"#;
        #[derive(Deserialize)]
        struct Wrapper {
            lotte_excel: LotteConfig,
        }
        let cfg = serde_json::from_str::<Wrapper>(json).unwrap().lotte_excel;
        assert_eq!(cfg.columns.slip, 4);
        assert_eq!(cfg.date_format, "%d/%m/%Y");
    }
}
