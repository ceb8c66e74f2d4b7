//! Spreadsheet access over calamine.
//!
//! `open_workbook_auto` handles both `.xlsx` and legacy `.xls`, so the
//! converters never branch on workbook format. All coordinates in this
//! module are absolute and 0-indexed; configs use 1-indexed rows and
//! column letters, converted at the call site.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::NaiveDate;

use crate::error::SheetError;
use crate::extract::numbers;

/// One worksheet's used range.
pub struct Worksheet {
    range: Range<Data>,
}

impl Worksheet {
    /// Open a workbook and select a sheet by name, or the first sheet.
    pub fn open(path: &Path, sheet_name: Option<&str>) -> Result<Self, SheetError> {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| SheetError::Open(e.to_string()))?;

        let name = match sheet_name {
            Some(name) => name.to_string(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| SheetError::MissingSheet("workbook has no sheets".to_string()))?,
        };

        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| SheetError::MissingSheet(format!("{name}: {e}")))?;

        Ok(Self { range })
    }

    /// Exclusive end of the used rows (absolute).
    pub fn rows_end(&self) -> usize {
        self.range.end().map(|(r, _)| r as usize + 1).unwrap_or(0)
    }

    /// Exclusive end of the used columns (absolute).
    pub fn cols_end(&self) -> usize {
        self.range.end().map(|(_, c)| c as usize + 1).unwrap_or(0)
    }

    /// Cell at an absolute 0-indexed position; None outside the used range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Data> {
        self.range.get_value((row as u32, col as u32))
    }

    /// Trimmed text content of a cell; None for empty/error cells.
    pub fn cell_str(&self, row: usize, col: usize) -> Option<String> {
        self.cell(row, col).and_then(data_str)
    }

    /// Numeric content of a cell, coercing numeric-looking strings.
    pub fn cell_f64(&self, row: usize, col: usize) -> Option<f64> {
        self.cell(row, col).and_then(data_f64)
    }

    /// Date content of a spreadsheet datetime cell.
    pub fn cell_date(&self, row: usize, col: usize) -> Option<NaiveDate> {
        match self.cell(row, col)? {
            Data::DateTime(dt) => dt.as_datetime().map(|d| d.date()),
            Data::DateTimeIso(s) => {
                NaiveDate::parse_from_str(&s[..s.len().min(10)], "%Y-%m-%d").ok()
            }
            _ => None,
        }
    }

    /// Text content of a cell addressed by A1 reference.
    pub fn str_by_ref(&self, cell_ref: &str) -> Result<Option<String>, SheetError> {
        let (row, col) = parse_cell_ref(cell_ref)?;
        Ok(self.cell_str(row, col))
    }

    /// Date content of a cell addressed by A1 reference.
    pub fn date_by_ref(&self, cell_ref: &str) -> Result<Option<NaiveDate>, SheetError> {
        let (row, col) = parse_cell_ref(cell_ref)?;
        Ok(self.cell_date(row, col))
    }

    /// Absolute column index of `header` on a 0-indexed header row.
    pub fn find_column(&self, header_row: usize, header: &str) -> Option<usize> {
        (0..self.cols_end())
            .find(|&col| self.cell_str(header_row, col).as_deref() == Some(header))
    }
}

/// Trimmed text rendering of a cell value.
pub fn data_str(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Data::Float(f) => Some(if f.fract() == 0.0 {
            format!("{}", *f as i64)
        } else {
            f.to_string()
        }),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

/// Numeric rendering of a cell value; strings go through thousands-separator
/// stripping.
pub fn data_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => numbers::to_float(s),
        _ => None,
    }
}

/// 0-indexed column for a letter reference ("A" = 0, "AA" = 26).
pub fn column_index(letters: &str) -> Result<usize, SheetError> {
    let trimmed = letters.trim();
    if trimmed.is_empty() {
        return Err(SheetError::BadCellRef(letters.to_string()));
    }
    let mut index = 0usize;
    for c in trimmed.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(SheetError::BadCellRef(letters.to_string()));
        }
        index = index * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    Ok(index - 1)
}

/// Parse an A1 reference like "B3" into 0-indexed (row, column).
pub fn parse_cell_ref(cell_ref: &str) -> Result<(usize, usize), SheetError> {
    let trimmed = cell_ref.trim();
    let split = trimmed
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| SheetError::BadCellRef(cell_ref.to_string()))?;
    let (letters, digits) = trimmed.split_at(split);
    let col = column_index(letters)?;
    let row: usize = digits
        .parse()
        .ok()
        .filter(|&r| r > 0)
        .ok_or_else(|| SheetError::BadCellRef(cell_ref.to_string()))?;
    Ok((row - 1, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A").unwrap(), 0);
        assert_eq!(column_index("Z").unwrap(), 25);
        assert_eq!(column_index("AA").unwrap(), 26);
        assert_eq!(column_index("AC").unwrap(), 28);
        assert!(column_index("").is_err());
        assert!(column_index("A1").is_err());
    }

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("A1").unwrap(), (0, 0));
        assert_eq!(parse_cell_ref("B3").unwrap(), (2, 1));
        assert_eq!(parse_cell_ref("AA10").unwrap(), (9, 26));
        assert!(parse_cell_ref("12").is_err());
        assert!(parse_cell_ref("B0").is_err());
        assert!(parse_cell_ref("").is_err());
    }

    #[test]
    fn test_data_str_coercion() {
        assert_eq!(data_str(&Data::String("  Bánh mì  ".into())), Some("Bánh mì".into()));
        assert_eq!(data_str(&Data::String("   ".into())), None);
        assert_eq!(data_str(&Data::Float(15000.0)), Some("15000".into()));
        assert_eq!(data_str(&Data::Float(1.5)), Some("1.5".into()));
        assert_eq!(data_str(&Data::Empty), None);
    }

    #[test]
    fn test_data_f64_coercion() {
        assert_eq!(data_f64(&Data::Float(10.0)), Some(10.0));
        assert_eq!(data_f64(&Data::Int(7)), Some(7.0));
        assert_eq!(data_f64(&Data::String("15,000".into())), Some(15000.0));
        assert_eq!(data_f64(&Data::String("n/a".into())), None);
        assert_eq!(data_f64(&Data::Empty), None);
    }
}
