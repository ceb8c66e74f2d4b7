//! Normalized output records shared by every vendor converter.

use serde::{Deserialize, Serialize};

/// One product row extracted from an order document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product description, trimmed, never empty.
    pub product_name: String,

    /// Ordered quantity.
    pub qty: f64,

    /// Unit price; None when the source column is absent or unparseable.
    pub unit_price: Option<f64>,

    /// Tax rate or amount. Semantics are vendor-specific: a configured
    /// default for most partners, a per-row column for genshai.
    pub tax: f64,
}

/// One converted document: a single input file, or one logical sub-block
/// of it (a warehouse section, an order slip).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// ISO `YYYY-MM-DD` delivery date, null when extraction failed.
    pub delivery_date: Option<String>,

    /// Name of the input file this record came from.
    pub source_file: String,

    /// Store or warehouse name, for vendors that carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,

    /// Order slip identifier, for vendors that split one sheet into slips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_slip: Option<String>,

    /// Document classification derived from the file name (coop).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Line items, in document order.
    pub rows: Vec<LineItem>,
}

impl ParsedDocument {
    /// Create a document with only the fields every vendor produces.
    pub fn new(
        delivery_date: Option<String>,
        source_file: impl Into<String>,
        rows: Vec<LineItem>,
    ) -> Self {
        Self {
            delivery_date,
            source_file: source_file.into(),
            store: None,
            order_slip: None,
            kind: None,
            rows,
        }
    }

    /// Attach a store/warehouse name.
    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    /// Attach an order slip identifier.
    pub fn with_order_slip(mut self, slip: impl Into<String>) -> Self {
        self.order_slip = Some(slip.into());
        self
    }

    /// Attach a document classification label.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ParsedDocument {
        ParsedDocument::new(
            Some("2025-11-05".to_string()),
            "DH 05.11.xlsx",
            vec![LineItem {
                product_name: "Bánh mì".to_string(),
                qty: 10.0,
                unit_price: Some(15000.0),
                tax: 0.0,
            }],
        )
    }

    #[test]
    fn test_json_round_trip_preserves_non_ascii() {
        let doc = sample();
        let json = serde_json::to_string_pretty(&doc).unwrap();
        assert!(json.contains("Bánh mì"));

        let back: ParsedDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_optional_fields_absent_from_json() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(!json.contains("store"));
        assert!(!json.contains("order_slip"));
        assert!(!json.contains("\"type\""));
        // delivery_date and unit_price serialize as explicit nulls
        let no_date = ParsedDocument::new(None, "x.pdf", vec![]);
        assert!(serde_json::to_string(&no_date).unwrap().contains("\"delivery_date\":null"));
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let doc = sample().with_kind("forecast");
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"type\":\"forecast\""));
    }
}
