//! Per-vendor regex tables.
//!
//! Separator sets and capture order differ between partners on purpose; each
//! partner's documents are matched with their own pattern rather than one
//! unified date/row grammar.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // cb: day.month with optional 2- or 4-digit year in the filename
    pub static ref CB_FILENAME_DATE: Regex =
        Regex::new(r"(\d{1,2})[.\-](\d{1,2})(?:[.\-](\d{2,4}))?").unwrap();

    // coop: day.month only in the filename
    pub static ref COOP_FILENAME_DATE: Regex =
        Regex::new(r"(\d{1,2})\.(\d{1,2})").unwrap();

    // satra: separators accepted in the free-form date cell
    pub static ref SATRA_DATE_SEP: Regex = Regex::new(r"[.\-/]").unwrap();

    // genshai: labeled delivery date inside the page text
    pub static ref GENSHAI_DELIVERY_DATE: Regex =
        Regex::new(r"Ngày giao hàng:\s*(\d{1,2})/(\d{1,2})/(\d{4})").unwrap();

    // genshai: ordinal, product, qty, unit price, tax
    pub static ref GENSHAI_LINE: Regex =
        Regex::new(r"^\d+\s+(.+?)\s+([\d,]+)\s+([\d,.]+)\s+([\d,.]+)$").unwrap();

    // mini: dd-mm-yyyy anywhere in the page text
    pub static ref MINI_TEXT_DATE: Regex =
        Regex::new(r"(\d{1,2})-(\d{1,2})-(\d{4})").unwrap();

    // mini: SKU, product, unit marker, unit price, qty, line total
    pub static ref MINI_LINE: Regex =
        Regex::new(r"^(\d{7})\s+(.+?)\s+EA\s+([\d,]+)\s+(\d+)\s+([\d,]+)").unwrap();

    // coop: grouped price like 12.500 or 12,500
    pub static ref COOP_PRICE: Regex = Regex::new(r"\b(\d{2,3}[.,]\d{3})\b").unwrap();

    // coop: the last small integer on the line is the quantity
    pub static ref COOP_TRAILING_QTY: Regex = Regex::new(r"\b(\d{1,3})\D*$").unwrap();
}
