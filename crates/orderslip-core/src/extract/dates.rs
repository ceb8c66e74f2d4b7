//! Delivery-date extraction.
//!
//! Every helper returns an ISO `YYYY-MM-DD` string or None - never an error.
//! Impossible dates (day 31 in February) are rejected by calendar
//! construction. Callers inject the year used when a pattern carries none;
//! the CLI passes the current local year.

use chrono::NaiveDate;

use super::patterns::{
    CB_FILENAME_DATE, COOP_FILENAME_DATE, GENSHAI_DELIVERY_DATE, MINI_TEXT_DATE, SATRA_DATE_SEP,
};

/// Build an ISO date string, validating against the calendar.
pub fn to_iso(year: i32, month: u32, day: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Expand a two-digit year into the 2000s.
pub fn expand_year(year: i32) -> i32 {
    if year < 100 { 2000 + year } else { year }
}

/// cb: `d.m`, `dd.mm`, `d.m.yy`, `dd.mm.yyyy` (also with `-`) in a filename.
pub fn date_from_filename(filename: &str, default_year: i32) -> Option<String> {
    let caps = CB_FILENAME_DATE.captures(filename)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year = match caps.get(3) {
        Some(m) => expand_year(m.as_str().parse().ok()?),
        None => default_year,
    };
    to_iso(year, month, day)
}

/// coop: `d.m` in a filename, year always defaulted.
pub fn date_from_day_month(filename: &str, default_year: i32) -> Option<String> {
    let caps = COOP_FILENAME_DATE.captures(filename)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    to_iso(default_year, month, day)
}

/// satra: free-form cell text split on `.`, `-` or `/`.
///
/// Two parts are day and month; three add a year (2-digit expanded). Any
/// non-numeric part or other arity yields None.
pub fn date_from_cell_text(raw: &str, default_year: i32) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parts: Option<Vec<i64>> = SATRA_DATE_SEP
        .split(trimmed)
        .map(|p| p.trim().parse::<i64>().ok())
        .collect();
    match parts?.as_slice() {
        [d, m] => to_iso(default_year, *m as u32, *d as u32),
        [d, m, y] => to_iso(expand_year(*y as i32), *m as u32, *d as u32),
        _ => None,
    }
}

/// genshai: `Ngày giao hàng: d/m/yyyy` inside page text.
pub fn date_from_labeled_text(text: &str) -> Option<String> {
    let caps = GENSHAI_DELIVERY_DATE.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    to_iso(year, month, day)
}

/// mini: `d-m-yyyy` inside page text.
pub fn date_from_dashed_text(text: &str) -> Option<String> {
    let caps = MINI_TEXT_DATE.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    to_iso(year, month, day)
}
