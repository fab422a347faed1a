use crate::analyzers::types::{CleanedRecord, SalesRecord};
use crate::error::AnalysisError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

/// Label given to records whose category cell is present but blank.
pub const UNCATEGORIZED: &str = "Uncategorized";

// Month-first wins for ambiguous slash dates; day-first only when the
// month-first reading is impossible.
static DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"];

static DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Normalizes raw rows into typed [`CleanedRecord`]s.
///
/// Text fields are trimmed and numeric fields go through [`coerce_price`]
/// and [`coerce_quantity`], so a malformed price or quantity only zeroes
/// that record's revenue.
///
/// # Errors
///
/// Returns [`AnalysisError::MalformedDate`] for the first record whose date
/// matches none of the accepted formats. No partial output is returned.
pub fn clean(records: &[SalesRecord]) -> Result<Vec<CleanedRecord>, AnalysisError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| clean_record(index, record))
        .collect()
}

fn clean_record(index: usize, record: &SalesRecord) -> Result<CleanedRecord, AnalysisError> {
    let product = record.product.trim().to_string();

    let date = parse_date(&record.date).ok_or_else(|| AnalysisError::MalformedDate {
        index,
        product: product.clone(),
        value: record.date.clone(),
    })?;

    let category = record.category.as_deref().map(|c| match c.trim() {
        "" => UNCATEGORIZED.to_string(),
        trimmed => trimmed.to_string(),
    });

    let unit_price = coerce_price(&record.unit_price);
    let quantity = coerce_quantity(&record.quantity);

    if unit_price == 0.0 && !is_zero_literal(&record.unit_price) {
        debug!(index, raw = %record.unit_price, "unit_price coerced to zero");
    }
    if quantity == 0 && !is_zero_literal(&record.quantity) {
        debug!(index, raw = %record.quantity, "quantity coerced to zero");
    }

    Ok(CleanedRecord {
        product,
        category,
        date,
        unit_price,
        quantity,
        revenue: unit_price * quantity as f64,
    })
}

fn is_zero_literal(raw: &str) -> bool {
    raw.trim().parse::<f64>() == Ok(0.0)
}

/// Parses a price, returning 0.0 for anything that is not a finite number.
///
/// Zero is the documented default for malformed input, not an error: one
/// bad cell should not abort the analysis of an otherwise valid file.
pub fn coerce_price(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Parses a quantity, returning 0 for anything that is not a whole number.
///
/// Integral decimals such as `"3.0"` are accepted; fractional values are
/// treated as malformed.
pub fn coerce_quantity(raw: &str) -> i64 {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<i64>() {
        return v;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => v as i64,
        _ => 0,
    }
}

/// Parses a calendar date from the formats seen in sales exports.
///
/// Timestamps are accepted and truncated to their date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
