//! Data types used by the cleaning and aggregation pipeline.

use chrono::NaiveDate;
use serde::Serialize;

/// A single raw row as read from the input file.
///
/// Every field is kept as source text; interpretation happens in
/// [`clean`](crate::analyzers::clean::clean).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesRecord {
    pub product: String,
    /// `None` when the source carries no category column at all.
    pub category: Option<String>,
    pub date: String,
    pub unit_price: String,
    pub quantity: String,
}

/// A normalized row with typed fields and derived revenue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedRecord {
    pub product: String,
    pub category: Option<String>,
    pub date: NaiveDate,
    pub unit_price: f64,
    pub quantity: i64,
    pub revenue: f64,
}

impl From<&CleanedRecord> for SalesRecord {
    fn from(record: &CleanedRecord) -> Self {
        SalesRecord {
            product: record.product.clone(),
            category: record.category.clone(),
            date: record.date.format("%Y-%m-%d").to_string(),
            unit_price: record.unit_price.to_string(),
            quantity: record.quantity.to_string(),
        }
    }
}

/// Total revenue for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRevenue {
    pub product: String,
    pub revenue: f64,
}

/// Total revenue for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
}

/// Mean per-record revenue for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAverage {
    pub category: String,
    pub avg_revenue: f64,
}

/// The three ordered summaries derived from a cleaned dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregates {
    /// Descending by revenue, ties by product name.
    pub revenue_by_product: Vec<ProductRevenue>,
    /// Ascending by date.
    pub revenue_by_day: Vec<DailyRevenue>,
    /// Descending by mean revenue, ties by category name. Empty when no
    /// record carries a category.
    pub avg_revenue_by_category: Vec<CategoryAverage>,
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

/// Column statistics for the numeric fields of a cleaned dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Describe {
    pub unit_price: ColumnStats,
    pub quantity: ColumnStats,
    pub revenue: ColumnStats,
}
