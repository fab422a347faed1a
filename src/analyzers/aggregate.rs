use crate::analyzers::types::{
    Aggregates, CategoryAverage, CleanedRecord, ColumnStats, DailyRevenue, Describe,
    ProductRevenue,
};
use crate::analyzers::utility::{cmp_value, mean, quantile, sample_stddev};
use crate::error::AnalysisError;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Groups cleaned records into the three revenue summaries.
///
/// Groups are collected in key order first and then stably sorted by value,
/// so equal values keep their natural key order (product and category names
/// ascending).
pub fn aggregate(records: &[CleanedRecord]) -> Aggregates {
    let mut by_product: BTreeMap<&str, f64> = BTreeMap::new();
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut by_category: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

    for record in records {
        *by_product.entry(record.product.as_str()).or_default() += record.revenue;
        *by_day.entry(record.date).or_default() += record.revenue;

        if let Some(category) = record.category.as_deref() {
            by_category.entry(category).or_default().push(record.revenue);
        }
    }

    let mut revenue_by_product: Vec<ProductRevenue> = by_product
        .into_iter()
        .map(|(product, revenue)| ProductRevenue {
            product: product.to_string(),
            revenue,
        })
        .collect();
    revenue_by_product.sort_by(|a, b| cmp_value(b.revenue, a.revenue));

    let revenue_by_day = by_day
        .into_iter()
        .map(|(date, revenue)| DailyRevenue { date, revenue })
        .collect();

    let mut avg_revenue_by_category: Vec<CategoryAverage> = by_category
        .into_iter()
        .map(|(category, series)| CategoryAverage {
            category: category.to_string(),
            avg_revenue: mean(&series),
        })
        .collect();
    avg_revenue_by_category.sort_by(|a, b| cmp_value(b.avg_revenue, a.avg_revenue));

    Aggregates {
        revenue_by_product,
        revenue_by_day,
        avg_revenue_by_category,
    }
}

/// Sum of every record's revenue.
pub fn total_revenue(records: &[CleanedRecord]) -> f64 {
    records.iter().map(|r| r.revenue).sum()
}

/// Returns the product with the highest total revenue.
///
/// Ties go to the product name that sorts first. The input does not need
/// to be pre-sorted.
pub fn top_product(revenue_by_product: &[ProductRevenue]) -> Result<&str, AnalysisError> {
    revenue_by_product
        .iter()
        .reduce(|best, entry| match cmp_value(entry.revenue, best.revenue) {
            Ordering::Greater => entry,
            Ordering::Equal if entry.product < best.product => entry,
            _ => best,
        })
        .map(|entry| entry.product.as_str())
        .ok_or(AnalysisError::EmptyDataset {
            summary: "top product",
        })
}

/// Returns the day with the highest total revenue, earliest day on ties.
pub fn peak_day(revenue_by_day: &[DailyRevenue]) -> Result<NaiveDate, AnalysisError> {
    revenue_by_day
        .iter()
        .reduce(|best, entry| match cmp_value(entry.revenue, best.revenue) {
            Ordering::Greater => entry,
            Ordering::Equal if entry.date < best.date => entry,
            _ => best,
        })
        .map(|entry| entry.date)
        .ok_or(AnalysisError::EmptyDataset {
            summary: "peak day",
        })
}

/// Computes count, mean, spread and quartiles for the numeric columns.
pub fn describe(records: &[CleanedRecord]) -> Describe {
    let prices: Vec<f64> = records.iter().map(|r| r.unit_price).collect();
    let quantities: Vec<f64> = records.iter().map(|r| r.quantity as f64).collect();
    let revenues: Vec<f64> = records.iter().map(|r| r.revenue).collect();

    Describe {
        unit_price: column_stats(prices),
        quantity: column_stats(quantities),
        revenue: column_stats(revenues),
    }
}

fn column_stats(mut values: Vec<f64>) -> ColumnStats {
    if values.is_empty() {
        return ColumnStats::default();
    }

    values.sort_by(f64::total_cmp);
    let avg = mean(&values);

    ColumnStats {
        count: values.len(),
        mean: avg,
        std: sample_stddev(&values, avg),
        min: values[0],
        p25: quantile(&values, 0.25),
        p50: quantile(&values, 0.50),
        p75: quantile(&values, 0.75),
        max: values[values.len() - 1],
    }
}
