use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::analyzers::types::{Aggregates, CleanedRecord, Describe};
use crate::analyzers::{aggregate, describe, peak_day, top_product, total_revenue};
use crate::error::AnalysisError;

/// Everything derived from one cleaned dataset.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    pub generated_at: DateTime<Utc>,
    pub source: Option<String>,
    pub record_count: usize,
    pub total_revenue: f64,
    pub top_product: String,
    pub peak_day: NaiveDate,

    #[serde(flatten)]
    pub aggregates: Aggregates,
    pub describe: Describe,
}

impl SalesReport {
    /// Builds the report for `records`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyDataset`] when `records` is empty, since
    /// there is no top product or peak day to report.
    pub fn from_records(records: &[CleanedRecord]) -> Result<Self, AnalysisError> {
        let aggregates = aggregate(records);
        let top_product = top_product(&aggregates.revenue_by_product)?.to_string();
        let peak_day = peak_day(&aggregates.revenue_by_day)?;

        Ok(SalesReport {
            generated_at: Utc::now(),
            source: None,
            record_count: records.len(),
            total_revenue: total_revenue(records),
            top_product,
            peak_day,
            aggregates,
            describe: describe(records),
        })
    }

    /// Set the source the records were loaded from
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    /// Share of total revenue earned by the top product, in percent.
    pub fn top_product_share(&self) -> f64 {
        let top = self
            .aggregates
            .revenue_by_product
            .iter()
            .find(|e| e.product == self.top_product)
            .map_or(0.0, |e| e.revenue);
        pct(top, self.total_revenue)
    }
}

pub fn pct(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        (part / total) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::clean;
    use crate::analyzers::types::SalesRecord;

    fn raw(product: &str, date: &str, price: &str, qty: &str) -> SalesRecord {
        SalesRecord {
            product: product.to_string(),
            category: Some("Food".to_string()),
            date: date.to_string(),
            unit_price: price.to_string(),
            quantity: qty.to_string(),
        }
    }

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(pct(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(pct(50.0, 100.0), 50.0);
        assert_eq!(pct(1.0, 4.0), 25.0);
    }

    #[test]
    fn test_from_records_empty() {
        let result = SalesReport::from_records(&[]);
        assert!(matches!(result, Err(AnalysisError::EmptyDataset { .. })));
    }

    #[test]
    fn test_from_records_pizza() {
        let records = clean(&[
            raw("Pizza", "2024-01-01", "10", "2"),
            raw("Pizza", "2024-01-02", "10", "1"),
            raw("Empanada", "2024-01-02", "N/A", "3"),
        ])
        .unwrap();

        let report = SalesReport::from_records(&records)
            .unwrap()
            .with_source("ventas.csv");

        assert_eq!(report.source.as_deref(), Some("ventas.csv"));
        assert_eq!(report.record_count, 3);
        assert_eq!(report.total_revenue, 30.0);
        assert_eq!(report.top_product, "Pizza");
        assert_eq!(report.peak_day, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(report.top_product_share(), 100.0);
        assert_eq!(report.aggregates.revenue_by_product[1].revenue, 0.0);
    }

    #[test]
    fn test_report_serializes_flat_summaries() {
        let records = clean(&[raw("Pizza", "2024-01-01", "10", "2")]).unwrap();
        let report = SalesReport::from_records(&records).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["top_product"], "Pizza");
        assert_eq!(json["peak_day"], "2024-01-01");
        assert_eq!(json["revenue_by_product"][0]["revenue"], 20.0);
        assert_eq!(json["avg_revenue_by_category"][0]["category"], "Food");
    }
}
