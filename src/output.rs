//! Output formatting and persistence for sales reports.
//!
//! Supports pretty-printing, a plain-text summary, JSON export, and one CSV
//! file per summary for downstream charting.

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::types::{CleanedRecord, ColumnStats, Describe};
use crate::stats::SalesReport;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub const PRODUCT_CSV: &str = "revenue_by_product.csv";
pub const DAY_CSV: &str = "revenue_by_day.csv";
pub const CATEGORY_CSV: &str = "avg_revenue_by_category.csv";

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &SalesReport) {
    debug!("{:#?}", report);
}

/// Logs the report as pretty-printed JSON.
pub fn print_json(report: &SalesReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes the headline insights, a preview of the first `head` cleaned
/// rows, and the three summaries as plain-text tables.
pub fn render_summary<W: Write>(
    out: &mut W,
    report: &SalesReport,
    records: &[CleanedRecord],
    head: usize,
) -> Result<()> {
    writeln!(out, "=== Sales insights ===")?;
    writeln!(out, "Records:        {}", report.record_count)?;
    writeln!(out, "Total revenue:  {:.2}", report.total_revenue)?;
    writeln!(
        out,
        "Top product:    {} ({:.1}% of revenue)",
        report.top_product,
        report.top_product_share()
    )?;
    writeln!(out, "Peak day:       {}", report.peak_day)?;

    if head > 0 && !records.is_empty() {
        writeln!(out, "\n=== First rows ===")?;
        writeln!(
            out,
            "{:<20} {:<16} {:<10} {:>10} {:>8} {:>12}",
            "product", "category", "date", "unit_price", "quantity", "revenue"
        )?;
        for r in records.iter().take(head) {
            writeln!(
                out,
                "{:<20} {:<16} {:<10} {:>10.2} {:>8} {:>12.2}",
                r.product,
                r.category.as_deref().unwrap_or("-"),
                r.date.to_string(),
                r.unit_price,
                r.quantity,
                r.revenue
            )?;
        }
    }

    writeln!(out, "\n=== Revenue by product ===")?;
    for e in &report.aggregates.revenue_by_product {
        writeln!(out, "{:<24} {:>14.2}", e.product, e.revenue)?;
    }

    writeln!(out, "\n=== Revenue by day ===")?;
    for e in &report.aggregates.revenue_by_day {
        writeln!(out, "{:<24} {:>14.2}", e.date.to_string(), e.revenue)?;
    }

    writeln!(out, "\n=== Average revenue by category ===")?;
    if report.aggregates.avg_revenue_by_category.is_empty() {
        writeln!(out, "(no category information)")?;
    }
    for e in &report.aggregates.avg_revenue_by_category {
        writeln!(out, "{:<24} {:>14.2}", e.category, e.avg_revenue)?;
    }

    Ok(())
}

/// Writes the column statistics as a table, one row per statistic.
pub fn render_describe<W: Write>(out: &mut W, describe: &Describe) -> Result<()> {
    writeln!(
        out,
        "{:<6} {:>14} {:>14} {:>14}",
        "", "unit_price", "quantity", "revenue"
    )?;

    let rows: [(&str, fn(&ColumnStats) -> f64); 8] = [
        ("count", |s| s.count as f64),
        ("mean", |s| s.mean),
        ("std", |s| s.std),
        ("min", |s| s.min),
        ("25%", |s| s.p25),
        ("50%", |s| s.p50),
        ("75%", |s| s.p75),
        ("max", |s| s.max),
    ];

    for (label, stat) in rows {
        writeln!(
            out,
            "{:<6} {:>14.2} {:>14.2} {:>14.2}",
            label,
            stat(&describe.unit_price),
            stat(&describe.quantity),
            stat(&describe.revenue)
        )?;
    }

    Ok(())
}

/// Writes the full report as pretty-printed JSON to `path`.
pub fn write_report_json(path: &str, report: &SalesReport) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    debug!(path, "Report JSON written");
    Ok(())
}

/// Writes each summary to its own CSV file under `dir`, replacing any
/// previous export.
pub fn write_summary_csvs(dir: &str, report: &SalesReport) -> Result<()> {
    fs::create_dir_all(dir)?;

    let aggregates = &report.aggregates;
    write_rows(&Path::new(dir).join(PRODUCT_CSV), &aggregates.revenue_by_product)?;
    write_rows(&Path::new(dir).join(DAY_CSV), &aggregates.revenue_by_day)?;
    write_rows(
        &Path::new(dir).join(CATEGORY_CSV),
        &aggregates.avg_revenue_by_category,
    )?;

    info!(dir, "Summary CSVs written");
    Ok(())
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::clean;
    use crate::analyzers::types::SalesRecord;
    use std::env;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample() -> (SalesReport, Vec<CleanedRecord>) {
        let raw = vec![
            SalesRecord {
                product: "Pizza".to_string(),
                category: Some("Food".to_string()),
                date: "2024-01-01".to_string(),
                unit_price: "10".to_string(),
                quantity: "2".to_string(),
            },
            SalesRecord {
                product: "Cafe".to_string(),
                category: Some("Drinks".to_string()),
                date: "2024-01-02".to_string(),
                unit_price: "2.5".to_string(),
                quantity: "2".to_string(),
            },
        ];
        let records = clean(&raw).unwrap();
        (SalesReport::from_records(&records).unwrap(), records)
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        let (report, _) = sample();
        print_pretty(&report);
    }

    #[test]
    fn test_print_json_does_not_panic() {
        let (report, _) = sample();
        print_json(&report).unwrap();
    }

    #[test]
    fn test_render_summary_contains_insights() {
        let (report, records) = sample();
        let mut buf = Vec::new();
        render_summary(&mut buf, &report, &records, 1).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Total revenue:  25.00"));
        assert!(text.contains("Top product:    Pizza (80.0% of revenue)"));
        assert!(text.contains("Peak day:       2024-01-01"));
        assert!(text.contains("=== First rows ==="));
        assert!(text.contains("Drinks"));
    }

    #[test]
    fn test_render_describe_has_all_rows() {
        let (report, _) = sample();
        let mut buf = Vec::new();
        render_describe(&mut buf, &report.describe).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 9);
        assert!(text.lines().any(|l| l.starts_with("count")));
        assert!(text.lines().any(|l| l.starts_with("max")));
    }

    #[test]
    fn test_write_summary_csvs() {
        let dir = temp_path("sales_analyzer_test_export");
        let _ = fs::remove_dir_all(&dir);

        let (report, _) = sample();
        write_summary_csvs(&dir, &report).unwrap();

        let products = fs::read_to_string(Path::new(&dir).join(PRODUCT_CSV)).unwrap();
        let lines: Vec<_> = products.lines().collect();
        assert_eq!(lines, vec!["product,revenue", "Pizza,20.0", "Cafe,5.0"]);

        let days = fs::read_to_string(Path::new(&dir).join(DAY_CSV)).unwrap();
        assert!(days.starts_with("date,revenue\n2024-01-01,20.0"));

        let cats = fs::read_to_string(Path::new(&dir).join(CATEGORY_CSV)).unwrap();
        assert_eq!(cats.lines().next(), Some("category,avg_revenue"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_report_json_round_trips_fields() {
        let path = temp_path("sales_analyzer_test_report.json");
        let _ = fs::remove_file(&path);

        let (report, _) = sample();
        write_report_json(&path, &report).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["record_count"], 2);
        assert_eq!(value["top_product"], "Pizza");

        fs::remove_file(&path).unwrap();
    }
}
