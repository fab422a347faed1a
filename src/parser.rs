//! CSV parser for sales record files.

use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::analyzers::types::SalesRecord;
use crate::config::ColumnConfig;
use crate::error::AnalysisError;

/// Header positions resolved once against a [`ColumnConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub product: usize,
    pub category: Option<usize>,
    pub date: usize,
    pub unit_price: usize,
    pub quantity: usize,
}

impl Schema {
    /// Locates every column in `headers`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingColumns`] naming every required
    /// column that has no matching header. `category` is optional.
    pub fn resolve(headers: &StringRecord, config: &ColumnConfig) -> Result<Self, AnalysisError> {
        let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

        let find = |names: &[String]| {
            names.iter().find_map(|name| {
                let name = name.trim().to_lowercase();
                normalized.iter().position(|h| *h == name)
            })
        };

        let product = find(config.product.as_slice());
        let category = find(config.category.as_slice());
        let date = find(config.date.as_slice());
        let unit_price = find(config.unit_price.as_slice());
        let quantity = find(config.quantity.as_slice());

        match (product, date, unit_price, quantity) {
            (Some(product), Some(date), Some(unit_price), Some(quantity)) => Ok(Schema {
                product,
                category,
                date,
                unit_price,
                quantity,
            }),
            _ => {
                let missing = [
                    ("product", product),
                    ("date", date),
                    ("unit_price", unit_price),
                    ("quantity", quantity),
                ]
                .into_iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
                Err(AnalysisError::MissingColumns { missing })
            }
        }
    }

    fn record(&self, row: &ByteRecord) -> SalesRecord {
        let cell = |idx: usize| {
            String::from_utf8_lossy(row.get(idx).unwrap_or(b"")).into_owned()
        };

        SalesRecord {
            product: cell(self.product),
            category: self.category.map(cell),
            date: cell(self.date),
            unit_price: cell(self.unit_price),
            quantity: cell(self.quantity),
        }
    }
}

/// Parses delimited sales data into raw [`SalesRecord`]s.
///
/// Header names are trimmed before lookup. Cell values are kept verbatim,
/// except that invalid UTF-8 is replaced with U+FFFD so a corrupt cell is
/// left for cleaning to coerce. Short rows read their missing cells as empty
/// text.
///
/// # Errors
///
/// Returns an error if a required column is missing or the bytes are not
/// valid CSV.
pub fn parse_sales_csv(
    bytes: &[u8],
    config: &ColumnConfig,
) -> Result<Vec<SalesRecord>, AnalysisError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(bytes);

    let schema = Schema::resolve(reader.headers()?, config)?;
    debug!(?schema, "Resolved input schema");

    let mut records = Vec::new();
    for result in reader.byte_records() {
        let row = result?;
        records.push(schema.record(&row));
    }

    Ok(records)
}
