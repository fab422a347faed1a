//! Column-name configuration for input files.

use crate::error::AnalysisError;
use serde::Deserialize;

/// Maps each logical column to the header names accepted for it.
///
/// Stored as a JSON object on disk; any column left out keeps its default
/// aliases:
/// ```json
/// {
///   "product": ["item", "product"],
///   "unit_price": ["price_ars"]
/// }
/// ```
///
/// Header matching is case-insensitive and ignores surrounding whitespace.
/// The first alias found in the header row wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    #[serde(default = "default_product")]
    pub product: Vec<String>,
    #[serde(default = "default_category")]
    pub category: Vec<String>,
    #[serde(default = "default_date")]
    pub date: Vec<String>,
    #[serde(default = "default_unit_price")]
    pub unit_price: Vec<String>,
    #[serde(default = "default_quantity")]
    pub quantity: Vec<String>,
}

fn aliases(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn default_product() -> Vec<String> {
    aliases(&["product", "producto"])
}

fn default_category() -> Vec<String> {
    aliases(&["category", "categoria", "categoría"])
}

fn default_date() -> Vec<String> {
    aliases(&["date", "fecha"])
}

fn default_unit_price() -> Vec<String> {
    aliases(&["unit_price", "price", "precio"])
}

fn default_quantity() -> Vec<String> {
    aliases(&["quantity", "cantidad"])
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            product: default_product(),
            category: default_category(),
            date: default_date(),
            unit_price: default_unit_price(),
            quantity: default_quantity(),
        }
    }
}

impl ColumnConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self, AnalysisError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses the config from JSON text, rejecting empty alias lists.
    pub fn from_json(content: &str) -> Result<Self, AnalysisError> {
        let config: ColumnConfig =
            serde_json::from_str(content).map_err(|e| AnalysisError::Config(e.to_string()))?;

        for (column, names) in config.columns() {
            if names.iter().all(|n| n.trim().is_empty()) {
                return Err(AnalysisError::Config(format!(
                    "column '{}' has no header names",
                    column
                )));
            }
        }

        Ok(config)
    }

    /// Resolves the config from an explicit path, then `SALES_COLUMNS_CONFIG`,
    /// falling back to the built-in aliases.
    pub fn resolve(path: Option<&str>) -> Result<Self, AnalysisError> {
        match path {
            Some(p) => Self::load(p),
            None => match std::env::var("SALES_COLUMNS_CONFIG") {
                Ok(p) if !p.trim().is_empty() => Self::load(p.trim()),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Iterates over all `(column, aliases)` pairs.
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        [
            ("product", self.product.as_slice()),
            ("category", self.category.as_slice()),
            ("date", self.date.as_slice()),
            ("unit_price", self.unit_price.as_slice()),
            ("quantity", self.quantity.as_slice()),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accepts_spanish_headers() {
        let config = ColumnConfig::default();
        assert!(config.product.contains(&"producto".to_string()));
        assert!(config.quantity.contains(&"cantidad".to_string()));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = ColumnConfig::from_json(r#"{ "product": ["item"] }"#).unwrap();
        assert_eq!(config.product, vec!["item".to_string()]);
        assert_eq!(config.date, ColumnConfig::default().date);
    }

    #[test]
    fn test_unknown_column_rejected() {
        let result = ColumnConfig::from_json(r#"{ "colour": ["c"] }"#);
        assert!(matches!(result, Err(AnalysisError::Config(_))));
    }

    #[test]
    fn test_empty_alias_list_rejected() {
        let result = ColumnConfig::from_json(r#"{ "date": [] }"#);
        assert!(matches!(result, Err(AnalysisError::Config(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = ColumnConfig::load("/definitely/not/here/columns.json");
        assert!(matches!(result, Err(AnalysisError::Io(_))));
    }
}
