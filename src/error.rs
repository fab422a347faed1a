//! Error type for loading, cleaning and summarizing sales records.

use thiserror::Error;

/// Failures that abort an analysis run.
///
/// Malformed numeric fields are not represented here: they are coerced to
/// zero during cleaning and never surface as errors.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("record {index} (product '{product}') has an unparsable date: '{value}'")]
    MalformedDate {
        index: usize,
        product: String,
        value: String,
    },
    #[error("cannot compute {summary} over an empty dataset")]
    EmptyDataset { summary: &'static str },
    #[error("input is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },
    #[error("column configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
