//! Sales record cleaning and aggregation.
//!
//! This module normalizes raw rows into typed records, groups them into
//! revenue summaries by product, day and category, and derives the headline
//! insights. Everything here is a pure transformation over in-memory data.

pub mod aggregate;
pub mod clean;
pub mod types;
pub mod utility;

pub use aggregate::{aggregate, describe, peak_day, top_product, total_revenue};
pub use clean::clean;
