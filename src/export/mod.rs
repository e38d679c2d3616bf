//! Export module - Serializes a selection for download

pub mod csv;
pub mod html;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Suggested download names.
pub const CSV_FILE_NAME: &str = "filtered_impressions.csv";
pub const HTML_FILE_NAME: &str = "filtered_impressions.html";
pub const SVG_FILE_NAME: &str = "impressions_chart.svg";
