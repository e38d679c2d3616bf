//! Delimited-text export via Polars' CSV writer.

use crate::data::{SelectedTable, COUNTRY_COLUMN, IMPRESSIONS_COLUMN};
use crate::export::ExportError;
use polars::prelude::*;
use tracing::debug;

/// Comma-separated UTF-8: the two required labels as header, one line per entry.
///
/// Fields containing the delimiter, a quote or a newline are quoted.
pub fn to_csv_bytes(selected: &SelectedTable) -> Result<Vec<u8>, ExportError> {
    let countries: Vec<&str> = selected
        .entries()
        .iter()
        .map(|e| e.country.as_str())
        .collect();
    let totals: Vec<u64> = selected.entries().iter().map(|e| e.impressions).collect();

    let mut df = DataFrame::new(vec![
        Column::new(COUNTRY_COLUMN.into(), countries),
        Column::new(IMPRESSIONS_COLUMN.into(), totals),
    ])?;

    let mut buf = Vec::new();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)?;

    debug!(rows = selected.len(), bytes = buf.len(), "exported CSV");
    Ok(buf)
}
