//! Aggregation Module
//! Typed row extraction, positive filter, per-country sum and descending sort.

use crate::data::schema::{ValidatedTable, COUNTRY_COLUMN, IMPRESSIONS_COLUMN};
use polars::prelude::PolarsError;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum DataTypeError {
    #[error("Column '{column}' row {row}: expected an integer, found {}", describe(.value))]
    InvalidValue {
        column: String,
        /// 1-based data row, header excluded.
        row: usize,
        value: Option<String>,
    },
    #[error("Impressions total for '{country}' exceeds {}", MAX_TOTAL)]
    Overflow { country: String },
    #[error("Failed to read column: {0}")]
    Column(#[from] PolarsError),
}

fn describe(value: &Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => format!("{:?}", v),
        _ => "a missing value".to_string(),
    }
}

/// One observation with typed required fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub country: String,
    pub impressions: i64,
    /// Remaining columns, carried through untouched.
    pub extra: BTreeMap<String, Option<String>>,
}

/// Total impressions for one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryTotal {
    pub country: String,
    pub impressions: u64,
}

impl CountryTotal {
    pub fn new(country: impl Into<String>, impressions: u64) -> Self {
        Self {
            country: country.into(),
            impressions,
        }
    }
}

/// Per-country totals, sorted descending, ties in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedTable {
    entries: Vec<CountryTotal>,
}

impl AggregatedTable {
    pub fn entries(&self) -> &[CountryTotal] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Country keys in table order.
    pub fn countries(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.country.clone()).collect()
    }
}

/// Materialize typed rows.
///
/// Impressions cells are trimmed and parsed as integers; an integral float
/// (`"100.0"`) is coerced. Anything else, and any blank country, is rejected.
pub fn extract_rows(table: &ValidatedTable) -> Result<Vec<Row>, DataTypeError> {
    let raw = table.raw();
    let countries = raw.text_column(COUNTRY_COLUMN)?;
    let impressions = raw.text_column(IMPRESSIONS_COLUMN)?;

    let extra_labels: Vec<String> = raw
        .columns()
        .into_iter()
        .filter(|label| label != COUNTRY_COLUMN && label != IMPRESSIONS_COLUMN)
        .collect();
    let extra_values = extra_labels
        .iter()
        .map(|label| raw.text_column(label))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::with_capacity(raw.row_count());
    for (idx, (country, count)) in countries.into_iter().zip(impressions).enumerate() {
        let country = match country {
            Some(c) if !c.trim().is_empty() => c,
            other => {
                return Err(DataTypeError::InvalidValue {
                    column: COUNTRY_COLUMN.to_string(),
                    row: idx + 1,
                    value: other,
                })
            }
        };

        let impressions = count
            .as_deref()
            .and_then(parse_impressions)
            .ok_or_else(|| DataTypeError::InvalidValue {
                column: IMPRESSIONS_COLUMN.to_string(),
                row: idx + 1,
                value: count.clone(),
            })?;

        let extra = extra_labels
            .iter()
            .zip(&extra_values)
            .map(|(label, values)| (label.clone(), values[idx].clone()))
            .collect();

        rows.push(Row {
            country,
            impressions,
            extra,
        });
    }

    Ok(rows)
}

fn parse_impressions(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Some(n);
    }

    let f = text.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Drop non-positive rows, sum per country, sort by total descending.
pub fn aggregate(table: &ValidatedTable) -> Result<AggregatedTable, DataTypeError> {
    let rows = extract_rows(table)?;
    aggregate_rows(&rows)
}

/// Largest per-country total. Totals stay loadable as a signed 64-bit cell.
pub const MAX_TOTAL: u64 = i64::MAX as u64;

/// Aggregate already-typed rows.
pub fn aggregate_rows(rows: &[Row]) -> Result<AggregatedTable, DataTypeError> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<CountryTotal> = Vec::new();
    let mut dropped = 0usize;

    for row in rows {
        // Slots follow first appearance, filtered rows included.
        let slot = *index.entry(row.country.as_str()).or_insert_with(|| {
            entries.push(CountryTotal::new(row.country.clone(), 0));
            entries.len() - 1
        });

        if row.impressions <= 0 {
            dropped += 1;
            continue;
        }

        let entry = &mut entries[slot];
        entry.impressions = entry
            .impressions
            .checked_add(row.impressions as u64)
            .filter(|total| *total <= MAX_TOTAL)
            .ok_or_else(|| DataTypeError::Overflow {
                country: row.country.clone(),
            })?;
    }

    entries.retain(|e| e.impressions > 0);
    // sort_by is stable: equal totals keep first-appearance order.
    entries.sort_by(|a, b| b.impressions.cmp(&a.impressions));

    debug!(
        rows = rows.len(),
        dropped,
        countries = entries.len(),
        "aggregated impressions by country"
    );
    Ok(AggregatedTable { entries })
}
