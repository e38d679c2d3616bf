//! Schema Validation Module
//! Checks that a loaded table carries the required column labels.

use crate::data::loader::RawTable;
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Label of the grouping key column.
pub const COUNTRY_COLUMN: &str = "Country";
/// Label of the impressions count column.
pub const IMPRESSIONS_COLUMN: &str = "Organic Google Search impressions";
/// Labels every source must carry, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 2] = [COUNTRY_COLUMN, IMPRESSIONS_COLUMN];

/// Required labels absent from a source table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing columns: {}", MissingList(.missing))]
pub struct SchemaError {
    pub missing: Vec<String>,
}

struct MissingList<'a>(&'a [String]);

impl fmt::Display for MissingList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, label) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}'", label)?;
        }
        write!(f, "}}")
    }
}

/// A [`RawTable`] known to carry every required column.
#[derive(Debug, Clone)]
pub struct ValidatedTable {
    raw: RawTable,
}

impl ValidatedTable {
    pub fn raw(&self) -> &RawTable {
        &self.raw
    }

    pub fn into_raw(self) -> RawTable {
        self.raw
    }
}

/// Check the label set only; row values are never inspected here.
pub fn validate(raw: RawTable) -> Result<ValidatedTable, SchemaError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|label| !raw.has_column(label))
        .map(|label| label.to_string())
        .collect();

    if !missing.is_empty() {
        warn!(?missing, columns = ?raw.columns(), "source is missing required columns");
        return Err(SchemaError { missing });
    }

    Ok(ValidatedTable { raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{DataLoader, SourceFormat};

    fn load(csv: &str) -> RawTable {
        DataLoader::load_bytes(csv.as_bytes(), SourceFormat::Text).unwrap()
    }

    #[test]
    fn test_accepts_superset() {
        let raw = load("Query,Country,Organic Google Search impressions,Clicks\nq,US,1,0\n");
        let validated = validate(raw).unwrap();
        assert_eq!(validated.raw().row_count(), 1);
    }

    #[test]
    fn test_accepts_labels_with_padding() {
        let raw = load("  Country\t, Organic Google Search impressions \nUS,1\n");
        assert!(validate(raw).is_ok());
    }

    #[test]
    fn test_missing_impressions() {
        let err = validate(load("Country,Clicks\nUS,3\n")).unwrap_err();
        assert_eq!(err.missing, vec![IMPRESSIONS_COLUMN.to_string()]);
        assert_eq!(
            err.to_string(),
            "Missing columns: {'Organic Google Search impressions'}"
        );
    }

    #[test]
    fn test_missing_both() {
        let err = validate(load("Query,Clicks\nq,3\n")).unwrap_err();
        assert_eq!(err.missing, vec![COUNTRY_COLUMN, IMPRESSIONS_COLUMN]);
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        let err = validate(load("country,Organic Google Search Impressions\nUS,3\n")).unwrap_err();
        assert_eq!(err.missing, vec![COUNTRY_COLUMN, IMPRESSIONS_COLUMN]);
    }

    #[test]
    fn test_values_not_inspected() {
        let raw = load("Country,Organic Google Search impressions\n,not a number\n");
        assert!(validate(raw).is_ok());
    }
}
