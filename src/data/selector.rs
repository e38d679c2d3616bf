//! Country Selection Module

use crate::data::aggregator::{AggregatedTable, CountryTotal};
use std::collections::HashSet;
use tracing::debug;

/// Number of leading countries offered when the caller gives no selection.
pub const DEFAULT_SELECTION_LEN: usize = 10;

/// Order-preserving subset of an [`AggregatedTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedTable {
    entries: Vec<CountryTotal>,
}

impl SelectedTable {
    pub fn new(entries: Vec<CountryTotal>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CountryTotal] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Keep entries whose country is requested. Unknown keys are ignored.
pub fn select<S: AsRef<str>>(table: &AggregatedTable, countries: &[S]) -> SelectedTable {
    let wanted: HashSet<&str> = countries.iter().map(AsRef::as_ref).collect();
    let entries: Vec<CountryTotal> = table
        .entries()
        .iter()
        .filter(|e| wanted.contains(e.country.as_str()))
        .cloned()
        .collect();

    debug!(
        requested = wanted.len(),
        selected = entries.len(),
        "selected countries"
    );
    SelectedTable { entries }
}

/// The first [`DEFAULT_SELECTION_LEN`] countries in table order.
pub fn default_selection(table: &AggregatedTable) -> Vec<String> {
    table
        .entries()
        .iter()
        .take(DEFAULT_SELECTION_LEN)
        .map(|e| e.country.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregator::{aggregate_rows, Row};
    use std::collections::BTreeMap;

    fn table(rows: &[(&str, i64)]) -> AggregatedTable {
        let rows: Vec<Row> = rows
            .iter()
            .map(|(country, impressions)| Row {
                country: country.to_string(),
                impressions: *impressions,
                extra: BTreeMap::new(),
            })
            .collect();
        aggregate_rows(&rows).unwrap()
    }

    #[test]
    fn test_select_single() {
        let agg = table(&[("US", 100), ("US", 50), ("FR", 0), ("DE", -5), ("JP", 30)]);
        let selected = select(&agg, &["JP"]);
        assert_eq!(selected.entries(), &[CountryTotal::new("JP", 30)]);
    }

    #[test]
    fn test_select_all_is_identity() {
        let agg = table(&[("A", 5), ("B", 9), ("C", 1), ("D", 9)]);
        let selected = select(&agg, &agg.countries());
        assert_eq!(selected.entries(), agg.entries());
    }

    #[test]
    fn test_select_preserves_table_order() {
        let agg = table(&[("A", 5), ("B", 9), ("C", 1)]);
        let selected = select(&agg, &["C", "A", "B"]);
        let order: Vec<&str> = selected.entries().iter().map(|e| e.country.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_select_empty_and_unknown() {
        let agg = table(&[("A", 5)]);
        let none: [&str; 0] = [];
        assert!(select(&agg, &none).is_empty());

        let selected = select(&agg, &["Atlantis", "A", "A"]);
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_default_selection_is_top_ten() {
        let rows: Vec<(String, i64)> = (1..=15).map(|i| (format!("C{i:02}"), i)).collect();
        let rows: Vec<(&str, i64)> = rows.iter().map(|(c, i)| (c.as_str(), *i)).collect();
        let agg = table(&rows);

        let defaults = default_selection(&agg);
        assert_eq!(defaults.len(), DEFAULT_SELECTION_LEN);
        assert_eq!(defaults.first().map(String::as_str), Some("C15"));
        assert_eq!(defaults.last().map(String::as_str), Some("C06"));
    }

    #[test]
    fn test_default_selection_short_table() {
        let agg = table(&[("A", 5), ("B", 1)]);
        assert_eq!(default_selection(&agg), vec!["A", "B"]);
    }
}
