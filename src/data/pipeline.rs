//! Pipeline Module
//! Load → validate → aggregate once per source; select → summarize per selection.

use crate::charts::{ChartError, PieChartRenderer};
use crate::data::aggregator::{aggregate, AggregatedTable, DataTypeError};
use crate::data::loader::{DataLoader, LoaderError, RawTable, SourceFormat};
use crate::data::schema::{validate, SchemaError};
use crate::data::selector::{default_selection, select, SelectedTable};
use crate::export::{self, ExportError};
use crate::stats::Summary;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Format(#[from] LoaderError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    DataType(#[from] DataTypeError),
}

/// One loaded source: the immutable raw table and its aggregate.
#[derive(Debug, Clone)]
pub struct Session {
    raw: RawTable,
    aggregated: AggregatedTable,
}

impl Session {
    /// Validate and aggregate. Nothing is kept if any stage fails.
    pub fn from_raw(raw: RawTable) -> Result<Self, PipelineError> {
        let validated = validate(raw)?;
        let aggregated = aggregate(&validated)?;

        info!(
            rows = validated.raw().row_count(),
            countries = aggregated.len(),
            "source ready"
        );
        Ok(Self {
            raw: validated.into_raw(),
            aggregated,
        })
    }

    pub fn load_bytes(bytes: &[u8], format: SourceFormat) -> Result<Self, PipelineError> {
        Self::from_raw(DataLoader::load_bytes(bytes, format)?)
    }

    pub fn load_path(path: &Path, format: Option<SourceFormat>) -> Result<Self, PipelineError> {
        Self::from_raw(DataLoader::load_path(path, format)?)
    }

    pub fn raw(&self) -> &RawTable {
        &self.raw
    }

    pub fn aggregated(&self) -> &AggregatedTable {
        &self.aggregated
    }

    /// Selectable countries in aggregated order.
    pub fn countries(&self) -> Vec<String> {
        self.aggregated.countries()
    }

    pub fn default_selection(&self) -> Vec<String> {
        default_selection(&self.aggregated)
    }

    /// Recompute selection and summary from the aggregate.
    ///
    /// `None` applies the default top-ten selection; `Some(&[])` selects nothing.
    pub fn report(&self, countries: Option<&[String]>) -> Report {
        let selected = match countries {
            Some(countries) => select(&self.aggregated, countries),
            None => select(&self.aggregated, &self.default_selection()),
        };
        let summary = Summary::of(&selected);

        Report { selected, summary }
    }
}

/// Everything the presentation layer renders for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    selected: SelectedTable,
    summary: Summary,
}

impl Report {
    pub fn selected(&self) -> &SelectedTable {
        &self.selected
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, ExportError> {
        export::csv::to_csv_bytes(&self.selected)
    }

    pub fn to_html_bytes(&self) -> Vec<u8> {
        export::html::to_html_bytes(&self.selected)
    }

    pub fn chart_svg(&self, width: u32, height: u32) -> Result<String, ChartError> {
        PieChartRenderer::render_svg(&self.selected, width, height)
    }
}
