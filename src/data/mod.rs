//! Data module - Source loading, validation, aggregation and selection

mod aggregator;
mod loader;
mod pipeline;
mod schema;
mod selector;

pub use aggregator::{
    aggregate, aggregate_rows, extract_rows, AggregatedTable, CountryTotal, DataTypeError, Row,
    MAX_TOTAL,
};
pub use loader::{DataLoader, LoaderError, RawTable, SourceFormat};
pub use pipeline::{PipelineError, Report, Session};
pub use schema::{
    validate, SchemaError, ValidatedTable, COUNTRY_COLUMN, IMPRESSIONS_COLUMN, REQUIRED_COLUMNS,
};
pub use selector::{default_selection, select, SelectedTable, DEFAULT_SELECTION_LEN};
