//! Search Impressions Dashboard
//!
//! Loads an organic search export (CSV or spreadsheet), totals impressions per
//! country and serves the selected subset as a summary, a pie chart, a table
//! and CSV/HTML downloads.

pub mod charts;
pub mod data;
pub mod export;
pub mod gui;
pub mod stats;

pub use data::{PipelineError, Report, Session, SourceFormat};
